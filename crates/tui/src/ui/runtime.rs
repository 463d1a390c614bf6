//! Runtime: event loop and input routing for the grid viewer.
//!
//! - Owns the terminal lifecycle (alternate screen, raw mode, mouse capture).
//! - A dedicated input task reads `crossterm` events and forwards them over a
//!   channel; mouse moves are throttled to one per frame.
//! - Keys and mouse events go to [`MainView`]; returned [`Effect`]s are
//!   applied to [`App`] and the screen is redrawn only after a change.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc};
use tracing::{debug, warn};

use crate::app::{App, Effect};
use crate::ui::main_component::MainView;

/// Spawns the input reader and returns the receiving end of its channel.
async fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_move = Instant::now();

    tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if !event::poll(sixteen_ms).unwrap_or(false) {
                if sender.is_closed() {
                    break;
                }
                continue;
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(e) = sender.send(event).await {
                        warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(..) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies effects in order; returns `false` once the app should exit.
fn process_effects(app: &mut App, effects: Vec<Effect>) -> bool {
    for effect in effects {
        debug!(?effect, "applying effect");
        if !app.apply(&effect) {
            return false;
        }
    }
    true
}

/// Sets up the terminal, runs the event loop until quit or Ctrl+C, and
/// restores the terminal even when the loop fails.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_thread().await;
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    input_receiver.close();
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    render(terminal, app, main_view)?;

    // Some terminals drop resize notifications; poll the size as a fallback.
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();

    loop {
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                let is_resize = matches!(event, Event::Resize(..));
                let effects = handle_input_event(app, main_view, event);
                if !process_effects(app, effects) {
                    break;
                }
                needs_render = true;
                if is_resize {
                    debug!("terminal resized");
                }
            }
            _ = signal::ctrl_c() => { break; }
        }

        if let Ok(size) = crossterm::terminal::size()
            && last_size != Some(size)
        {
            last_size = Some(size);
            needs_render = true;
        }

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}
