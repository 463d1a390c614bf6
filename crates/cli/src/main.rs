use std::fs::{self, File};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use gallery_grid::{DataTable, DataTableOptions, TableEvent};
use gallery_types::Dataset;
use gallery_util::{UserSettings, default_log_path, load_dataset};
use serde_json::json;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let interactive = matches!(matches.subcommand_name(), Some("view") | None);
    init_tracing(interactive);

    let settings = load_settings();
    let options = table_options(matches.subcommand().map_or(&matches, |(_, sub)| sub));

    match matches.subcommand() {
        Some(("layout", sub)) => {
            let (dataset, _) = read_input(sub)?;
            println!("{}", layout_report(dataset, &settings, options)?);
        }
        Some(("sort", sub)) => {
            let (dataset, _) = read_input(sub)?;
            let column = sub.get_one::<usize>("column").copied().unwrap_or(0);
            let clicks = sub.get_one::<usize>("clicks").copied().unwrap_or(1);
            println!("{}", sort_report(dataset, &settings, options, column, clicks)?);
        }
        Some(("view", sub)) => {
            let (dataset, source) = read_input(sub)?;
            gallery_tui::run(Arc::new(dataset), &settings, options, &source).await?;
        }
        _ => {
            build_cli().print_help()?;
        }
    }
    Ok(())
}

fn build_cli() -> Command {
    let file_arg = || {
        Arg::new("file")
            .required(true)
            .action(ArgAction::Set)
            .help("Dataset JSON file, or - for standard input")
    };
    Command::new("gallery")
        .about("Explore tabular datasets in a virtualized, sortable grid")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("width")
                .long("width")
                .global(true)
                .action(ArgAction::Set)
                .value_parser(value_parser!(u32))
                .help("Table width in pixels used for column sizing"),
        )
        .arg(
            Arg::new("include-empty-columns")
                .long("include-empty-columns")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Keep columns that have no values"),
        )
        .subcommand(Command::new("view").about("Open the dataset in the terminal grid").arg(file_arg()))
        .subcommand(
            Command::new("layout")
                .about("Print the computed column widths as JSON")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("sort")
                .about("Print the display order after clicking a header")
                .arg(file_arg())
                .arg(
                    Arg::new("column")
                        .long("column")
                        .short('c')
                        .required(true)
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(usize))
                        .help("Zero-based column index"),
                )
                .arg(
                    Arg::new("clicks")
                        .long("clicks")
                        .short('n')
                        .action(ArgAction::Set)
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Number of header clicks"),
                ),
        )
}

/// Logs go to a file while the terminal UI owns the screen, stderr otherwise.
fn init_tracing(interactive: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    if interactive {
        let path = default_log_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(file) = File::options().create(true).append(true).open(&path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            return;
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings() -> UserSettings {
    match UserSettings::new() {
        Ok(settings) => {
            debug!(path = %settings.path().display(), "settings loaded");
            settings
        }
        Err(error) => {
            warn!(error = %error, "Failed to load settings; using defaults");
            UserSettings::ephemeral()
        }
    }
}

/// Global flags are read from the subcommand's matches, where clap propagates them.
fn table_options(matches: &ArgMatches) -> DataTableOptions {
    let mut options = DataTableOptions::default();
    if let Some(width) = matches.get_one::<u32>("width") {
        options = options.with_width(*width);
    }
    if matches.get_flag("include-empty-columns") {
        options = options.with_exclude_empty_columns(false);
    }
    options
}

fn read_input(matches: &ArgMatches) -> Result<(Dataset, String)> {
    let file = matches
        .get_one::<String>("file")
        .context("expected a dataset file argument")?;
    let dataset = load_dataset(file).with_context(|| format!("could not load dataset from {file}"))?;
    Ok((dataset, file.clone()))
}

fn table_for(dataset: Dataset, settings: &UserSettings, options: DataTableOptions) -> DataTable {
    let mut table = DataTable::new(settings.grid());
    table.set_input(Arc::new(dataset), options);
    table
}

fn layout_report(dataset: Dataset, settings: &UserSettings, options: DataTableOptions) -> Result<String> {
    let table = table_for(dataset, settings, options);
    serde_json::to_string_pretty(table.layout()).context("failed to serialize column layout")
}

fn sort_report(
    dataset: Dataset,
    settings: &UserSettings,
    options: DataTableOptions,
    column: usize,
    clicks: usize,
) -> Result<String> {
    let mut table = table_for(dataset, settings, options);
    if column >= table.headers().len() {
        anyhow::bail!("column {column} is out of range; the dataset has {} columns", table.headers().len());
    }
    for _ in 0..clicks {
        table.handle(TableEvent::HeaderClicked(column));
    }
    let state = table.sort_state();
    let report = json!({
        "order": table.display_order(),
        "sortedColumnIndex": state.sorted_column_index(),
        "sortOrder": state.order,
    });
    serde_json::to_string_pretty(&report).context("failed to serialize sort result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn dataset() -> Dataset {
        Dataset::from_json_value(json!({
            "headers": [
                {"id": "name", "value": "Name"},
                {"id": "age", "value": "Age"},
                {"id": "notes", "value": "Notes"}
            ],
            "rows": [
                {"name": "Bob", "age": 30},
                {"name": "Al", "age": 25},
                {"name": "", "age": ""}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["gallery", "sort", "data.json", "--column", "1", "--clicks", "2", "--width", "600"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = table_options(sub);
        assert_eq!(sub.get_one::<usize>("column"), Some(&1));
        assert_eq!(sub.get_one::<usize>("clicks"), Some(&2));
        assert_eq!(options.width, Some(600));
        assert_eq!(options.exclude_empty_columns, None);
    }

    #[test]
    fn sort_requires_a_column() {
        assert!(build_cli().try_get_matches_from(["gallery", "sort", "data.json"]).is_err());
    }

    #[test]
    fn layout_report_drops_empty_columns_unless_asked() {
        let settings = UserSettings::ephemeral();
        let report: Value = serde_json::from_str(&layout_report(dataset(), &settings, DataTableOptions::default()).unwrap()).unwrap();
        assert_eq!(report["widths"]["notes"], 0);
        assert_eq!(report["widths"]["name"], 100);
        assert_eq!(report["widths"]["age"], 880);
        assert_eq!(report["lastColumnStretched"], true);

        let options = DataTableOptions::default().with_exclude_empty_columns(false);
        let report: Value = serde_json::from_str(&layout_report(dataset(), &settings, options).unwrap()).unwrap();
        assert_eq!(report["widths"]["notes"], 780);
    }

    #[test]
    fn sort_report_follows_the_click_cycle() {
        let settings = UserSettings::ephemeral();
        let once: Value =
            serde_json::from_str(&sort_report(dataset(), &settings, DataTableOptions::default(), 0, 1).unwrap()).unwrap();
        assert_eq!(once["order"], json!([1, 0, 2]));
        assert_eq!(once["sortedColumnIndex"], 0);
        assert_eq!(once["sortOrder"], "ascending");

        let twice: Value =
            serde_json::from_str(&sort_report(dataset(), &settings, DataTableOptions::default(), 0, 2).unwrap()).unwrap();
        assert_eq!(twice["order"], json!([2, 0, 1]));

        let thrice: Value =
            serde_json::from_str(&sort_report(dataset(), &settings, DataTableOptions::default(), 0, 3).unwrap()).unwrap();
        assert_eq!(thrice["order"], json!([0, 1, 2]));
        assert_eq!(thrice["sortOrder"], "original");
    }

    #[test]
    fn sort_report_rejects_unknown_columns() {
        let settings = UserSettings::ephemeral();
        let err = sort_report(dataset(), &settings, DataTableOptions::default(), 7, 1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
