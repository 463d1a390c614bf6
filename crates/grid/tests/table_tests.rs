use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use gallery_grid::{
    DataTable, DataTableOptions, GridConfig, ImageToken, RenderableCell, SortOrder, SortState, TableEffect,
    TableEvent, estimate,
};
use gallery_types::{Dataset, Header, Row};

const GIVEN: usize = 0;
const SUBJECT: usize = 3;
const MUGSHOT: usize = 4;
const NOTES: usize = 5;

fn subjects() -> Arc<Dataset> {
    let input = include_str!("data/subjects.json");
    Arc::new(Dataset::from_json_str(input).expect("decode subjects fixture"))
}

fn table_with(dataset: Arc<Dataset>) -> DataTable {
    let mut table = DataTable::new(GridConfig::default());
    table.set_input(dataset, DataTableOptions::default());
    table
}

fn column_text(table: &DataTable, column: usize) -> Vec<String> {
    (0..table.row_count())
        .map(|index| table.cell(index, column).display_text(" ; ").into_owned())
        .collect()
}

#[test]
fn layout_sizes_fixture_columns() {
    let table = table_with(subjects());
    let layout = table.layout();

    assert_eq!(layout.width_of("nc.PersonGivenName"), 120);
    assert_eq!(layout.width_of("nc.PersonSurName"), 108);
    assert_eq!(layout.width_of("nc.PersonNickName"), 26 * 12);
    assert_eq!(layout.width_of("nc.SubjectIdentification"), 120);
    assert_eq!(layout.width_of("publicsafety.mugshot"), 100 + 220);
    assert_eq!(layout.width_of("im.PersonNotes"), 0);
    assert!(layout.last_column_stretched);
    assert_eq!(layout.total_width(), 980);
    assert_eq!(layout.visible_column_count(), 5);
}

#[test]
fn non_stretched_columns_stay_within_bounds() {
    let dataset = subjects();
    let config = GridConfig::default();
    for width in [0, 400, 980, 1600, 4000] {
        let layout = estimate(&dataset.headers, &dataset.rows, width, &config);
        let widths = layout.widths_in_order();
        let last_visible = widths.iter().rposition(|width| *width > 0);
        for (index, value) in widths.iter().enumerate() {
            if *value == 0 || (layout.last_column_stretched && Some(index) == last_visible) {
                continue;
            }
            assert!((100..=400).contains(value), "column {index} width {value} at total {width}");
        }
        if layout.last_column_stretched {
            assert_eq!(layout.total_width(), u64::from(width));
        }
        assert_eq!(layout, estimate(&dataset.headers, &dataset.rows, width, &config));
    }
}

#[test]
fn numeric_column_sorts_numerically_and_descending_reverses() {
    let mut table = table_with(subjects());

    table.handle(TableEvent::HeaderClicked(SUBJECT));
    assert_eq!(table.display_order(), &[3, 2, 0, 1]);
    let ascending = table.display_order().to_vec();

    table.handle(TableEvent::HeaderClicked(SUBJECT));
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(table.display_order(), reversed.as_slice());
    assert_eq!(table.header_sort_indicator(SUBJECT), Some(SortOrder::Descending));
}

#[test]
fn three_clicks_restore_and_fourth_repeats_first() {
    let mut table = table_with(subjects());
    let original = table.display_order().to_vec();

    table.handle(TableEvent::HeaderClicked(GIVEN));
    let first = table.display_order().to_vec();
    assert_eq!(column_text(&table, GIVEN), vec!["Ada", "Alan", "grace", "Margaret"]);

    table.handle(TableEvent::HeaderClicked(GIVEN));
    table.handle(TableEvent::HeaderClicked(GIVEN));
    assert_eq!(table.display_order(), original.as_slice());
    assert_eq!(
        table.sort_state(),
        SortState {
            sorted_column: Some(GIVEN),
            order: SortOrder::Original
        }
    );

    table.handle(TableEvent::HeaderClicked(GIVEN));
    assert_eq!(table.display_order(), first.as_slice());
}

#[test]
fn switching_column_from_descending_starts_ascending() {
    let mut table = table_with(subjects());
    table.handle(TableEvent::HeaderClicked(SUBJECT));
    table.handle(TableEvent::HeaderClicked(SUBJECT));

    table.handle(TableEvent::HeaderClicked(GIVEN));

    assert_eq!(table.sort_state().order, SortOrder::Ascending);
    assert_eq!(table.sort_state().sorted_column, Some(GIVEN));
    assert_eq!(column_text(&table, GIVEN), vec!["Ada", "Alan", "grace", "Margaret"]);
    assert_eq!(table.header_sort_indicator(SUBJECT), None);
}

#[test]
fn image_column_sort_keeps_source_order() {
    let mut table = table_with(subjects());
    table.handle(TableEvent::HeaderClicked(MUGSHOT));
    assert_eq!(table.display_order(), &[0, 1, 2, 3]);

    assert_eq!(
        table.cell(1, MUGSHOT),
        RenderableCell::Images(vec![
            ImageToken::new("https://images.example.com/1002-a.png"),
            ImageToken::new("https://images.example.com/1002-b.png"),
        ])
    );
}

#[test]
fn empty_column_is_not_sortable_or_painted() {
    let mut table = table_with(subjects());

    assert!(table.handle(TableEvent::HeaderClicked(NOTES)).is_empty());
    let frame = table.paint(980);
    assert!(frame.header.iter().all(|slot| slot.column != NOTES));
    assert!(frame.body.iter().all(|slot| slot.column != NOTES));
}

#[test]
fn row_click_follows_sorted_display_order() {
    let seen: Rc<RefCell<Vec<(usize, Row)>>> = Rc::default();
    let sink = seen.clone();
    let mut table = DataTable::new(GridConfig::default());
    table.set_input(
        subjects(),
        DataTableOptions::default().on_row_click(move |index, row| sink.borrow_mut().push((index, row.clone()))),
    );
    table.handle(TableEvent::HeaderClicked(SUBJECT));

    for display_index in 0..table.row_count() {
        let effects = table.handle(TableEvent::BodyClicked { display_index });
        let source_index = table.display_order()[display_index];
        assert_eq!(effects, vec![TableEffect::RowClicked { display_index, source_index }]);
    }

    let seen = seen.borrow();
    for (display_index, row) in seen.iter() {
        assert_eq!(Some(row), table.display_row(*display_index));
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn example_scenario_cycles_names() {
    let dataset = Arc::new(Dataset::new(
        vec![Header::new("name", "Name"), Header::new("age", "Age")],
        vec![
            Row::new().with("name", "Bob").with("age", "30"),
            Row::new().with("name", "Al").with("age", "25"),
            Row::new().with("name", "").with("age", ""),
        ],
    ));
    let mut table = table_with(dataset);

    table.handle(TableEvent::HeaderClicked(0));
    assert_eq!(column_text(&table, 0), vec!["Al", "Bob", ""]);
    table.handle(TableEvent::HeaderClicked(0));
    assert_eq!(column_text(&table, 0), vec!["", "Bob", "Al"]);
    table.handle(TableEvent::HeaderClicked(0));
    assert_eq!(column_text(&table, 0), vec!["Bob", "Al", ""]);
}

#[test]
fn scrolling_moves_header_and_body_together() {
    let mut table = DataTable::new(GridConfig::default());
    table.set_input(subjects(), DataTableOptions::default().with_width(400));
    table.paint(400);

    let effects = table.handle(TableEvent::Scrolled { left: 200, top: 0 });
    assert_eq!(effects, vec![TableEffect::Repaint]);

    let frame = table.paint(400);
    assert_eq!(frame.scroll_left, 200);
    let header: Vec<usize> = frame.header.iter().map(|slot| slot.column).collect();
    let body: Vec<usize> = frame.row_slots(0).map(|slot| slot.column).collect();
    assert_eq!(header, body);

    assert!(table.handle(TableEvent::HeaderScrolled { left: 200 }).is_empty());
}
