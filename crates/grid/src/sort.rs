//! Three-phase header sort: original → ascending → descending → original.
//!
//! The engine never touches row data. It works on a permutation of source row
//! indices and always sorts from the original order, so ties keep their
//! source position and three clicks on one column restore the input exactly.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::trace;

use crate::cell::RenderableCell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Original = 0,
    Ascending = 1,
    Descending = 2,
}

impl SortOrder {
    /// Successor in the click cycle.
    pub fn next(self) -> Self {
        match self {
            SortOrder::Original => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Original,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub sorted_column: Option<usize>,
    pub order: SortOrder,
}

impl SortState {
    /// Sorted column as a signed index, `-1` when nothing has been clicked.
    pub fn sorted_column_index(&self) -> i64 {
        self.sorted_column
            .and_then(|column| i64::try_from(column).ok())
            .unwrap_or(-1)
    }

    /// Order that applies to `column`; other columns are always unsorted.
    pub fn order_for(&self, column: usize) -> SortOrder {
        if self.sorted_column == Some(column) {
            self.order
        } else {
            SortOrder::Original
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub order: Vec<usize>,
    pub state: SortState,
}

/// Applies one header click on `column`.
///
/// `current_order` is the display order produced by the previous outcome;
/// `value_at(source_index, column)` supplies the cell to compare.
pub fn advance<F>(
    column: usize,
    original_len: usize,
    current_order: &[usize],
    state: SortState,
    mut value_at: F,
) -> SortOutcome
where
    F: FnMut(usize, usize) -> RenderableCell,
{
    let next = state.order_for(column).next();
    let order = match next {
        SortOrder::Ascending => {
            let keys: Vec<RenderableCell> = (0..original_len).map(|row| value_at(row, column)).collect();
            let mut order: Vec<usize> = (0..original_len).collect();
            order.sort_by(|a, b| compare_cells(&keys[*a], &keys[*b]));
            order
        }
        SortOrder::Descending => current_order.iter().rev().copied().collect(),
        SortOrder::Original => (0..original_len).collect(),
    };
    let state = SortState {
        sorted_column: Some(column),
        order: next,
    };
    trace!(column, order = ?state.order, rows = original_len, "sort advanced");
    SortOutcome { order, state }
}

/// Only empty text and images sink. `Number(0.0)` and a `false` rendered as
/// text are real values and stay in the sorted range (see DESIGN.md,
/// "Number zero").
fn sinks_to_end(cell: &RenderableCell) -> bool {
    match cell {
        RenderableCell::Text(text) => text.is_empty(),
        RenderableCell::Images(_) => true,
        RenderableCell::Number(_) => false,
    }
}

/// Ascending comparator for resolved cells.
///
/// Empty text and image cells sort after everything else and tie with each
/// other. Numbers sort before text: numbers compare numerically, text
/// compares with [`locale_compare`]. Ranking the kinds keeps the order total
/// for columns that mix numbers and numeric strings.
pub fn compare_cells(a: &RenderableCell, b: &RenderableCell) -> Ordering {
    match (sinks_to_end(a), sinks_to_end(b)) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    match (a, b) {
        (RenderableCell::Number(left), RenderableCell::Number(right)) => left.total_cmp(right),
        (RenderableCell::Number(_), _) => Ordering::Less,
        (_, RenderableCell::Number(_)) => Ordering::Greater,
        _ => locale_compare(&a.display_text(""), &b.display_text("")),
    }
}

/// Case-insensitive comparison with lowercase ordered before uppercase when
/// the letters otherwise match.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<RenderableCell> {
        ["Bob", "Al", ""]
            .into_iter()
            .map(|name| RenderableCell::Text(name.to_string()))
            .collect()
    }

    fn click(cells: &[RenderableCell], column: usize, current: &[usize], state: SortState) -> SortOutcome {
        advance(column, cells.len(), current, state, |row, _| cells[row].clone())
    }

    #[test]
    fn cycles_through_three_phases() {
        let cells = names();
        let identity: Vec<usize> = (0..cells.len()).collect();

        let first = click(&cells, 0, &identity, SortState::default());
        assert_eq!(first.order, vec![1, 0, 2]);
        assert_eq!(first.state.order, SortOrder::Ascending);

        let second = click(&cells, 0, &first.order, first.state);
        assert_eq!(second.order, vec![2, 0, 1]);
        assert_eq!(second.state.order, SortOrder::Descending);

        let third = click(&cells, 0, &second.order, second.state);
        assert_eq!(third.order, identity);
        assert_eq!(third.state, SortState { sorted_column: Some(0), order: SortOrder::Original });

        let fourth = click(&cells, 0, &third.order, third.state);
        assert_eq!(fourth, first);
    }

    #[test]
    fn switching_columns_restarts_at_ascending() {
        let cells = names();
        let descending = SortState {
            sorted_column: Some(0),
            order: SortOrder::Descending,
        };

        let outcome = click(&cells, 1, &[2, 0, 1], descending);

        assert_eq!(outcome.state, SortState { sorted_column: Some(1), order: SortOrder::Ascending });
        assert_eq!(outcome.order, vec![1, 0, 2]);
    }

    #[test]
    fn ties_keep_source_order() {
        let cells: Vec<RenderableCell> = ["b", "a", "b", "a"]
            .into_iter()
            .map(|value| RenderableCell::Text(value.into()))
            .collect();
        let outcome = click(&cells, 0, &[0, 1, 2, 3], SortState::default());
        assert_eq!(outcome.order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn numbers_compare_numerically_and_zero_is_not_empty() {
        let cells = vec![
            RenderableCell::Number(10.0),
            RenderableCell::Number(9.0),
            RenderableCell::Number(0.0),
            RenderableCell::empty(),
        ];
        let outcome = click(&cells, 0, &[0, 1, 2, 3], SortState::default());
        assert_eq!(outcome.order, vec![2, 1, 0, 3]);
    }

    #[test]
    fn mixed_numbers_and_numeric_text_sort_totally() {
        let cells: Vec<RenderableCell> = (0..2000)
            .map(|i| {
                let value = (i * 7919) % 1000;
                if i % 2 == 0 {
                    RenderableCell::Number(f64::from(value))
                } else {
                    RenderableCell::Text(value.to_string())
                }
            })
            .collect();
        let identity: Vec<usize> = (0..cells.len()).collect();

        let outcome = click(&cells, 0, &identity, SortState::default());

        assert_eq!(outcome.order.len(), cells.len());
        for pair in outcome.order.windows(2) {
            assert_ne!(compare_cells(&cells[pair[0]], &cells[pair[1]]), Ordering::Greater);
        }
        assert!(matches!(cells[outcome.order[999]], RenderableCell::Number(_)));
        assert!(matches!(cells[outcome.order[1000]], RenderableCell::Text(_)));
        assert_eq!(compare_cells(&RenderableCell::Number(10.0), &RenderableCell::Text("5".into())), Ordering::Less);
        assert_eq!(compare_cells(&RenderableCell::Text("5".into()), &RenderableCell::Number(9.0)), Ordering::Greater);
    }

    #[test]
    fn images_sort_after_text() {
        let a = RenderableCell::Images(vec![crate::cell::ImageToken::new("a.png")]);
        let b = RenderableCell::Text("zed".into());
        assert_eq!(compare_cells(&a, &b), Ordering::Greater);
        assert_eq!(compare_cells(&a, &RenderableCell::empty()), Ordering::Equal);
    }

    #[test]
    fn locale_comparison_ignores_case_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Zed", "zed"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn sorted_column_index_is_negative_when_unset() {
        assert_eq!(SortState::default().sorted_column_index(), -1);
    }
}
