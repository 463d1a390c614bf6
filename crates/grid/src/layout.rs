//! Column width estimation.
//!
//! Widths are inferred from the data before any layout happens: the longest
//! rendered value of each column (or its label, if longer) is converted to
//! pixels, clamped, and the last non-empty column absorbs whatever space is
//! left over so the grid fills its nominal width.

use gallery_types::{Header, Row};
use indexmap::IndexMap;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::config::GridConfig;

/// Derived per-column pixel widths, keyed by header id in header order.
///
/// A width of `0` marks an empty column that is never rendered or targeted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    pub widths: IndexMap<String, u32>,
    pub last_column_stretched: bool,
}

impl ColumnLayout {
    pub fn width_of(&self, id: &str) -> u32 {
        self.widths.get(id).copied().unwrap_or(0)
    }

    /// Width of the column at `index` in header order.
    pub fn width_at(&self, index: usize) -> u32 {
        self.widths.get_index(index).map(|(_, width)| *width).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    /// Number of columns with a non-zero width.
    pub fn visible_column_count(&self) -> usize {
        self.widths.values().filter(|width| **width > 0).count()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.width_at(index) > 0
    }

    pub fn total_width(&self) -> u64 {
        self.widths.values().map(|width| u64::from(*width)).sum()
    }

    pub fn widths_in_order(&self) -> Vec<u32> {
        self.widths.values().copied().collect()
    }
}

struct ColumnScan {
    max_chars: usize,
    is_empty: bool,
}

fn scan_column(header: &Header, rows: &[Row], separator: &str) -> ColumnScan {
    let mut scan = ColumnScan {
        max_chars: 0,
        is_empty: true,
    };
    for row in rows {
        let Some(value) = row.get(&header.id) else {
            continue;
        };
        // Image cells render as thumbnails, not text: any URL makes them non-empty.
        if header.is_img || row.is_img() {
            if value.scalars().any(|url| !url.is_empty()) {
                scan.is_empty = false;
            }
            continue;
        }
        if value.is_empty() {
            continue;
        }
        scan.is_empty = false;
        scan.max_chars = scan.max_chars.max(value.joined(separator).width());
    }
    scan
}

/// Computes the [`ColumnLayout`] for `headers` over `rows` at `total_width`
/// pixels.
pub fn estimate(headers: &[Header], rows: &[Row], total_width: u32, config: &GridConfig) -> ColumnLayout {
    let mut widths = IndexMap::with_capacity(headers.len());
    let mut last_non_empty: Option<usize> = None;

    for (index, header) in headers.iter().enumerate() {
        let scan = scan_column(header, rows, &config.multi_value_separator);
        if scan.is_empty && config.exclude_empty_columns {
            widths.insert(header.id.clone(), 0);
            continue;
        }
        let chars = scan.max_chars.max(header.value.width());
        let px = u32::try_from(chars)
            .unwrap_or(u32::MAX)
            .saturating_mul(config.px_per_char);
        let clamped = px.max(config.column_min_width).min(config.column_max_width);
        widths.insert(header.id.clone(), clamped);
        last_non_empty = Some(index);
    }

    let used: u64 = widths.values().map(|width| u64::from(*width)).sum();
    let shortfall = u64::from(total_width).saturating_sub(used);
    let mut last_column_stretched = false;
    if shortfall > 0
        && let Some(index) = last_non_empty
        && let Some((_, width)) = widths.get_index_mut(index)
    {
        // used < total_width, so the sum fits in u32.
        *width = width.saturating_add(u32::try_from(shortfall).unwrap_or(u32::MAX));
        last_column_stretched = true;
    }

    ColumnLayout {
        widths,
        last_column_stretched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_types::CellValue;

    fn headers() -> Vec<Header> {
        vec![Header::new("name", "Name"), Header::new("age", "Age")]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("name", "Bob").with("age", "30"),
            Row::new().with("name", "Al").with("age", "25"),
            Row::new().with("name", "").with("age", ""),
        ]
    }

    #[test]
    fn short_columns_clamp_to_minimum_and_last_one_stretches() {
        let layout = estimate(&headers(), &rows(), 980, &GridConfig::default());

        assert_eq!(layout.width_of("name"), 100);
        assert_eq!(layout.width_of("age"), 880);
        assert!(layout.last_column_stretched);
        assert_eq!(layout.total_width(), 980);
    }

    #[test]
    fn long_values_clamp_to_maximum_without_stretch() {
        let long = "x".repeat(80);
        let headers = vec![Header::new("a", "A"), Header::new("b", "B"), Header::new("c", "C")];
        let rows = vec![Row::new().with("a", long.as_str()).with("b", long.as_str()).with("c", long.as_str())];

        let layout = estimate(&headers, &rows, 980, &GridConfig::default());

        assert_eq!(layout.widths_in_order(), vec![400, 400, 400]);
        assert!(!layout.last_column_stretched);
    }

    #[test]
    fn label_longer_than_values_drives_width() {
        let headers = vec![Header::new("n", "A fairly long column label"), Header::new("x", "X")];
        let rows = vec![Row::new().with("n", "1").with("x", "y")];

        let layout = estimate(&headers, &rows, 0, &GridConfig::default());

        assert_eq!(layout.width_of("n"), 26 * 12);
        assert_eq!(layout.width_of("x"), 100);
    }

    #[test]
    fn empty_columns_are_zero_and_skipped_by_stretch() {
        let headers = vec![Header::new("name", "Name"), Header::new("notes", "Notes")];
        let rows = vec![Row::new().with("name", "Bob").with("notes", ""), Row::new().with("name", "Al")];

        let layout = estimate(&headers, &rows, 980, &GridConfig::default());

        assert_eq!(layout.width_of("notes"), 0);
        assert_eq!(layout.width_of("name"), 980);
        assert_eq!(layout.visible_column_count(), 1);
    }

    #[test]
    fn empty_columns_are_sized_when_exclusion_is_off() {
        let config = GridConfig {
            exclude_empty_columns: false,
            ..GridConfig::default()
        };
        let headers = vec![Header::new("name", "Name"), Header::new("notes", "Notes")];
        let rows = vec![Row::new().with("name", "Bob")];

        let layout = estimate(&headers, &rows, 0, &config);

        assert_eq!(layout.width_of("notes"), 100);
    }

    #[test]
    fn multi_values_are_measured_joined() {
        let headers = vec![Header::new("tags", "T")];
        let value: CellValue = ["abcdefghij", "abcdefghij"].into_iter().collect();
        let rows = vec![Row::new().with("tags", value)];

        let layout = estimate(&headers, &rows, 0, &GridConfig::default());

        // 10 + 3 + 10 characters.
        assert_eq!(layout.width_of("tags"), 23 * 12);
    }

    #[test]
    fn image_cells_count_as_content_but_not_width() {
        let headers = vec![Header::image("pic", "Pic"), Header::new("name", "Name")];
        let rows = vec![Row::new().with("pic", "https://example.org/a-very-long-image-url.png").with("name", "Ada")];

        let layout = estimate(&headers, &rows, 0, &GridConfig::default());

        assert_eq!(layout.width_of("pic"), 100);
    }

    #[test]
    fn separator_only_multi_values_keep_their_column() {
        let headers = vec![Header::new("tags", "T"), Header::new("name", "Name")];
        let blank: CellValue = ["", ""].into_iter().collect();
        let rows = vec![Row::new().with("tags", blank).with("name", "Ada")];

        let layout = estimate(&headers, &rows, 0, &GridConfig::default());

        assert_eq!(layout.width_of("tags"), 100);
        assert!(layout.is_visible(0));
        assert_eq!(layout.visible_column_count(), 2);
    }

    #[test]
    fn image_columns_of_blank_urls_stay_empty() {
        let headers = vec![Header::image("pic", "Pic"), Header::new("name", "Name")];
        let blank: CellValue = ["", ""].into_iter().collect();
        let rows = vec![Row::new().with("pic", blank).with("name", "Ada")];

        let layout = estimate(&headers, &rows, 0, &GridConfig::default());

        assert_eq!(layout.width_of("pic"), 0);
        assert!(!layout.is_visible(0));
    }

    #[test]
    fn image_rows_count_as_content_but_not_width() {
        let headers = vec![Header::new("name", "Name"), Header::new("bio", "Bio")];
        let rows = vec![
            Row::new()
                .with("name", "https://example.org/a-very-long-portrait-url.png")
                .with_image_flag(true),
            Row::new().with("bio", "x"),
        ];

        let layout = estimate(&headers, &rows, 0, &GridConfig::default());

        assert_eq!(layout.width_of("name"), 100);
        assert_eq!(layout.visible_column_count(), 2);
    }

    #[test]
    fn estimate_is_deterministic() {
        let config = GridConfig::default();
        assert_eq!(estimate(&headers(), &rows(), 640, &config), estimate(&headers(), &rows(), 640, &config));
    }

    #[test]
    fn serializes_with_camel_case_flag() {
        let layout = estimate(&headers(), &rows(), 980, &GridConfig::default());
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value, serde_json::json!({"widths": {"name": 100, "age": 880}, "lastColumnStretched": true}));
    }
}
