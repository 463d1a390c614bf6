use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::row::json_kind;
use crate::{Header, IMAGE_FLAG_KEY, Row};

/// Error surfaced when decoding a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row must be a JSON object, found {found}")]
    RowShape { found: &'static str },

    #[error("dataset must be a JSON object or array of rows, found {found}")]
    DatasetShape { found: &'static str },

    #[error("duplicate header id: {id}")]
    DuplicateHeader { id: String },
}

/// Headers and rows supplied to the grid as a single immutable input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub headers: Vec<Header>,
    pub rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    headers: Option<Vec<Header>>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<Header>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Builds a dataset whose headers are the union of row keys in first-seen
    /// order, labelled with the key itself.
    pub fn with_derived_headers(rows: Vec<Row>) -> Self {
        let headers = derive_headers(&rows);
        Self { headers, rows }
    }

    /// Decodes `{ "headers": [...], "rows": [...] }` or a bare array of rows.
    pub fn from_json_value(value: Value) -> Result<Self, DatasetError> {
        let dataset = match value {
            Value::Array(_) => {
                let rows: Vec<Row> = serde_json::from_value(value)?;
                Self::with_derived_headers(rows)
            }
            Value::Object(_) => {
                let raw: RawDataset = serde_json::from_value(value)?;
                match raw.headers {
                    Some(headers) => Self::new(headers, raw.rows),
                    None => Self::with_derived_headers(raw.rows),
                }
            }
            other => {
                return Err(DatasetError::DatasetShape {
                    found: json_kind(&other),
                });
            }
        };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_json_str(input: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Rejects duplicate header ids; column widths are keyed by id.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = HashSet::with_capacity(self.headers.len());
        for header in &self.headers {
            if !seen.insert(header.id.as_str()) {
                return Err(DatasetError::DuplicateHeader { id: header.id.clone() });
            }
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self, column: usize) -> Option<&Header> {
        self.headers.get(column)
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

fn derive_headers(rows: &[Row]) -> Vec<Header> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut headers = Vec::new();
    for row in rows {
        for key in row.keys() {
            if key != IMAGE_FLAG_KEY && seen.insert(key) {
                headers.push(Header::new(key, key));
            }
        }
    }
    headers
}
