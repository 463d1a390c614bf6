use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CellValue, DatasetError};

/// JSON key carrying the row-level image flag.
pub const IMAGE_FLAG_KEY: &str = "isImg";

/// A semi-structured record keyed by field id.
///
/// Rows are opaque to the grid except through the keys declared by headers.
/// Field order is preserved so derived headers follow first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Row {
    fields: IndexMap<String, CellValue>,
    is_img: bool,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Marks every cell of this row as an image.
    pub fn with_image_flag(mut self, is_img: bool) -> Self {
        self.is_img = is_img;
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    pub fn is_img(&self) -> bool {
        self.is_img
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Decodes a row from a JSON object.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut row = Row::new();
        for (key, value) in object {
            if key == IMAGE_FLAG_KEY
                && let Value::Bool(flag) = value
            {
                row.is_img = *flag;
                continue;
            }
            if let Some(cell) = CellValue::from_json(value) {
                row.fields.insert(key.clone(), cell);
            }
        }
        row
    }

    pub fn to_json(&self) -> Value {
        let mut object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        if self.is_img {
            object.insert(IMAGE_FLAG_KEY.to_string(), Value::Bool(true));
        }
        Value::Object(object)
    }
}

impl TryFrom<Value> for Row {
    type Error = DatasetError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Ok(Row::from_json_object(&object)),
            other => Err(DatasetError::RowShape {
                found: json_kind(&other),
            }),
        }
    }
}

impl From<Row> for Value {
    fn from(row: Row) -> Self {
        row.to_json()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
