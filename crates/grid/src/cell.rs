use std::borrow::Cow;

use gallery_types::{CellValue, Header, Row, Scalar};
use serde::Serialize;

/// A reference to an image the renderer should display in place of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageToken {
    /// Image URL.
    pub key: String,
    pub alt: String,
}

impl ImageToken {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            key: url.into(),
            alt: String::new(),
        }
    }
}

/// Displayable content of a single grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderableCell {
    Text(String),
    Number(f64),
    Images(Vec<ImageToken>),
}

impl RenderableCell {
    pub fn empty() -> Self {
        RenderableCell::Text(String::new())
    }

    pub fn is_image(&self) -> bool {
        matches!(self, RenderableCell::Images(_))
    }

    /// Plain text form; images collapse to their URLs.
    pub fn display_text(&self, separator: &str) -> Cow<'_, str> {
        match self {
            RenderableCell::Text(text) => Cow::Borrowed(text.as_str()),
            RenderableCell::Number(number) => Cow::Owned(Scalar::Number(*number).display().into_owned()),
            RenderableCell::Images(tokens) => Cow::Owned(
                tokens
                    .iter()
                    .map(|token| token.key.as_str())
                    .collect::<Vec<_>>()
                    .join(separator),
            ),
        }
    }
}

fn image_token(scalar: &Scalar) -> ImageToken {
    ImageToken::new(scalar.display().into_owned())
}

/// Resolves the cell of `row` under `header` into renderable content.
///
/// Image columns (either flag) produce one token per value; multi-valued text
/// is joined with `separator`. Absent keys resolve to empty text.
pub fn resolve(row: &Row, header: &Header, row_is_img: bool, separator: &str) -> RenderableCell {
    let is_img = row_is_img || header.is_img;
    let Some(value) = row.get(&header.id) else {
        return RenderableCell::empty();
    };
    match (value, is_img) {
        (CellValue::Multi(values), true) => RenderableCell::Images(values.iter().map(image_token).collect()),
        (CellValue::Multi(_), false) => RenderableCell::Text(value.joined(separator)),
        (CellValue::Scalar(scalar), true) => RenderableCell::Images(vec![image_token(scalar)]),
        (CellValue::Scalar(Scalar::Number(number)), false) => RenderableCell::Number(*number),
        (CellValue::Scalar(scalar), false) => RenderableCell::Text(scalar.display().into_owned()),
    }
}
