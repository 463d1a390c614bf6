use serde::{Deserialize, Serialize};

/// A column declaration.
///
/// `id` is the field key used to look up cell values in a [`crate::Row`];
/// `value` is the label shown in the header row. Header order defines column
/// order and is never changed by the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    pub id: String,
    pub value: String,
    /// Marks every cell in this column as an image URL.
    #[serde(rename = "isImg", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_img: bool,
}

impl Header {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            is_img: false,
        }
    }

    /// Builds a header whose cells render as images.
    pub fn image(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            is_img: true,
            ..Self::new(id, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Header;
    use serde_json::json;

    #[test]
    fn image_flag_defaults_to_false() {
        let header: Header = serde_json::from_value(json!({"id": "name", "value": "Name"})).unwrap();
        assert_eq!(header, Header::new("name", "Name"));

        let image: Header = serde_json::from_value(json!({"id": "pic", "value": "Picture", "isImg": true})).unwrap();
        assert!(image.is_img);
    }

    #[test]
    fn image_flag_is_omitted_when_false() {
        let value = serde_json::to_value(Header::new("age", "Age")).unwrap();
        assert_eq!(value, json!({"id": "age", "value": "Age"}));
    }
}
