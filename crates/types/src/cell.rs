use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// A single displayable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    /// Display form of the value. Integral numbers print without a fraction.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(text) => Cow::Borrowed(text.as_str()),
            Scalar::Number(number) => Cow::Owned(number.to_string()),
            Scalar::Bool(flag) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(text) if text.is_empty())
    }

    /// Converts a JSON leaf into a scalar. `null` has no scalar form; nested
    /// containers are kept as compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Scalar::Bool(*flag)),
            Value::Number(number) => Some(number_from_json(number)),
            Value::String(text) => Some(Scalar::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Some(Scalar::Text(value.to_string())),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Text(text) => Value::String(text.clone()),
            Scalar::Number(number) if is_exact_integer(*number) => Value::from(*number as i64),
            Scalar::Number(number) => serde_json::Number::from_f64(*number)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Bool(flag) => Value::Bool(*flag),
        }
    }
}

/// Largest integer magnitude an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn is_exact_integer(number: f64) -> bool {
    number.fract() == 0.0 && number.abs() <= MAX_EXACT_INTEGER
}

/// Integers beyond 2^53 keep their exact digits as text instead of rounding.
fn number_from_json(number: &serde_json::Number) -> Scalar {
    let exact = number
        .as_i64()
        .map(|int| int.unsigned_abs())
        .or_else(|| number.as_u64())
        .is_none_or(|magnitude| magnitude <= MAX_EXACT_INTEGER as u64);
    match number.as_f64() {
        Some(value) if exact => Scalar::Number(value),
        _ => Scalar::Text(number.to_string()),
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        number_from_json(&value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// The raw content stored under a field key of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Scalar(Scalar),
    /// A multi-valued property, kept in its original order.
    Multi(Vec<Scalar>),
}

impl CellValue {
    /// Joins the value into a single display string.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            CellValue::Scalar(scalar) => scalar.display().into_owned(),
            CellValue::Multi(values) => values
                .iter()
                .map(|value| value.display())
                .collect::<Vec<_>>()
                .join(separator),
        }
    }

    /// True when the joined display string is empty: no elements, or a
    /// single empty element. Two empty elements still render the separator.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Scalar(scalar) => scalar.is_empty(),
            CellValue::Multi(values) => match values.as_slice() {
                [] => true,
                [only] => only.is_empty(),
                _ => false,
            },
        }
    }

    /// Iterates the scalar elements; a single scalar yields itself.
    pub fn scalars(&self) -> impl Iterator<Item = &Scalar> {
        match self {
            CellValue::Scalar(scalar) => std::slice::from_ref(scalar).iter(),
            CellValue::Multi(values) => values.iter(),
        }
    }

    /// Converts a JSON field value. Returns `None` for `null`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(CellValue::Multi(items.iter().filter_map(Scalar::from_json).collect())),
            other => Scalar::from_json(other).map(CellValue::Scalar),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Scalar(scalar) => scalar.to_json(),
            CellValue::Multi(values) => Value::Array(values.iter().map(Scalar::to_json).collect()),
        }
    }
}

impl From<Scalar> for CellValue {
    fn from(value: Scalar) -> Self {
        CellValue::Scalar(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Scalar(value.into())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Scalar(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Scalar(value.into())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Scalar(value.into())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Scalar(value.into())
    }
}

impl<T: Into<Scalar>> FromIterator<T> for CellValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        CellValue::Multi(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Scalar::Number(30.0).display(), "30");
        assert_eq!(Scalar::Number(2.5).display(), "2.5");
        assert_eq!(Scalar::Bool(true).display(), "true");
    }

    #[test]
    fn multi_values_join_in_order() {
        let value: CellValue = ["a", "b", "c"].into_iter().collect();
        assert_eq!(value.joined(" ; "), "a ; b ; c");
    }

    #[test]
    fn emptiness_covers_empty_text_and_empty_sequences() {
        assert!(CellValue::from("").is_empty());
        assert!(CellValue::Multi(vec![]).is_empty());
        assert!(CellValue::Multi(vec![Scalar::from("")]).is_empty());
        assert!(!CellValue::Multi(vec![Scalar::from(""), Scalar::from("")]).is_empty());
        assert!(!CellValue::from(0_i64).is_empty());
    }

    #[test]
    fn integers_keep_their_json_form() {
        assert_eq!(Scalar::from(42_i64).to_json(), json!(42));
        assert_eq!(Scalar::Number(-3.0).to_json(), json!(-3));
        assert_eq!(Scalar::Number(2.5).to_json(), json!(2.5));
        assert_eq!(Scalar::from_json(&json!(7)), Some(Scalar::Number(7.0)));
    }

    #[test]
    fn integers_beyond_f64_precision_keep_exact_digits() {
        let big: Value = serde_json::from_str("9007199254740993").unwrap();
        let scalar = Scalar::from_json(&big).unwrap();
        assert_eq!(scalar, Scalar::Text("9007199254740993".into()));
        assert_eq!(scalar.display(), "9007199254740993");
        assert_eq!(Scalar::from(-9_007_199_254_740_993_i64).display(), "-9007199254740993");
        assert_eq!(Scalar::from(i64::MAX).to_json(), json!("9223372036854775807"));

        let edge: Value = serde_json::from_str("9007199254740992").unwrap();
        assert_eq!(Scalar::from_json(&edge), Some(Scalar::Number(9_007_199_254_740_992.0)));
        assert_eq!(Scalar::Number(9_007_199_254_740_992.0).to_json(), edge);
    }

    #[test]
    fn json_nulls_are_dropped() {
        assert_eq!(CellValue::from_json(&json!(null)), None);
        assert_eq!(
            CellValue::from_json(&json!(["x", null, 2])),
            Some(CellValue::Multi(vec![Scalar::from("x"), Scalar::Number(2.0)]))
        );
        assert_eq!(
            CellValue::from_json(&json!({"k": 1})),
            Some(CellValue::Scalar(Scalar::Text("{\"k\":1}".into())))
        );
    }
}
