//! Lenient monetary amount handling.
//!
//! Backend rows carry amounts as numeric strings, plain numbers or nulls. The
//! engines only ever see a total `f64`: anything that is not a finite number
//! counts as zero. The same leniency covers the text fields of a row, so one
//! `null` or numeric id never rejects a whole batch.

use serde::{de::Deserializer, Deserialize};

/// Parses a raw amount, returning `0.0` for blank, malformed or non-finite input.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            RawScalar::Integer(number) => number.to_string(),
            RawScalar::Number(number) => number.to_string(),
            RawScalar::Text(text) => text,
        }
    }
}

/// Deserializes a string, number or null into the raw string form.
pub fn deserialize_raw<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(value.map(RawScalar::into_text).unwrap_or_default())
}

/// Deserializes an optional identifier given as a string or an integer.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(value.map(RawScalar::into_text))
}

/// Deserializes a string, number or null into a parsed value.
pub fn deserialize_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(RawScalar::Integer(number)) => number as f64,
        Some(RawScalar::Number(number)) if number.is_finite() => number,
        Some(RawScalar::Text(text)) => parse_amount(&text),
        _ => 0.0,
    })
}

/// Sums parsed amounts.
pub fn sum<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().fold(0.0, |acc, value| acc + value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_amount("1500"), 1500.0);
        assert_eq!(parse_amount(" 12.50 "), 12.5);
        assert_eq!(parse_amount("-3"), -3.0);
    }

    #[test]
    fn malformed_input_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12,50"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_raw")]
        raw: String,
        #[serde(default, deserialize_with = "deserialize_value")]
        value: f64,
    }

    #[test]
    fn accepts_strings_numbers_and_nulls() {
        let row: Row = serde_json::from_str(r#"{"raw": 42.5, "value": "7"}"#).unwrap();
        assert_eq!(row.raw, "42.5");
        assert_eq!(row.value, 7.0);

        let row: Row = serde_json::from_str(r#"{"raw": null, "value": null}"#).unwrap();
        assert_eq!(row.raw, "");
        assert_eq!(row.value, 0.0);

        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.raw, "");
        assert_eq!(row.value, 0.0);

        let row: Row = serde_json::from_str(r#"{"raw": 2500, "value": 12}"#).unwrap();
        assert_eq!(row.raw, "2500");
        assert_eq!(row.value, 12.0);
    }

    #[derive(Deserialize)]
    struct Keyed {
        #[serde(default, deserialize_with = "deserialize_id")]
        id: Option<String>,
    }

    #[test]
    fn ids_accept_integers_and_nulls() {
        let row: Keyed = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(row.id.as_deref(), Some("42"));
        let row: Keyed = serde_json::from_str(r#"{"id": "b7"}"#).unwrap();
        assert_eq!(row.id.as_deref(), Some("b7"));
        let row: Keyed = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert!(row.id.is_none());
    }
}
