//! # Lenient Deserializers
//!
//! Documents and appearance overrides are edited in a browser form and stored
//! as loosely-typed JSON: a quantity may arrive as `"2"`, a font size as
//! `"11pt"`, a header style as `"fancy"`. These helpers keep such input from
//! failing the whole document:
//!
//! - numeric fields accept numbers and numeric strings (`,` or `.` decimal);
//!   anything else becomes `NaN` so that validation (line items) or
//!   `to_number` coercion (appearance) decides what happens next
//! - enumerated fields accept any string; unrecognized values become `None`
//!   so the lower configuration layer's value survives
//! - nested override objects that are `null` or not objects become empty
//!   overrides

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Converts a loosely-typed JSON value into a float, `NaN` when impossible.
pub fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Deserializes a required number leniently.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

/// Default of a required number that is absent: `NaN`, rejected by validation.
pub fn nan() -> f64 {
    f64::NAN
}

/// Deserializes an optional number leniently (`null` stays `None`).
pub fn option_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(value_to_f64(&v)),
    })
}

/// Deserializes an optional enumerated value through its `FromStr`,
/// dropping values it does not recognize.
pub fn option_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// Deserializes an optional string, dropping non-string values.
pub fn option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Deserializes an optional flag, accepting `"true"`/`"false"` strings too.
pub fn option_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    })
}

/// Deserializes a nested object, falling back to `T::default()` when the
/// value is `null`, not an object, or does not fit `T`.
pub fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).unwrap_or_default(),
        _ => T::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default = "nan", deserialize_with = "number")]
        qty: f64,
        #[serde(default, deserialize_with = "option_number")]
        size: Option<f64>,
        #[serde(default, deserialize_with = "option_bool")]
        flag: Option<bool>,
    }

    #[test]
    fn test_numbers_from_strings() {
        let p: Sample = serde_json::from_str(r#"{"qty": "1,5", "size": "11"}"#).unwrap();
        assert_eq!(p.qty, 1.5);
        assert_eq!(p.size, Some(11.0));
        assert_eq!(p.flag, None);
    }

    #[test]
    fn test_garbage_becomes_nan() {
        let p: Sample = serde_json::from_str(r#"{"qty": "abc", "size": true}"#).unwrap();
        assert!(p.qty.is_nan());
        assert!(p.size.unwrap().is_nan());
    }

    #[test]
    fn test_null_stays_none() {
        let p: Sample = serde_json::from_str(r#"{"qty": 2, "size": null, "flag": "on"}"#).unwrap();
        assert_eq!(p.size, None);
        assert_eq!(p.flag, Some(true));
    }

    #[test]
    fn test_missing_number_is_nan() {
        let p: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.qty.is_nan());
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Inner {
        #[serde(default)]
        a: Option<u8>,
    }

    #[derive(Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "object_or_default")]
        inner: Inner,
    }

    #[test]
    fn test_object_or_default() {
        for json in [r#"{}"#, r#"{"inner": null}"#, r#"{"inner": 3}"#, r#"{"inner": {"a": "x"}}"#] {
            let outer: Outer = serde_json::from_str(json).unwrap();
            assert_eq!(outer.inner, Inner::default(), "{json}");
        }
        let outer: Outer = serde_json::from_str(r#"{"inner": {"a": 4}}"#).unwrap();
        assert_eq!(outer.inner.a, Some(4));
    }
}
