//! Loose numeric coercion for request values.
//!
//! Query strings and JSON bodies arrive untyped; these helpers turn them into
//! numbers with ECMAScript `Number()` rules. `None` stands for NaN.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

const RADIX_PREFIXES: [(&str, u32); 6] = [
    ("0x", 16),
    ("0X", 16),
    ("0o", 8),
    ("0O", 8),
    ("0b", 2),
    ("0B", 2),
];

/// Coerce a string to a number.
///
/// Surrounding whitespace is ignored and an empty string is `0`.
pub fn coerce_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in RADIX_PREFIXES {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    // f64::from_str also accepts "inf" and "NaN", which are not numbers here
    let numeric_chars = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric_chars {
        return None;
    }

    s.parse::<f64>().ok()
}

/// Coerce an arbitrary JSON value to a number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => coerce_str(s),
        Value::Array(items) => match items.as_slice() {
            [] | [Value::Null] => Some(0.0),
            [single] => coerce_str(&display_value(single)),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Render a JSON value the way it reads when interpolated into a message.
///
/// Strings lose their quotes and whole floats print without a fraction.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Deserialize an `i32` from a JSON number or numeric string.
///
/// Rejects values that coerce to NaN, infinities, fractions and anything
/// outside the `i32` range.
pub fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = coerce_number(&value).ok_or_else(|| {
        <D::Error as de::Error>::custom(format!("{} is not a number", display_value(&value)))
    })?;

    if !number.is_finite() || number.fract() != 0.0 {
        return Err(de::Error::custom(format!("{} is not a whole number", number)));
    }
    if number < f64::from(i32::MIN) || number > f64::from(i32::MAX) {
        return Err(de::Error::custom(format!("{} is out of range", number)));
    }

    Ok(number as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_follow_number_rules() {
        assert_eq!(coerce_str("5"), Some(5.0));
        assert_eq!(coerce_str("  12.5 "), Some(12.5));
        assert_eq!(coerce_str(""), Some(0.0));
        assert_eq!(coerce_str("   "), Some(0.0));
        assert_eq!(coerce_str("1e3"), Some(1000.0));
        assert_eq!(coerce_str("-4"), Some(-4.0));
        assert_eq!(coerce_str("0x1A"), Some(26.0));
        assert_eq!(coerce_str("0b101"), Some(5.0));
        assert_eq!(coerce_str("Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn non_numeric_strings_are_nan() {
        assert_eq!(coerce_str("abc"), None);
        assert_eq!(coerce_str("12abc"), None);
        assert_eq!(coerce_str("inf"), None);
        assert_eq!(coerce_str("NaN"), None);
        assert_eq!(coerce_str("0x"), None);
        assert_eq!(coerce_str("0xZZ"), None);
    }

    #[test]
    fn json_values_coerce_like_scalars() {
        assert_eq!(coerce_number(&json!(25)), Some(25.0));
        assert_eq!(coerce_number(&json!("30")), Some(30.0));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!(null)), Some(0.0));
        assert_eq!(coerce_number(&json!([])), Some(0.0));
        assert_eq!(coerce_number(&json!([21])), Some(21.0));
        assert_eq!(coerce_number(&json!([null])), Some(0.0));
        assert_eq!(coerce_number(&json!([[]])), Some(0.0));
        assert_eq!(coerce_number(&json!([1, 2])), None);
        assert_eq!(coerce_number(&json!({ "age": 20 })), None);
    }

    #[test]
    fn display_matches_interpolation() {
        assert_eq!(display_value(&json!(17)), "17");
        assert_eq!(display_value(&json!(17.0)), "17");
        assert_eq!(display_value(&json!(16.5)), "16.5");
        assert_eq!(display_value(&json!("seventeen")), "seventeen");
        assert_eq!(display_value(&json!([1, null, 3])), "1,,3");
    }

    #[derive(Debug, Deserialize)]
    struct Aged {
        #[serde(deserialize_with = "deserialize_whole_number")]
        age: i32,
    }

    #[test]
    fn whole_number_accepts_numeric_strings() {
        let aged: Aged = serde_json::from_value(json!({ "age": "42" })).unwrap();
        assert_eq!(aged.age, 42);

        let aged: Aged = serde_json::from_value(json!({ "age": 19.0 })).unwrap();
        assert_eq!(aged.age, 19);
    }

    #[test]
    fn whole_number_rejects_fractions_and_garbage() {
        assert!(serde_json::from_value::<Aged>(json!({ "age": 18.5 })).is_err());
        assert!(serde_json::from_value::<Aged>(json!({ "age": "old" })).is_err());
        assert!(serde_json::from_value::<Aged>(json!({ "age": 1e12 })).is_err());
    }
}
