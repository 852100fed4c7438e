use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};

/// Numeric coercion for purchase amounts. Surrounding whitespace is ignored, a blank
/// value counts as zero and anything unparseable becomes NaN. The only spelled out
/// number accepted is `Infinity`; `inf`, `nan` and friends are not numbers here.
pub fn parse_purchase(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    let unsigned = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
    if unsigned == "Infinity" {
        return if value.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    value.parse().unwrap_or(f64::NAN)
}

/// Value used when a row has no purchase at all.
pub fn missing_purchase() -> f64 {
    f64::NAN
}

/// Purchase cell read strictly as text, for sources where every cell is a string.
pub fn purchase_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    Ok(parse_purchase(&text))
}

struct PurchaseVisitor;

impl<'de> Visitor<'de> for PurchaseVisitor {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_purchase(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<f64, E> {
        Ok(if v { 1.0 } else { 0.0 })
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }
}

pub(crate) fn purchase<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(PurchaseVisitor)
}

struct CategoryVisitor;

impl<'de> Visitor<'de> for CategoryVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }
}

/// Categorical values from self describing sources such as json. They are compared as
/// strings, so numeric occupation codes are stored in their decimal form.
pub(crate) fn category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CategoryVisitor)
}

#[cfg(test)]
mod tests {
    use super::parse_purchase;

    #[test]
    fn test_parse_purchase() {
        assert_eq!(parse_purchase("100"), 100.0);
        assert_eq!(parse_purchase(" 12.5 "), 12.5);
        assert_eq!(parse_purchase(""), 0.0);
        assert!(parse_purchase("abc").is_nan());
    }

    #[test]
    fn test_parse_purchase_spelled_numbers() {
        assert_eq!(parse_purchase("Infinity"), f64::INFINITY);
        assert_eq!(parse_purchase("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_purchase("1e3"), 1000.0);
        assert_eq!(parse_purchase("+2.5"), 2.5);
        for text in ["inf", "-inf", "infinity", "INF", "nan", "NaN"] {
            assert!(parse_purchase(text).is_nan(), "{text}");
        }
    }
}
