// src/storage/coerce.rs
//
// Field coercion for rows written by other tools (spreadsheets, pandas), which
// store counts as `2.0` and missing text as `nan`.

use crate::domain::property::clamp_quality;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

fn parse_number<'de, D>(deserializer: D, field: &str) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| D::Error::custom(format!("invalid {field} value {trimmed:?}")))
}

/// Non-negative whole number, accepting `3` and `3.0`.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = parse_number(deserializer, "count")?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(D::Error::custom(format!("invalid count value {value}")));
    }
    Ok(value as u32)
}

/// Quality rating, clamped into the 1..=5 scale.
pub fn quality<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = parse_number(deserializer, "quality")?;
    Ok(clamp_quality(value.round() as i64))
}

/// URL column is always text; placeholders for a missing value become empty.
pub fn url_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("nan") || trimmed == "None" {
        Ok(String::new())
    } else {
        Ok(trimmed.to_string())
    }
}
