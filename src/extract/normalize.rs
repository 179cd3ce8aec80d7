// src/extract/normalize.rs
//
// Whatever the model returns, the fields are coerced the same way: numbers to
// numbers or null, visit date defaulting to today, quality clamped or 3.

use crate::domain::property::{clamp_quality, QUALITY_DEFAULT};
use crate::domain::ExtractedFields;
use crate::extract::ExtractError;
use chrono::NaiveDate;
use serde_json::{Map, Value};

fn real(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn whole(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}

pub fn normalize(raw: &Map<String, Value>, today: NaiveDate) -> ExtractedFields {
    let quality = whole(raw.get("quality"))
        .map(clamp_quality)
        .unwrap_or(QUALITY_DEFAULT);

    ExtractedFields {
        address: text(raw.get("address")),
        size_sq_m: real(raw.get("size_sq_m")),
        bedrooms: whole(raw.get("bedrooms")),
        bathrooms: whole(raw.get("bathrooms")),
        rent_price: real(raw.get("rent_price")),
        notes: text(raw.get("notes")),
        quality: Some(quality),
        visit_date: Some(date(raw.get("visit_date")).unwrap_or(today)),
    }
}

/// Parse the model's message content, which must be a single JSON object.
pub fn parse_model_output(raw: &str, today: NaiveDate) -> Result<ExtractedFields, ExtractError> {
    let malformed = |reason: String| ExtractError::MalformedOutput {
        reason,
        raw: raw.to_string(),
    };

    match serde_json::from_str::<Value>(raw).map_err(|e| malformed(e.to_string()))? {
        Value::Object(map) => Ok(normalize(&map, today)),
        other => Err(malformed(format!("expected a JSON object, got {other}"))),
    }
}
