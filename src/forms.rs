// src/forms.rs
//
// Decoding of query strings and urlencoded form bodies into domain values.

use crate::domain::{clamp_quality, today, PropertyDraft};
use crate::errors::ServerError;
use crate::views::MapFilter;
use astra::Request;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

/// Form bodies beyond this size are rejected.
const MAX_FORM_BYTES: u64 = 64 * 1024;

pub type Params = HashMap<String, String>;

pub fn parse_urlencoded(input: &[u8]) -> Params {
    url::form_urlencoded::parse(input).into_owned().collect()
}

pub fn parse_query(req: &Request) -> Params {
    req.uri()
        .query()
        .map(|q| parse_urlencoded(q.as_bytes()))
        .unwrap_or_default()
}

pub fn read_form(req: Request) -> Result<Params, ServerError> {
    let mut body = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Could not read form: {e}")))?;

    if body.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("Form too large".to_string()));
    }
    Ok(parse_urlencoded(&body))
}

fn field<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Parse an optional field; absent or blank is `Ok(None)`.
fn number<T: FromStr>(params: &Params, name: &str, label: &str) -> Result<Option<T>, String> {
    match field(params, name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("{label} must be a number, got \"{raw}\"")),
    }
}

/// Build a draft from submitted form values.
///
/// Every field that parses is kept even when others fail, so the form can be
/// shown again with the user's input and the list of problems.
pub fn draft_from_form(params: &Params) -> (PropertyDraft, Vec<String>) {
    let mut draft = PropertyDraft::default();
    let mut problems = Vec::new();

    draft.address = params.get("address").map(|a| a.trim().to_string()).unwrap_or_default();
    draft.notes = params.get("notes").map(|n| n.trim().to_string()).unwrap_or_default();
    draft.source_url = params.get("source_url").map(|u| u.trim().to_string()).unwrap_or_default();

    match number::<f64>(params, "size_sq_m", "Size") {
        Ok(Some(v)) => draft.size_sq_m = v,
        Ok(None) => {}
        Err(e) => problems.push(e),
    }
    match number::<u32>(params, "bedrooms", "Bedrooms") {
        Ok(Some(v)) => draft.bedrooms = v,
        Ok(None) => {}
        Err(e) => problems.push(e),
    }
    match number::<u32>(params, "bathrooms", "Bathrooms") {
        Ok(Some(v)) => draft.bathrooms = v,
        Ok(None) => {}
        Err(e) => problems.push(e),
    }
    match number::<f64>(params, "rent_price", "Rent") {
        Ok(Some(v)) => draft.rent_price = v,
        Ok(None) => {}
        Err(e) => problems.push(e),
    }
    match number::<i64>(params, "quality", "Quality") {
        Ok(Some(v)) => draft.quality = clamp_quality(v),
        Ok(None) => {}
        Err(e) => problems.push(e),
    }
    match field(params, "visit_date") {
        None => draft.visit_date = today(),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => draft.visit_date = d,
            Err(_) => problems.push(format!("Visit date must be YYYY-MM-DD, got \"{raw}\"")),
        },
    }

    (draft, problems)
}

/// Map filters from the query string. Unparsable values are ignored.
pub fn map_filter(params: &Params) -> MapFilter {
    let get = |name: &str| field(params, name);
    MapFilter {
        price_min: get("price_min").and_then(|v| v.parse().ok()),
        price_max: get("price_max").and_then(|v| v.parse().ok()),
        bedrooms_min: get("bedrooms_min").and_then(|v| v.parse().ok()),
        bedrooms_max: get("bedrooms_max").and_then(|v| v.parse().ok()),
        quality_min: get("quality_min").and_then(|v| v.parse().ok()),
        quality_max: get("quality_max").and_then(|v| v.parse().ok()),
    }
}

pub fn query_location(path: &str, key: &str, value: &str) -> String {
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{encoded}")
}
