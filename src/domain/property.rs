// src/domain/property.rs

use crate::storage::coerce;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const QUALITY_MIN: u8 = 1;
pub const QUALITY_MAX: u8 = 5;
pub const QUALITY_DEFAULT: u8 = 3;

/// Clamp any integer rating into the 1..=5 quality scale.
pub fn clamp_quality(value: i64) -> u8 {
    value.clamp(QUALITY_MIN as i64, QUALITY_MAX as i64) as u8
}

/// The calendar date used whenever a visit date is not supplied.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One visited property, exactly as it is persisted.
///
/// Field order is the column order of the backing file. The aliases let files
/// written by the earlier Portuguese-language tool load without conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(rename = "Address", alias = "Endereço")]
    pub address: String,

    #[serde(rename = "SizeSqM", alias = "Tamanho (m²)")]
    pub size_sq_m: f64,

    #[serde(
        rename = "Bedrooms",
        alias = "Quartos",
        deserialize_with = "coerce::count"
    )]
    pub bedrooms: u32,

    #[serde(
        rename = "Bathrooms",
        alias = "Banheiros",
        deserialize_with = "coerce::count"
    )]
    pub bathrooms: u32,

    #[serde(rename = "RentPrice", alias = "Preço do Aluguel (R$)")]
    pub rent_price: f64,

    #[serde(rename = "Notes", alias = "Observações", default)]
    pub notes: String,

    #[serde(
        rename = "Quality",
        alias = "Qualidade",
        deserialize_with = "coerce::quality"
    )]
    pub quality: u8,

    #[serde(rename = "VisitDate", alias = "Data da Visita")]
    pub visit_date: NaiveDate,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,

    #[serde(
        rename = "SourceURL",
        alias = "URL",
        default,
        deserialize_with = "coerce::url_text"
    )]
    pub source_url: String,

    // Appended after the canonical columns; legacy files have no such column.
    #[serde(rename = "Id", default)]
    pub id: String,
}

impl PropertyRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn has_source_url(&self) -> bool {
        !self.source_url.trim().is_empty()
    }

    /// The listing URL, only when it is safe to render as a link.
    pub fn listing_url(&self) -> Option<&str> {
        let url = self.source_url.trim();
        is_web_url(url).then_some(url)
    }
}

/// True for absolute `http`/`https` URLs.
pub fn is_web_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
