// src/domain/draft.rs

use crate::domain::property::{
    clamp_quality, is_web_url, today, Coordinates, PropertyRecord, QUALITY_DEFAULT,
};
use chrono::NaiveDate;

/// Property fields produced by the extractor. Every field is optional: the
/// model may not find a value, or may return something that does not coerce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub address: Option<String>,
    pub size_sq_m: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub rent_price: Option<f64>,
    pub notes: Option<String>,
    pub quality: Option<u8>,
    pub visit_date: Option<NaiveDate>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Not-yet-persisted form values. Lives for one request: the auto-fill handler
/// produces it, the form carries it, the submit handler consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub address: String,
    pub size_sq_m: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub rent_price: f64,
    pub notes: String,
    pub quality: u8,
    pub visit_date: NaiveDate,
    pub source_url: String,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            address: String::new(),
            size_sq_m: 1.0,
            bedrooms: 0,
            bathrooms: 0,
            rent_price: 0.0,
            notes: String::new(),
            quality: QUALITY_DEFAULT,
            visit_date: today(),
            source_url: String::new(),
        }
    }
}

impl PropertyDraft {
    pub fn from_record(record: &PropertyRecord) -> Self {
        Self {
            address: record.address.clone(),
            size_sq_m: record.size_sq_m,
            bedrooms: record.bedrooms,
            bathrooms: record.bathrooms,
            rent_price: record.rent_price,
            notes: record.notes.clone(),
            quality: record.quality,
            visit_date: record.visit_date,
            source_url: record.source_url.clone(),
        }
    }

    /// Overwrite the fields the extractor produced and remember where they came
    /// from. Anything missing, negative, or non-positive where a size is
    /// expected keeps its prior value.
    pub fn apply_extracted(&mut self, fields: &ExtractedFields, source_url: &str) {
        if let Some(address) = fields.address.as_deref().map(str::trim) {
            if !address.is_empty() {
                self.address = address.to_string();
            }
        }
        if let Some(size) = fields.size_sq_m.filter(|s| s.is_finite() && *s > 0.0) {
            self.size_sq_m = size;
        }
        if let Some(bedrooms) = fields.bedrooms.and_then(|n| u32::try_from(n).ok()) {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = fields.bathrooms.and_then(|n| u32::try_from(n).ok()) {
            self.bathrooms = bathrooms;
        }
        if let Some(price) = fields.rent_price.filter(|p| p.is_finite() && *p >= 0.0) {
            self.rent_price = price;
        }
        if let Some(notes) = &fields.notes {
            self.notes = notes.clone();
        }
        if let Some(quality) = fields.quality {
            self.quality = clamp_quality(quality as i64);
        }
        if let Some(date) = fields.visit_date {
            self.visit_date = date;
        }
        self.source_url = source_url.trim().to_string();
    }

    /// Check the draft before any network call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("Address is required".to_string());
        }
        if !self.size_sq_m.is_finite() || self.size_sq_m <= 0.0 {
            return Err("Size must be greater than zero".to_string());
        }
        if !self.rent_price.is_finite() || self.rent_price < 0.0 {
            return Err("Rent price cannot be negative".to_string());
        }
        if !self.source_url.trim().is_empty() && !is_web_url(&self.source_url) {
            return Err("Listing URL must start with http:// or https://".to_string());
        }
        Ok(())
    }

    pub fn into_record(self, id: String, coordinates: Coordinates) -> PropertyRecord {
        PropertyRecord {
            address: self.address.trim().to_string(),
            size_sq_m: self.size_sq_m,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            rent_price: self.rent_price,
            notes: self.notes,
            quality: clamp_quality(self.quality as i64),
            visit_date: self.visit_date,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            source_url: self.source_url.trim().to_string(),
            id,
        }
    }
}
