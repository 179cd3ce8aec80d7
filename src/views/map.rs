// src/views/map.rs
//
// Map markers, tiers and range filters. Every range starts out spanning the
// data; a range the data cannot span (all values equal) is widened so the
// filter control still has two distinct ends.

use crate::domain::property::{QUALITY_MAX, QUALITY_MIN};
use crate::domain::{Coordinates, PropertyRecord};

const PRICE_WIDENING: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

impl QualityTier {
    pub fn of(quality: u8) -> Self {
        match quality {
            q if q >= 4 => QualityTier::High,
            q if q >= 2 => QualityTier::Medium,
            _ => QualityTier::Low,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            QualityTier::High => "blue",
            QualityTier::Medium => "green",
            QualityTier::Low => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
    /// True when the data had a single value and the range was widened.
    pub widened: bool,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn narrowed(&self, min: Option<T>, max: Option<T>) -> Self {
        Bounds {
            min: min.unwrap_or(self.min),
            max: max.unwrap_or(self.max),
            widened: self.widened,
        }
    }
}

fn span<T, I>(values: I) -> Option<(T, T)>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((
            if v < lo { v } else { lo },
            if v > hi { v } else { hi },
        )),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub price: Bounds<f64>,
    pub bedrooms: Bounds<u32>,
    pub quality: Bounds<u8>,
}

/// Full extent of the data for each filter, or `None` for an empty collection.
pub fn data_bounds(records: &[PropertyRecord]) -> Option<MapBounds> {
    let (pmin, pmax) = span(records.iter().map(|r| r.rent_price))?;
    let (bmin, bmax) = span(records.iter().map(|r| r.bedrooms))?;
    let (qmin, qmax) = span(records.iter().map(|r| r.quality))?;

    let price = if pmin == pmax {
        Bounds { min: pmin - PRICE_WIDENING, max: pmin + PRICE_WIDENING, widened: true }
    } else {
        Bounds { min: pmin, max: pmax, widened: false }
    };
    let bedrooms = if bmin == bmax {
        Bounds { min: bmin.saturating_sub(1), max: bmin.saturating_add(1), widened: true }
    } else {
        Bounds { min: bmin, max: bmax, widened: false }
    };
    let quality = if qmin == qmax {
        Bounds {
            min: qmin.saturating_sub(1).max(QUALITY_MIN),
            max: (qmax + 1).min(QUALITY_MAX),
            widened: true,
        }
    } else {
        Bounds { min: qmin, max: qmax, widened: false }
    };

    Some(MapBounds { price, bedrooms, quality })
}

/// User-selected ranges. Unset ends default to the data bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapFilter {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub bedrooms_min: Option<u32>,
    pub bedrooms_max: Option<u32>,
    pub quality_min: Option<u8>,
    pub quality_max: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub position: Coordinates,
    pub tier: QualityTier,
    pub address: String,
    pub rent_price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub quality: u8,
    pub source_url: Option<String>,
}

impl Marker {
    fn of(record: &PropertyRecord) -> Self {
        Marker {
            id: record.id.clone(),
            position: record.coordinates(),
            tier: QualityTier::of(record.quality),
            address: record.address.clone(),
            rent_price: record.rent_price,
            bedrooms: record.bedrooms,
            bathrooms: record.bathrooms,
            quality: record.quality,
            source_url: record.listing_url().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub bounds: MapBounds,
    pub selected: MapBounds,
    pub markers: Vec<Marker>,
    /// Mean of the marker coordinates; `None` when the filters match nothing.
    pub center: Option<Coordinates>,
}

pub fn build_map(records: &[PropertyRecord], filter: &MapFilter) -> Option<MapView> {
    let bounds = data_bounds(records)?;
    let selected = MapBounds {
        price: bounds.price.narrowed(filter.price_min, filter.price_max),
        bedrooms: bounds.bedrooms.narrowed(filter.bedrooms_min, filter.bedrooms_max),
        quality: bounds.quality.narrowed(filter.quality_min, filter.quality_max),
    };

    let markers: Vec<Marker> = records
        .iter()
        .filter(|r| {
            selected.price.contains(r.rent_price)
                && selected.bedrooms.contains(r.bedrooms)
                && selected.quality.contains(r.quality)
        })
        .map(Marker::of)
        .collect();

    let center = (!markers.is_empty()).then(|| {
        let n = markers.len() as f64;
        Coordinates {
            latitude: markers.iter().map(|m| m.position.latitude).sum::<f64>() / n,
            longitude: markers.iter().map(|m| m.position.longitude).sum::<f64>() / n,
        }
    });

    Some(MapView {
        bounds,
        selected,
        markers,
        center,
    })
}
