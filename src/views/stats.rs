// src/views/stats.rs

use crate::domain::PropertyRecord;
use std::collections::BTreeMap;

pub const TOP_N: usize = 10;

/// Home page figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub mean_price: f64,
    pub best_quality: u8,
}

pub fn summary(records: &[PropertyRecord]) -> Option<Summary> {
    Some(Summary {
        total: records.len(),
        mean_price: mean(records.iter().map(|r| r.rent_price))?,
        best_quality: records.iter().map(|r| r.quality).max()?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityPrices {
    pub quality: u8,
    pub count: usize,
    pub prices: FiveNumber,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedroomCount {
    pub bedrooms: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlStats {
    pub with_url: usize,
    pub without_url: usize,
    pub percent_with_url: f64,
    /// `None` when no record has a URL.
    pub mean_quality_with_url: Option<f64>,
}

#[derive(Debug)]
pub struct Statistics<'a> {
    pub count: usize,
    pub mean_price: f64,
    pub mean_size: f64,
    pub price_by_quality: Vec<QualityPrices>,
    pub bedrooms: Vec<BedroomCount>,
    pub top: Vec<&'a PropertyRecord>,
    pub urls: UrlStats,
    pub with_url: Vec<&'a PropertyRecord>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Quantile of sorted data with linear interpolation between closest ranks.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn five_number(values: &[f64]) -> Option<FiveNumber> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(FiveNumber {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

pub fn statistics(records: &[PropertyRecord]) -> Option<Statistics<'_>> {
    let count = records.len();
    let mean_price = mean(records.iter().map(|r| r.rent_price))?;
    let mean_size = mean(records.iter().map(|r| r.size_sq_m))?;

    let mut by_quality: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for r in records {
        by_quality.entry(r.quality).or_default().push(r.rent_price);
    }
    let price_by_quality = by_quality
        .into_iter()
        .filter_map(|(quality, prices)| {
            Some(QualityPrices {
                quality,
                count: prices.len(),
                prices: five_number(&prices)?,
            })
        })
        .collect();

    let mut by_bedrooms: BTreeMap<u32, usize> = BTreeMap::new();
    for r in records {
        *by_bedrooms.entry(r.bedrooms).or_default() += 1;
    }
    let bedrooms = by_bedrooms
        .into_iter()
        .map(|(bedrooms, count)| BedroomCount { bedrooms, count })
        .collect();

    // sort_by is stable: equal qualities keep their stored order.
    let mut top: Vec<&PropertyRecord> = records.iter().collect();
    top.sort_by(|a, b| b.quality.cmp(&a.quality));
    top.truncate(TOP_N);

    let with_url: Vec<&PropertyRecord> = records.iter().filter(|r| r.has_source_url()).collect();
    let urls = UrlStats {
        with_url: with_url.len(),
        without_url: count - with_url.len(),
        percent_with_url: with_url.len() as f64 / count as f64 * 100.0,
        mean_quality_with_url: mean(with_url.iter().map(|r| r.quality as f64)),
    };

    Some(Statistics {
        count,
        mean_price,
        mean_size,
        price_by_quality,
        bedrooms,
        top,
        urls,
        with_url,
    })
}
