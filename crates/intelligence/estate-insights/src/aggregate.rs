//! Group-by computations over the reference dataset.
//!
//! Every function is pure: the same dataset yields the same output. Rows whose
//! aggregated value is not finite are skipped.

use std::collections::BTreeMap;

use estate_dataset::{ReferenceDataset, ReferenceRow};
use serde::Serialize;

/// One bar of a per-city chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMetric {
    pub city: String,
    pub value: f64,
}

/// Min, quartiles and max of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Quartiles use linear interpolation between closest ranks.
    /// Returns `None` for an empty sample.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        Some(Self {
            min,
            q1: quantile(sorted, 0.25),
            median: quantile(sorted, 0.5),
            q3: quantile(sorted, 0.75),
            max,
        })
    }
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Future price distribution of one property type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDistribution {
    pub property_type: String,
    /// Values in dataset order.
    pub values: Vec<f64>,
    pub summary: FiveNumberSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub amenities: f64,
    pub future_price: f64,
    pub city: String,
}

/// Mean of `value` per city, cities in ascending name order.
fn mean_by_city(ds: &ReferenceDataset, value: impl Fn(&ReferenceRow) -> f64) -> Vec<CityMetric> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in ds.rows() {
        let v = value(row);
        if !v.is_finite() {
            continue;
        }
        let slot = groups.entry(row.city.as_str()).or_insert((0.0, 0));
        slot.0 += v;
        slot.1 += 1;
    }
    groups
        .into_iter()
        .map(|(city, (sum, count))| CityMetric {
            city: city.to_string(),
            value: sum / count as f64,
        })
        .collect()
}

/// Mean current price per city: the first `limit` cities in ascending name
/// order. The result is not ranked by price.
pub fn city_mean_price(ds: &ReferenceDataset, limit: usize) -> Vec<CityMetric> {
    let mut metrics = mean_by_city(ds, |r| r.price_lakhs);
    metrics.truncate(limit);
    metrics
}

/// The `limit` cities with the highest mean growth rate, highest first.
/// Equal means keep ascending city order.
pub fn top_growth_cities(ds: &ReferenceDataset, limit: usize) -> Vec<CityMetric> {
    let mut metrics = mean_by_city(ds, |r| r.growth_rate);
    metrics.sort_by(|a, b| b.value.total_cmp(&a.value));
    metrics.truncate(limit);
    metrics
}

/// Five-year price distribution per property type, types in order of first
/// appearance.
pub fn future_price_by_type(ds: &ReferenceDataset) -> Vec<TypeDistribution> {
    let mut order: Vec<&str> = Vec::new();
    let mut values: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in ds.rows() {
        if !row.future_price_5y.is_finite() {
            continue;
        }
        let key = row.property_type.as_str();
        values
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(row.future_price_5y);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let values = values.remove(key)?;
            let mut sorted = values.clone();
            sorted.sort_by(f64::total_cmp);
            let summary = FiveNumberSummary::from_sorted(&sorted)?;
            Some(TypeDistribution {
                property_type: key.to_string(),
                values,
                summary,
            })
        })
        .collect()
}

/// Every row as an (amenities, future price, city) point.
pub fn amenities_scatter(ds: &ReferenceDataset) -> Vec<ScatterPoint> {
    ds.rows()
        .iter()
        .filter(|r| r.amenities_count.is_finite() && r.future_price_5y.is_finite())
        .map(|r| ScatterPoint {
            amenities: r.amenities_count,
            future_price: r.future_price_5y,
            city: r.city.clone(),
        })
        .collect()
}
