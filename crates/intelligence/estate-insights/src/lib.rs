//! Estate Insights
//!
//! Descriptive aggregates over the reference dataset for the insights page:
//!
//! | Chart | Aggregate |
//! |---|---|
//! | Average current price by city | [`city_mean_price`] |
//! | Most appreciating cities | [`top_growth_cities`] |
//! | Property type vs future price | [`future_price_by_type`] |
//! | Amenities count vs future price | [`amenities_scatter`] |
//!
//! Views are recomputed on every render; nothing is cached.

pub mod aggregate;
pub mod chart;

pub use aggregate::{
    amenities_scatter, city_mean_price, future_price_by_type, top_growth_cities, CityMetric,
    FiveNumberSummary, ScatterPoint, TypeDistribution,
};
pub use chart::ChartSpec;
pub use estate_core::InsightLimits;

use estate_dataset::ReferenceDataset;
use serde::Serialize;

/// The four aggregates behind the insights page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightView {
    pub limits: InsightLimits,
    pub city_prices: Vec<CityMetric>,
    pub top_growth: Vec<CityMetric>,
    pub type_distributions: Vec<TypeDistribution>,
    pub scatter: Vec<ScatterPoint>,
}

/// Figures in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCharts {
    pub city_prices: ChartSpec,
    pub top_growth: ChartSpec,
    pub type_distributions: ChartSpec,
    pub scatter: ChartSpec,
}

impl InsightView {
    pub fn compute(ds: &ReferenceDataset, limits: &InsightLimits) -> Self {
        Self {
            limits: *limits,
            city_prices: city_mean_price(ds, limits.city_price_limit),
            top_growth: top_growth_cities(ds, limits.growth_limit),
            type_distributions: future_price_by_type(ds),
            scatter: amenities_scatter(ds),
        }
    }

    pub fn charts(&self) -> InsightCharts {
        InsightCharts {
            city_prices: chart::city_price_chart(&self.city_prices, self.limits.city_price_limit),
            top_growth: chart::growth_chart(&self.top_growth),
            type_distributions: chart::type_box_chart(&self.type_distributions),
            scatter: chart::amenities_scatter_chart(&self.scatter, self.limits.scatter_opacity),
        }
    }
}
