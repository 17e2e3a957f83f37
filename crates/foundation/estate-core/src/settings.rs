//! Runtime knobs shared by the config file, the predictor and the insights page.

use serde::{Deserialize, Serialize};

/// Counts fed to the models for `Nearby_Schools` / `Nearby_Hospitals`,
/// which the form does not ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub nearby_schools: u32,
    pub nearby_hospitals: u32,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            nearby_schools: 1,
            nearby_hospitals: 1,
        }
    }
}

/// Limits and styling of the insights charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightLimits {
    pub city_price_limit: usize,
    pub growth_limit: usize,
    pub scatter_opacity: f64,
}

impl Default for InsightLimits {
    fn default() -> Self {
        Self {
            city_price_limit: 20,
            growth_limit: 10,
            scatter_opacity: 0.6,
        }
    }
}
