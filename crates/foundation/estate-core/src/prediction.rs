//! What the predictor page shows after a submit.

use serde::Serialize;

/// Binary investment verdict. There is no abstention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvestmentLabel {
    Good,
    NotGood,
}

impl InvestmentLabel {
    /// Class 1 is a good investment, every other class is not.
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Self::Good
        } else {
            Self::NotGood
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Good => "Good Investment",
            Self::NotGood => "Not a Good Investment",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Good => "✔",
            Self::NotGood => "✘",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "result-good",
            Self::NotGood => "result-bad",
        }
    }
}

/// Fresh per submit, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: InvestmentLabel,
    /// Winning class probability scaled to 0..=100.
    pub confidence: f64,
    /// Estimated price after five years, in Lakhs.
    pub forecast_price: f64,
}

impl PredictionResult {
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence)
    }

    pub fn forecast_display(&self) -> String {
        format!("₹ {:.2} Lakhs", self.forecast_price)
    }
}
