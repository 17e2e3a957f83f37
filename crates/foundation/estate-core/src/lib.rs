//! Estate Core
//!
//! Shared vocabulary for the investment advisor: the feature schema the
//! pipelines are trained on, the strongly-typed property record built from a
//! form submission, and the prediction result shown to the user.
//!
//! ```text
//!   form fields ──► PropertyRecord ──► FeatureFrame ──► classifier / regressor
//!                   (validated)        (ordered row)             │
//!                                                                ▼
//!                                                       PredictionResult
//! ```

pub mod frame;
pub mod prediction;
pub mod record;
pub mod schema;
pub mod settings;

pub use frame::{FeatureFrame, FeatureValue};
pub use prediction::{InvestmentLabel, PredictionResult};
pub use record::{PropertyRecord, YesNo};
pub use schema::{CategoryColumn, NumericBounds};
pub use settings::{InsightLimits, Placeholders};

use thiserror::Error;

/// Validation failures raised while turning raw input into a `PropertyRecord`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Missing value for {0}")]
    MissingField(&'static str),

    #[error("{field}: '{value}' is not one of the known values")]
    UnknownChoice { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field}: {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, RecordError>;
