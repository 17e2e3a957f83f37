//! Estate Predictor
//!
//! Everything between the property form and the two pipelines:
//!
//! - [`FormChoices`]: allowed values per categorical field, taken from the
//!   reference dataset
//! - [`FormSpec`]: the laid-out form, with the current selection
//! - [`Predictor`]: validates a [`FormInput`], builds the one-row frame and
//!   turns model output into a [`PredictionResult`](estate_core::PredictionResult)

pub mod form;
pub mod predictor;

pub use form::{form_key, Control, FieldSpec, FormChoices, FormInput, FormSpec, SelectOption};
pub use predictor::Predictor;

pub use estate_core::Placeholders;

use estate_core::RecordError;
use estate_models::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Model returned a non-finite {0}")]
    NonFiniteOutput(&'static str),

    #[error("Classifier returned no class probabilities")]
    EmptyProbabilities,
}

pub type Result<T> = std::result::Result<T, PredictionError>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_pass_through() {
        let err: PredictionError = RecordError::MissingField("City").into();
        assert_eq!(err.to_string(), "Missing value for City");

        let err: PredictionError = ModelError::SchemaMismatch("missing column 'City'".into()).into();
        assert!(err.to_string().contains("missing column 'City'"));
    }
}
