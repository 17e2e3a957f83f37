//! Estate Models
//!
//! The two pre-trained pipelines behind the predictor page:
//!
//! - a binary **classifier** answering "is this a good investment?" with a
//!   label and per-class probabilities
//! - a **regressor** estimating the price five years out, in Lakhs
//!
//! Each pipeline is a JSON artifact bundling its column encoder with a
//! gradient-boosted tree model (see [`pipeline`]). Callers depend only on the
//! [`Classifier`] and [`Regressor`] traits, so tests and alternative backends
//! plug in without touching the predictor.

pub mod booster;
pub mod encoder;
pub mod pipeline;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use estate_core::FeatureFrame;
use thiserror::Error;

pub use encoder::{ColumnKind, ColumnSpec, FeatureEncoder};
pub use pipeline::{ClassifierArtifact, GbdtClassifier, GbdtRegressor, RegressorArtifact};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Booster error: {0}")]
    Booster(String),

    #[error("Unknown value '{value}' for {column}")]
    UnknownCategory { column: String, value: String },

    #[error("Input does not match the model schema: {0}")]
    SchemaMismatch(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Binary classifier over one feature frame.
pub trait Classifier: Send + Sync {
    /// Predicted class label.
    fn predict(&self, frame: &FeatureFrame) -> Result<i64>;

    /// Probability per class, in the model's class order.
    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<f64>>;
}

/// Scalar regressor over one feature frame.
pub trait Regressor: Send + Sync {
    fn predict(&self, frame: &FeatureFrame) -> Result<f64>;
}

/// Both pipelines, loaded once and shared read-only.
#[derive(Clone)]
pub struct ModelRegistry {
    classifier: Arc<dyn Classifier>,
    regressor: Arc<dyn Regressor>,
}

impl ModelRegistry {
    pub fn new(classifier: Arc<dyn Classifier>, regressor: Arc<dyn Regressor>) -> Self {
        Self {
            classifier,
            regressor,
        }
    }

    /// Load both artifacts from disk. Either failing aborts the load.
    pub fn load(classifier_path: &Path, regressor_path: &Path) -> Result<Self> {
        let classifier = GbdtClassifier::load(classifier_path)?;
        tracing::info!(
            path = %classifier_path.display(),
            inputs = classifier.encoder().width(),
            "classification pipeline loaded"
        );

        let regressor = GbdtRegressor::load(regressor_path)?;
        tracing::info!(
            path = %regressor_path.display(),
            inputs = regressor.encoder().width(),
            "regression pipeline loaded"
        );

        Ok(Self::new(Arc::new(classifier), Arc::new(regressor)))
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry").finish_non_exhaustive()
    }
}
