//! Estate Dataset
//!
//! Loads the reference property dataset, a CSV packed inside a zip archive,
//! once at startup. The loaded `ReferenceDataset` feeds both the predictor
//! form (distinct category values) and the insights charts.

pub mod dataset;
pub mod row;

pub use dataset::ReferenceDataset;
pub use row::{ReferenceRow, REQUIRED_COLUMNS};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Cannot open dataset archive {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive {path} has no entry named '{entry}'")]
    MissingEntry { path: PathBuf, entry: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Dataset contains no rows")]
    Empty,
}

pub type Result<T> = std::result::Result<T, DatasetError>;
