//! Application state shared by all handlers

use std::sync::Arc;

use estate_dataset::ReferenceDataset;
use estate_insights::InsightLimits;
use estate_predictor::Predictor;

/// Loaded once at startup and never mutated, so handlers share it without locks.
#[derive(Debug)]
pub struct AppState {
    pub dataset: Arc<ReferenceDataset>,
    pub predictor: Predictor,
    pub insight_limits: InsightLimits,
}

impl AppState {
    pub fn new(
        dataset: Arc<ReferenceDataset>,
        predictor: Predictor,
        insight_limits: InsightLimits,
    ) -> Self {
        Self {
            dataset,
            predictor,
            insight_limits,
        }
    }
}
