//! Regression model selection over an uploaded dataset.
//!
//! The upload handler only sees the [`ModelSelector`] trait: a CSV path plus
//! two tuning parameters go in, the winning model and the transformed table
//! come out. [`AutomatedRegression`] is the in-crate implementation.

mod candidate;
mod metrics;
mod selector;


pub use candidate::CandidateModel;
pub use selector::AutomatedRegression;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Dataset, DatasetError};

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("not enough rows for analysis: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("target column \"{0}\" is not numeric")]
    TargetNotNumeric(String),

    #[error("no numeric feature columns besides the target")]
    NoUsableFeatures,

    #[error("no candidate model could be fitted: {0}")]
    NoValidModels(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Per-candidate evaluation on the held-out split.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scores {
    pub r2: f64,
    pub rmse: f64,
}

/// Outcome of one model-selection run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub best: CandidateModel,
    pub best_scores: Scores,

    /// Every candidate that produced finite scores, best first.
    pub rankings: Vec<(CandidateModel, Scores)>,

    pub selected_features: Vec<String>,
    pub target: String,
    pub n_samples: usize,

    /// The uploaded table reduced to the selected features plus the target.
    pub processed: Dataset,

    /// (actual, predicted) pairs from the best model on the test split.
    pub test_points: Vec<(f64, f64)>,
}

/// The regression model-selection routine the upload handler delegates to.
pub trait ModelSelector {
    fn analyze(
        &self,
        data_path: &Path,
        test_size: f64,
        k_best_features: usize,
    ) -> Result<AnalysisReport>;
}
