//! Candidate regression models.

use serde::Serialize;

/// A candidate model with its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CandidateModel {
    LinearRegression,
    Ridge { lambda: f64 },
    Knn { k: usize },
}

impl CandidateModel {
    /// The sweep evaluated on every upload.
    pub fn sweep() -> Vec<CandidateModel> {
        vec![
            CandidateModel::LinearRegression,
            CandidateModel::Ridge { lambda: 0.1 },
            CandidateModel::Ridge { lambda: 1.0 },
            CandidateModel::Knn { k: 5 },
        ]
    }
}

impl std::fmt::Display for CandidateModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateModel::LinearRegression => write!(f, "LinearRegression"),
            CandidateModel::Ridge { lambda } => write!(f, "Ridge(lambda={:.2})", lambda),
            CandidateModel::Knn { k } => write!(f, "KNN(k={})", k),
        }
    }
}
