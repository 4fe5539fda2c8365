//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory the canonical copy of each upload is written to
    pub data_dir: PathBuf,

    /// Directory generated artifacts (plot, report) are served from
    pub static_dir: PathBuf,

    /// Held-out fraction handed to the model-selection routine
    pub test_size: f64,

    /// Number of features the selection routine keeps
    pub k_best_features: usize,

    /// Upload size cap in bytes
    pub max_upload_bytes: usize,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),

            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),

            test_size: env::var("TEST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.2),

            k_best_features: env::var("K_BEST_FEATURES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5 * 1024 * 1024),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
