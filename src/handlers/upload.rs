//! CSV upload and analysis endpoint.

use std::fs;

use axum::extract::{Multipart, State};
use axum::response::Html;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{AnalysisReport, Scores};
use crate::models::Dataset;
use crate::{pages, plot, AppError, AppResult, AppState};

/// Fixed artifact names under the static dir, overwritten on every upload.
const PLOT_FILE: &str = "regression.svg";
const REPORT_FILE: &str = "report.json";

/// Canonical copy of the upload handed to the selection routine.
const UPLOAD_FILE: &str = "upload.csv";

/// Machine-readable copy of the last analysis, written next to the plot.
#[derive(Serialize)]
struct ReportSummary<'a> {
    best_model: String,
    scores: Scores,
    rankings: Vec<(String, Scores)>,
    selected_features: &'a [String],
    target: &'a str,
    n_samples: usize,
    generated_at: DateTime<Utc>,
}

impl<'a> ReportSummary<'a> {
    fn from_report(report: &'a AnalysisReport) -> Self {
        Self {
            best_model: report.best.to_string(),
            scores: report.best_scores,
            rankings: report
                .rankings
                .iter()
                .map(|(model, scores)| (model.to_string(), *scores))
                .collect(),
            selected_features: &report.selected_features,
            target: &report.target,
            n_samples: report.n_samples,
            generated_at: Utc::now(),
        }
    }
}

pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Html<String>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or(UPLOAD_FILE).to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidUpload(e.to_string()))?;
            upload = Some((file_name, data));
            break;
        }
    }
    let (file_name, data) = upload
        .ok_or_else(|| AppError::InvalidUpload("multipart field \"file\" is missing".to_string()))?;

    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(AppError::InvalidUpload(format!(
            "\"{file_name}\" is not a .csv file"
        )));
    }
    let text = String::from_utf8(data.to_vec())
        .map_err(|_| AppError::InvalidUpload("file content is not valid UTF-8".to_string()))?;

    let dataset = Dataset::from_reader(text.as_bytes())?;
    tracing::info!(
        rows = dataset.n_rows(),
        columns = dataset.n_cols(),
        file = %file_name,
        "received CSV upload"
    );

    // Persist a canonical copy for the selection routine, which takes a path.
    fs::create_dir_all(&state.config.data_dir)?;
    let data_path = state.config.data_dir.join(UPLOAD_FILE);
    dataset
        .write_csv(&data_path)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let report = state.selector.analyze(
        &data_path,
        state.config.test_size,
        state.config.k_best_features,
    )?;

    fs::create_dir_all(&state.config.static_dir)?;
    plot::render_scatter(&report.test_points, &state.config.static_dir.join(PLOT_FILE))?;

    let summary = serde_json::to_string_pretty(&ReportSummary::from_report(&report))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    fs::write(state.config.static_dir.join(REPORT_FILE), summary)?;

    tracing::info!(
        best = %report.best,
        r2 = report.best_scores.r2,
        "analysis complete"
    );

    Ok(Html(pages::result_page(
        &report,
        &format!("/static/{PLOT_FILE}"),
    )))
}
