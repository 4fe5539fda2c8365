//! Default implementation of the model-selection routine.

use std::cmp::Ordering;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::models::{Dataset, NumericColumn};

use super::metrics::{f_score, r_squared, rmse};
use super::{AnalysisError, AnalysisReport, CandidateModel, ModelSelector, Result, Scores};

/// Minimum rows before a train/test split makes any sense.
const MIN_SAMPLES: usize = 10;

/// Candidate-sweep model selection: score the numeric features against the
/// target (last CSV column), keep the best k, fit every candidate on a train
/// split and rank by R-squared on the held-out rows.
#[derive(Debug, Clone, Default)]
pub struct AutomatedRegression;

impl AutomatedRegression {
    pub fn new() -> Self {
        Self
    }
}

impl ModelSelector for AutomatedRegression {
    fn analyze(
        &self,
        data_path: &Path,
        test_size: f64,
        k_best_features: usize,
    ) -> Result<AnalysisReport> {
        let dataset = Dataset::from_path(data_path)?;
        let numeric = dataset.numeric_columns();

        let target_name = dataset
            .headers()
            .last()
            .cloned()
            .unwrap_or_default();
        let target = numeric
            .iter()
            .find(|c| c.name == target_name)
            .ok_or_else(|| AnalysisError::TargetNotNumeric(target_name.clone()))?
            .values
            .clone();

        let n = target.len();
        if n < MIN_SAMPLES {
            return Err(AnalysisError::InsufficientData {
                required: MIN_SAMPLES,
                actual: n,
            });
        }

        // Univariate scoring; keep the k most informative features.
        let mut scored: Vec<(&NumericColumn, f64)> = numeric
            .iter()
            .filter(|c| c.name != target_name)
            .map(|c| (c, f_score(&c.values, &target)))
            .collect();
        if scored.is_empty() {
            return Err(AnalysisError::NoUsableFeatures);
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let k = k_best_features.clamp(1, scored.len());
        let selected: Vec<&NumericColumn> = scored.iter().take(k).map(|(c, _)| *c).collect();
        let selected_names: Vec<String> = selected.iter().map(|c| c.name.clone()).collect();

        // Row-major feature matrix in selected-column order.
        let matrix: Vec<Vec<f64>> = (0..n)
            .map(|i| selected.iter().map(|c| c.values[i]).collect())
            .collect();

        let (train_idx, test_idx) = split_indices(n, test_size);

        // Standardize on train statistics. OLS is scale-free but ridge and
        // KNN are not.
        let (means, stds) = column_stats(&matrix, &train_idx);
        let scaled: Vec<Vec<f64>> = matrix
            .iter()
            .map(|row| standardize(row, &means, &stds))
            .collect();

        let gather = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
            (
                idx.iter().map(|&i| scaled[i].clone()).collect(),
                idx.iter().map(|&i| target[i]).collect(),
            )
        };
        let (x_train, y_train) = gather(&train_idx);
        let (x_test, y_test) = gather(&test_idx);

        let mut evaluated: Vec<(CandidateModel, Scores, Vec<f64>)> = Vec::new();
        for candidate in CandidateModel::sweep() {
            let Some(predicted) = fit_predict(candidate, &x_train, &y_train, &x_test) else {
                continue;
            };
            let scores = Scores {
                r2: r_squared(&y_test, &predicted),
                rmse: rmse(&y_test, &predicted),
            };
            if scores.r2.is_finite() && scores.rmse.is_finite() {
                evaluated.push((candidate, scores, predicted));
            }
        }
        evaluated.sort_by(|a, b| b.1.r2.partial_cmp(&a.1.r2).unwrap_or(Ordering::Equal));

        let (best, best_scores, best_predicted) = match evaluated.first() {
            Some(entry) => entry.clone(),
            None => {
                return Err(AnalysisError::NoValidModels(
                    "every candidate failed to fit".to_string(),
                ))
            }
        };

        let test_points: Vec<(f64, f64)> =
            y_test.iter().copied().zip(best_predicted).collect();

        let mut processed_columns = selected_names.clone();
        processed_columns.push(target_name.clone());
        let processed = dataset.select(&processed_columns);

        Ok(AnalysisReport {
            best,
            best_scores,
            rankings: evaluated.into_iter().map(|(c, s, _)| (c, s)).collect(),
            selected_features: selected_names,
            target: target_name,
            n_samples: n,
            processed,
            test_points,
        })
    }
}

/// Shuffle row indices and split off the test fraction. The test split is
/// never empty and the train split keeps at least two rows.
fn split_indices(n: usize, test_size: f64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut thread_rng());

    let ratio = test_size.clamp(0.05, 0.5);
    let n_test = ((n as f64 * ratio).round() as usize).clamp(1, n - 2);

    let (test, train) = indices.split_at(n_test);
    (train.to_vec(), test.to_vec())
}

fn column_stats(matrix: &[Vec<f64>], train_idx: &[usize]) -> (Vec<f64>, Vec<f64>) {
    let dims = matrix[0].len();
    let n = train_idx.len() as f64;

    let mut means = vec![0.0; dims];
    for &i in train_idx {
        for (m, v) in means.iter_mut().zip(&matrix[i]) {
            *m += v;
        }
    }
    for m in &mut means {
        *m /= n;
    }

    let mut stds = vec![0.0; dims];
    for &i in train_idx {
        for (s, (v, m)) in stds.iter_mut().zip(matrix[i].iter().zip(&means)) {
            *s += (v - m).powi(2);
        }
    }
    for s in &mut stds {
        *s = (*s / n).sqrt();
        if *s < 1e-12 {
            *s = 1.0;
        }
    }

    (means, stds)
}

fn standardize(row: &[f64], means: &[f64], stds: &[f64]) -> Vec<f64> {
    row.iter()
        .zip(means.iter().zip(stds))
        .map(|(v, (m, s))| (v - m) / s)
        .collect()
}

fn fit_predict(
    candidate: CandidateModel,
    x_train: &[Vec<f64>],
    y_train: &[f64],
    x_test: &[Vec<f64>],
) -> Option<Vec<f64>> {
    match candidate {
        CandidateModel::LinearRegression => linear_predict(x_train, y_train, x_test, 0.0),
        CandidateModel::Ridge { lambda } => linear_predict(x_train, y_train, x_test, lambda),
        CandidateModel::Knn { k } => Some(knn_predict(x_train, y_train, x_test, k)),
    }
}

/// Solve the (ridge-regularized) normal equations and predict the test rows.
/// The intercept is carried as a leading ones-column and is not penalized.
fn linear_predict(
    x_train: &[Vec<f64>],
    y_train: &[f64],
    x_test: &[Vec<f64>],
    lambda: f64,
) -> Option<Vec<f64>> {
    let dims = x_train.first()?.len() + 1;

    let mut xtx = vec![vec![0.0; dims]; dims];
    let mut xty = vec![0.0; dims];
    for (row, &y) in x_train.iter().zip(y_train) {
        let mut aug = Vec::with_capacity(dims);
        aug.push(1.0);
        aug.extend_from_slice(row);

        for i in 0..dims {
            for j in 0..dims {
                xtx[i][j] += aug[i] * aug[j];
            }
            xty[i] += aug[i] * y;
        }
    }
    for i in 1..dims {
        xtx[i][i] += lambda;
    }

    let coeffs = solve(xtx, xty)?;
    Some(
        x_test
            .iter()
            .map(|row| {
                coeffs[0]
                    + row
                        .iter()
                        .zip(&coeffs[1..])
                        .map(|(v, c)| v * c)
                        .sum::<f64>()
            })
            .collect(),
    )
}

/// Gaussian elimination with partial pivoting. `None` when the system is
/// singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for col in (0..n).rev() {
        let tail: f64 = ((col + 1)..n).map(|k| a[col][k] * x[k]).sum();
        x[col] = (b[col] - tail) / a[col][col];
    }
    Some(x)
}

/// Mean of the k nearest train targets by Euclidean distance.
fn knn_predict(x_train: &[Vec<f64>], y_train: &[f64], x_test: &[Vec<f64>], k: usize) -> Vec<f64> {
    let k = k.clamp(1, x_train.len());

    x_test
        .iter()
        .map(|row| {
            let mut distances: Vec<(f64, f64)> = x_train
                .iter()
                .zip(y_train)
                .map(|(train_row, &y)| {
                    let dist: f64 = row
                        .iter()
                        .zip(train_row)
                        .map(|(a, b)| (a - b).powi(2))
                        .sum();
                    (dist, y)
                })
                .collect();
            distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            distances.iter().take(k).map(|(_, y)| y).sum::<f64>() / k as f64
        })
        .collect()
}
