//! Evaluation metrics and univariate feature scoring.

/// Root mean squared error.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (sum / actual.len() as f64).sqrt()
}

/// Coefficient of determination. 1.0 is a perfect fit; worse-than-mean
/// predictions go negative. A constant target yields non-finite output so
/// callers can filter it out.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return f64::NAN;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { f64::NEG_INFINITY };
    }
    1.0 - ss_res / ss_tot
}

/// Univariate F-statistic of a feature against the target, derived from the
/// Pearson correlation. Higher means more informative.
pub fn f_score(feature: &[f64], target: &[f64]) -> f64 {
    let n = feature.len();
    if n < 3 {
        return 0.0;
    }
    let r = pearson(feature, target);
    let r2 = (r * r).min(1.0 - 1e-12);
    r2 / (1.0 - r2) * (n as f64 - 2.0)
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        cov / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmse_of_exact_predictions_is_zero() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(rmse(&values, &values), 0.0);
    }

    #[test]
    fn rmse_of_constant_offset() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 3.0, 4.0];
        assert!((rmse(&actual, &predicted) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn r_squared_of_exact_fit_is_one() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((r_squared(&values, &values) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn r_squared_of_mean_prediction_is_zero() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        assert!(r_squared(&actual, &predicted).abs() < 1e-12);
    }

    #[test]
    fn f_score_prefers_correlated_features() {
        let target: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let informative: Vec<f64> = target.iter().map(|v| 2.0 * v + 1.0).collect();
        let noise: Vec<f64> = (0..30).map(|i| ((i * 31) % 7) as f64).collect();

        assert!(f_score(&informative, &target) > f_score(&noise, &target));
    }

    #[test]
    fn f_score_of_constant_feature_is_zero() {
        let target: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let constant = vec![5.0; 20];
        assert_eq!(f_score(&constant, &target), 0.0);
    }
}
