//! Model scoring.

/// Coefficient of determination between actual and predicted values.
///
/// `1 - SS_res / SS_tot`, at most 1 and unbounded below. When the actual
/// values have zero variance the ratio is undefined and the result is NaN
/// (or -inf for a non-zero residual); callers report the value as-is.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_scores_one() {
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(r2_score(&y, &y), 1.0);
    }

    #[test]
    fn mean_prediction_scores_zero() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        assert_relative_eq!(r2_score(&actual, &predicted), 0.0);
    }

    #[test]
    fn worse_than_mean_scores_negative() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [3.0, 2.0, 1.0];
        assert!(r2_score(&actual, &predicted) < 0.0);
    }

    #[test]
    fn constant_target_is_not_finite() {
        let actual = [2.0, 2.0, 2.0];
        assert!(!r2_score(&actual, &[1.0, 2.0, 3.0]).is_finite());
        assert!(r2_score(&actual, &actual).is_nan());
    }
}
