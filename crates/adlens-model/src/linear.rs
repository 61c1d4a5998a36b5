//! Ordinary least-squares ROMI regression.

use crate::error::Result;
use crate::features::FeatureTable;
use crate::score::r2_score;
use crate::split::TrainTestSplit;
use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use serde::Serialize;

/// Fit summary for the linear variant.
#[derive(Debug, Clone, Serialize)]
pub struct LinearReport {
    /// R² on the held-out partition.
    pub r_squared: f64,
    /// Fitted coefficient per feature, in feature order.
    pub coefficients: Vec<(String, f64)>,
    /// Fitted intercept.
    pub intercept: f64,
    /// Actual ROMI values of the held-out rows.
    pub actual: Vec<f64>,
    /// Predicted ROMI values for the held-out rows, same order.
    pub predicted: Vec<f64>,
}

/// Fit OLS on the training partition and score it on the held-out one.
///
/// The held-out actual/predicted pairs are kept in the report so the
/// reporter can draw the prediction scatter. A held-out partition with a
/// constant target yields a non-finite R² which is reported as-is.
pub fn fit_linear(table: &FeatureTable, split: &TrainTestSplit) -> Result<LinearReport> {
    let train = table.select(&split.train);
    let test = table.select(&split.test);

    let x_train = to_matrix(&train)?;
    let y_train = Array1::from_vec(train.target.clone());
    let dataset = Dataset::new(x_train, y_train).with_feature_names(table.names.clone());

    let model = LinearRegression::new().fit(&dataset)?;

    let x_test = to_matrix(&test)?;
    let predicted: Vec<f64> = model.predict(&x_test).to_vec();
    let r_squared = r2_score(&test.target, &predicted);

    let coefficients = table
        .names
        .iter()
        .zip(model.params().iter())
        .map(|(name, &coef)| (name.clone(), coef))
        .collect();

    Ok(LinearReport {
        r_squared,
        coefficients,
        intercept: model.intercept(),
        actual: test.target,
        predicted,
    })
}

fn to_matrix(table: &FeatureTable) -> Result<Array2<f64>> {
    let flat: Vec<f64> = table.rows.iter().flatten().copied().collect();
    Ok(Array2::from_shape_vec(
        (table.n_rows(), table.n_features()),
        flat,
    )?)
}
