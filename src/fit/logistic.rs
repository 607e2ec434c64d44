//! Logistic regression via iteratively reweighted least squares (IRLS).
//!
//! Each IRLS step is a weighted least squares solve on the working response,
//! so the whole fitter rides on `math::wls`:
//!
//! ```text
//! p_i = σ(x_i^T β)
//! w_i = p_i (1 - p_i)
//! z_i = x_i^T β + (y_i - p_i) / w_i
//! β  ← argmin Σ w_i (z_i - x_i^T β)^2
//! ```
//!
//! Rows with a missing cell in any predictor or the target are dropped
//! (listwise deletion). The target must be strictly binary 0/1 over the rows
//! that survive.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Coefficient, LogisticFit};
use crate::error::AppError;
use crate::frame::Frame;
use crate::math::solve_weighted_least_squares;

/// Minimum number of extra observations beyond parameter count.
const MIN_N_BUFFER: usize = 5;

/// Floor for IRLS weights; keeps the working response finite when the model
/// saturates.
const WEIGHT_FLOOR: f64 = 1e-10;

#[derive(Debug, Clone, Copy)]
pub struct LogisticOptions {
    pub max_iter: usize,
    /// Convergence threshold on the max absolute coefficient update.
    pub tol: f64,
}

impl Default for LogisticOptions {
    fn default() -> Self {
        Self {
            max_iter: 25,
            tol: 1e-8,
        }
    }
}

/// Fit `target ~ intercept + predictors` on the complete cases of the frame.
pub fn fit_logistic(
    frame: &Frame,
    predictors: &[String],
    target: &str,
    opts: LogisticOptions,
) -> Result<LogisticFit, AppError> {
    if predictors.is_empty() {
        return Err(AppError::input("Regression needs at least one predictor."));
    }

    let (x, y) = build_design(frame, predictors, target)?;
    let n = x.nrows();
    let k = x.ncols();
    if n < k + MIN_N_BUFFER {
        return Err(AppError::numeric(format!(
            "Underdetermined regression: n={n} complete rows for {k} parameters."
        )));
    }

    let mut beta = DVector::zeros(k);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < opts.max_iter {
        iterations += 1;

        let eta = &x * &beta;
        let p = eta.map(sigmoid);

        let mut weights = DVector::zeros(n);
        let mut z = DVector::zeros(n);
        for i in 0..n {
            let w = (p[i] * (1.0 - p[i])).max(WEIGHT_FLOOR);
            weights[i] = w;
            z[i] = eta[i] + (y[i] - p[i]) / w;
        }

        let next = solve_weighted_least_squares(&x, &z, &weights).ok_or_else(|| {
            AppError::numeric("Singular system in logistic regression (collinear predictors?).")
        })?;

        let step = (&next - &beta).abs().max();
        beta = next;
        if step < opts.tol {
            converged = true;
            break;
        }
    }

    let log_likelihood = log_likelihood(&x, &y, &beta);
    if !log_likelihood.is_finite() {
        return Err(AppError::numeric(
            "Non-finite log-likelihood after logistic fit.",
        ));
    }

    let coefficients = predictors
        .iter()
        .enumerate()
        .map(|(j, name)| Coefficient {
            name: name.clone(),
            value: beta[j + 1],
        })
        .collect();

    Ok(LogisticFit {
        intercept: beta[0],
        coefficients,
        n_used: n,
        iterations,
        converged,
        log_likelihood,
    })
}

/// Predicted default probability for one raw predictor row (test helper and
/// future scoring surface).
pub fn predict_proba(fit: &LogisticFit, values: &[f64]) -> f64 {
    let eta = fit.intercept
        + fit
            .coefficients
            .iter()
            .zip(values.iter())
            .map(|(c, v)| c.value * v)
            .sum::<f64>();
    sigmoid(eta)
}

/// Design matrix with a leading intercept column, over complete cases only.
fn build_design(
    frame: &Frame,
    predictors: &[String],
    target: &str,
) -> Result<(DMatrix<f64>, DVector<f64>), AppError> {
    let mut cols = Vec::with_capacity(predictors.len());
    for name in predictors {
        let col = frame
            .column(name)
            .ok_or_else(|| AppError::input(format!("Column not found: `{name}`")))?;
        cols.push(col);
    }
    let target_col = frame
        .column(target)
        .ok_or_else(|| AppError::input(format!("Column not found: `{target}`")))?;

    let mut rows: Vec<f64> = Vec::new();
    let mut y: Vec<f64> = Vec::new();

    'rows: for i in 0..frame.n_rows() {
        let Some(t) = target_col.cells[i].as_num() else {
            continue;
        };
        let mut row = Vec::with_capacity(predictors.len() + 1);
        row.push(1.0);
        for col in &cols {
            match col.cells[i].as_num() {
                Some(v) => row.push(v),
                None => continue 'rows,
            }
        }
        if t != 0.0 && t != 1.0 {
            return Err(AppError::numeric(format!(
                "Regression target `{target}` must be binary 0/1 (found {t})."
            )));
        }
        rows.extend_from_slice(&row);
        y.push(t);
    }

    if y.is_empty() {
        return Err(AppError::no_data(
            "No complete rows available for regression.",
        ));
    }

    let k = predictors.len() + 1;
    let x = DMatrix::from_row_slice(y.len(), k, &rows);
    Ok((x, DVector::from_vec(y)))
}

fn sigmoid(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

fn log_likelihood(x: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>) -> f64 {
    let eta = x * beta;
    let mut ll = 0.0;
    for i in 0..y.len() {
        let p = sigmoid(eta[i]).clamp(1e-15, 1.0 - 1e-15);
        ll += y[i] * p.ln() + (1.0 - y[i]) * (1.0 - p).ln();
    }
    ll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Cell, Column};

    fn frame_from(x: &[f64], y: &[f64]) -> Frame {
        Frame::from_columns(vec![
            Column {
                name: "X".to_string(),
                cells: x.iter().map(|v| Cell::Num(*v)).collect(),
            },
            Column {
                name: "Default".to_string(),
                cells: y.iter().map(|v| Cell::Num(*v)).collect(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn recovers_a_monotone_relation() {
        // Outcome flips from 0 to 1 as x grows, with overlap in the middle so
        // the MLE stays finite.
        let x = [
            -3.0, -2.5, -2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, -0.25, 0.25,
        ];
        let y = [
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0,
        ];
        let frame = frame_from(&x, &y);

        let fit = fit_logistic(
            &frame,
            &["X".to_string()],
            "Default",
            LogisticOptions::default(),
        )
        .unwrap();

        assert!(fit.converged);
        assert_eq!(fit.n_used, 15);
        assert!(fit.coefficients[0].value > 0.0);
        assert!(predict_proba(&fit, &[3.0]) > 0.9);
        assert!(predict_proba(&fit, &[-3.0]) < 0.1);
        assert!(fit.log_likelihood < 0.0);
    }

    #[test]
    fn listwise_deletion_drops_incomplete_rows() {
        let mut frame = frame_from(
            &[-2.0, -1.0, -0.5, 0.5, 1.0, 2.0, -1.5, 1.5, -0.25, 0.25, -2.5, 2.5],
            &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0],
        );
        // Punch a hole in one predictor cell.
        let frame2 = {
            let mut cols = frame.columns().to_vec();
            cols[0].cells[0] = Cell::Missing;
            Frame::from_columns(cols).unwrap()
        };
        frame = frame2;

        let fit = fit_logistic(
            &frame,
            &["X".to_string()],
            "Default",
            LogisticOptions::default(),
        )
        .unwrap();
        assert_eq!(fit.n_used, 11);
    }

    #[test]
    fn non_binary_target_is_fatal() {
        let frame = frame_from(&[1.0, 2.0, 3.0], &[0.0, 1.0, 2.0]);
        let err = fit_logistic(
            &frame,
            &["X".to_string()],
            "Default",
            LogisticOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn too_few_rows_is_fatal() {
        let frame = frame_from(&[1.0, 2.0], &[0.0, 1.0]);
        let err = fit_logistic(
            &frame,
            &["X".to_string()],
            "Default",
            LogisticOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
