//! Weighted least squares solver.
//!
//! The logistic fitter repeatedly solves small weighted linear systems of
//! the form:
//!
//! ```text
//! minimize Σ w_i (z_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - Rows are scaled by `sqrt(w_i)` and the problem is solved as ordinary
//!   least squares.
//! - SVD is used so tall (rows > columns) and near-collinear systems are
//!   handled robustly; IRLS weights can get very small for well-separated
//!   observations, which makes the design matrix ill-conditioned.
//! - The parameter dimension is tiny (≤ ~20 columns), so SVD cost is noise.

use nalgebra::{DMatrix, DVector};

/// Solve the weighted least squares problem for β.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_weighted_least_squares(
    x: &DMatrix<f64>,
    z: &DVector<f64>,
    weights: &DVector<f64>,
) -> Option<DVector<f64>> {
    debug_assert_eq!(x.nrows(), z.len());
    debug_assert_eq!(x.nrows(), weights.len());

    let mut xs = x.clone();
    let mut zs = z.clone();
    for i in 0..x.nrows() {
        let s = weights[i].max(0.0).sqrt();
        for j in 0..x.ncols() {
            xs[(i, j)] *= s;
        }
        zs[i] *= s;
    }

    let svd = xs.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(&zs, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_weights_reduce_to_ols() {
        // Fit z = 2 + 3x on x = [0, 1, 2].
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let z = DVector::from_row_slice(&[2.0, 5.0, 8.0]);
        let w = DVector::from_element(3, 1.0);

        let beta = solve_weighted_least_squares(&x, &z, &w).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn heavy_weight_pulls_the_fit() {
        // Two inconsistent observations of a constant; the heavier one wins
        // in proportion to its weight.
        let x = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let z = DVector::from_row_slice(&[0.0, 10.0]);
        let w = DVector::from_row_slice(&[1.0, 3.0]);

        let beta = solve_weighted_least_squares(&x, &z, &w).unwrap();
        assert!((beta[0] - 7.5).abs() < 1e-10);
    }
}
