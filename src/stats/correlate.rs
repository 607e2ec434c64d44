//! Pairwise Pearson correlation across the numeric columns.
//!
//! Missing values are deleted pairwise: each pair of columns is correlated
//! over the rows where *both* cells are present. The matrix is symmetric with
//! a unit diagonal for columns with nonzero variance; degenerate pairs
//! (fewer than two complete rows, or zero variance on either side) yield
//! `None` rather than a bogus number.

use rayon::prelude::*;

use crate::domain::CorrelationMatrix;
use crate::frame::{Cell, Frame};

/// Compute the full correlation matrix over the frame's numeric columns.
///
/// The upper triangle (including the diagonal) is computed in parallel and
/// mirrored; output is deterministic regardless of thread scheduling.
pub fn correlate(frame: &Frame) -> CorrelationMatrix {
    let columns = frame.numeric_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let k = columns.len();

    let pairs: Vec<(usize, usize)> = (0..k)
        .flat_map(|i| (i..k).map(move |j| (i, j)))
        .collect();

    let computed: Vec<((usize, usize), Option<f64>)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = pearson_pairwise(&columns[i].cells, &columns[j].cells);
            ((i, j), r)
        })
        .collect();

    let mut values = vec![vec![None; k]; k];
    for ((i, j), r) in computed {
        values[i][j] = r;
        values[j][i] = r;
    }

    CorrelationMatrix {
        columns: names,
        values,
    }
}

/// Pearson correlation over rows where both cells are numeric.
pub fn pearson_pairwise(a: &[Cell], b: &[Cell]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(ca, cb)| Some((ca.as_num()?, cb.as_num()?)))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    // Guard against floating-point drift just outside [-1, 1].
    Some(r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    fn num_col(name: &str, values: &[Option<f64>]) -> Column {
        Column {
            name: name.to_string(),
            cells: values
                .iter()
                .map(|v| match v {
                    Some(x) => Cell::Num(*x),
                    None => Cell::Missing,
                })
                .collect(),
        }
    }

    #[test]
    fn perfect_linear_relation() {
        let a = num_col("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let b = num_col("b", &[Some(2.0), Some(4.0), Some(6.0)]);
        let r = pearson_pairwise(&a.cells, &b.cells).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let c = num_col("c", &[Some(3.0), Some(2.0), Some(1.0)]);
        let r = pearson_pairwise(&a.cells, &c.cells).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_values_are_deleted_pairwise() {
        // Row 2 is incomplete on `b`; the remaining pairs are perfectly linear.
        let a = num_col("a", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let b = num_col("b", &[Some(10.0), None, Some(30.0), Some(40.0)]);
        let r = pearson_pairwise(&a.cells, &b.cells).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_yields_none() {
        let a = num_col("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let b = num_col("b", &[Some(5.0), Some(5.0), Some(5.0)]);
        assert_eq!(pearson_pairwise(&a.cells, &b.cells), None);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let frame = Frame::from_columns(vec![
            num_col("a", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            num_col("b", &[Some(2.0), Some(1.0), Some(4.0), Some(3.0)]),
            num_col("c", &[Some(0.5), None, Some(2.5), Some(1.5)]),
        ])
        .unwrap();

        let m = correlate(&frame);
        assert_eq!(m.len(), 3);
        for i in 0..m.len() {
            assert!((m.get(i, i).unwrap() - 1.0).abs() < 1e-12);
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }
}
