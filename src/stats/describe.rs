//! Per-column descriptive statistics.
//!
//! Matches the usual dataframe `describe` contract: non-missing count, mean,
//! sample standard deviation (ddof = 1), min, linearly interpolated
//! 25/50/75th percentiles, max. Missing cells are simply excluded.

use crate::domain::ColumnSummary;
use crate::frame::Frame;

/// Summarize every numeric column of the frame, in column order.
pub fn describe(frame: &Frame) -> Vec<ColumnSummary> {
    frame
        .numeric_columns()
        .iter()
        .map(|col| summarize(&col.name, &col.numeric_values()))
        .collect()
}

fn summarize(name: &str, values: &[f64]) -> ColumnSummary {
    let count = values.len();
    if count == 0 {
        return ColumnSummary {
            name: name.to_string(),
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Some((ss / (count as f64 - 1.0)).sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ColumnSummary {
        name: name.to_string(),
        count,
        mean: Some(mean),
        std,
        min: Some(sorted[0]),
        q25: Some(quantile(&sorted, 0.25)),
        median: Some(quantile(&sorted, 0.50)),
        q75: Some(quantile(&sorted, 0.75)),
        max: Some(sorted[count - 1]),
    }
}

/// Linearly interpolated quantile over an ascending-sorted slice.
///
/// `pos = q * (n - 1)`; the result interpolates between the two bracketing
/// order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let pos = q * (n as f64 - 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
