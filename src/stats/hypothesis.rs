//! Classical hypothesis tests over frame columns.
//!
//! Both tests operate on the normalized (numeric) frame:
//!
//! - chi-square independence over the contingency table of two coded columns
//! - one-way ANOVA of a numeric column partitioned by a coded group column
//!
//! Rows with a missing cell in either involved column are excluded. Degenerate
//! inputs (a single level, empty groups, zero within-group variance) are
//! fatal with exit code 4; there is no local recovery, matching the batch
//! fire-and-forget contract.

use crate::domain::{AnovaTest, ChiSquareTest};
use crate::error::AppError;
use crate::frame::Frame;
use crate::stats::dist::{chi_square_sf, f_sf};

/// Chi-square test of independence between two coded columns.
pub fn chi_square_independence(
    frame: &Frame,
    column_a: &str,
    column_b: &str,
) -> Result<ChiSquareTest, AppError> {
    let pairs = complete_pairs(frame, column_a, column_b)?;
    if pairs.is_empty() {
        return Err(AppError::no_data(format!(
            "No complete observations for `{column_a}` x `{column_b}`."
        )));
    }

    let levels_a = distinct_levels(pairs.iter().map(|(a, _)| *a));
    let levels_b = distinct_levels(pairs.iter().map(|(_, b)| *b));
    if levels_a.len() < 2 || levels_b.len() < 2 {
        return Err(AppError::numeric(format!(
            "Chi-square needs at least two levels on each side; `{column_a}` has {}, `{column_b}` has {}.",
            levels_a.len(),
            levels_b.len()
        )));
    }

    let r = levels_a.len();
    let c = levels_b.len();
    let mut observed = vec![vec![0.0_f64; c]; r];
    for (a, b) in &pairs {
        let i = level_index(&levels_a, *a);
        let j = level_index(&levels_b, *b);
        observed[i][j] += 1.0;
    }

    let n = pairs.len() as f64;
    let row_totals: Vec<f64> = observed.iter().map(|row| row.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..c).map(|j| observed.iter().map(|row| row[j]).sum()).collect();

    let mut statistic = 0.0;
    for i in 0..r {
        for j in 0..c {
            // Margins are positive by construction, so expected > 0.
            let expected = row_totals[i] * col_totals[j] / n;
            let diff = observed[i][j] - expected;
            statistic += diff * diff / expected;
        }
    }

    let df = (r - 1) * (c - 1);
    Ok(ChiSquareTest {
        column_a: column_a.to_string(),
        column_b: column_b.to_string(),
        statistic,
        df,
        p_value: chi_square_sf(statistic, df),
        n: pairs.len(),
    })
}

/// One-way ANOVA of `value_column` across the levels of `group_column`.
pub fn one_way_anova(
    frame: &Frame,
    value_column: &str,
    group_column: &str,
) -> Result<AnovaTest, AppError> {
    let pairs = complete_pairs(frame, group_column, value_column)?;
    if pairs.is_empty() {
        return Err(AppError::no_data(format!(
            "No complete observations for `{value_column}` by `{group_column}`."
        )));
    }

    let levels = distinct_levels(pairs.iter().map(|(g, _)| *g));
    let k = levels.len();
    if k < 2 {
        return Err(AppError::numeric(format!(
            "ANOVA needs at least two groups; `{group_column}` has {k}."
        )));
    }

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); k];
    for (g, v) in &pairs {
        groups[level_index(&levels, *g)].push(*v);
    }

    let n = pairs.len();
    let df_within = n - k;
    if df_within == 0 {
        return Err(AppError::numeric(
            "ANOVA has zero within-group degrees of freedom.",
        ));
    }

    let grand_mean = pairs.iter().map(|(_, v)| v).sum::<f64>() / n as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let gn = group.len() as f64;
        let mean = group.iter().sum::<f64>() / gn;
        ss_between += gn * (mean - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    }

    if ss_within <= 0.0 {
        return Err(AppError::numeric(
            "ANOVA within-group variance is zero; F is undefined.",
        ));
    }

    let df_between = k - 1;
    let f_statistic = (ss_between / df_between as f64) / (ss_within / df_within as f64);

    Ok(AnovaTest {
        value_column: value_column.to_string(),
        group_column: group_column.to_string(),
        f_statistic,
        df_between,
        df_within,
        p_value: f_sf(f_statistic, df_between, df_within),
        n_groups: k,
        n,
    })
}

/// Row-aligned numeric pairs from two columns, skipping rows where either
/// cell is missing (or still text).
fn complete_pairs(frame: &Frame, a: &str, b: &str) -> Result<Vec<(f64, f64)>, AppError> {
    let col_a = frame
        .column(a)
        .ok_or_else(|| AppError::input(format!("Column not found: `{a}`")))?;
    let col_b = frame
        .column(b)
        .ok_or_else(|| AppError::input(format!("Column not found: `{b}`")))?;

    Ok(col_a
        .cells
        .iter()
        .zip(col_b.cells.iter())
        .filter_map(|(ca, cb)| Some((ca.as_num()?, cb.as_num()?)))
        .collect())
}

/// Sorted distinct level values (coded categoricals are small exact floats,
/// so bitwise comparison via total order is safe here).
fn distinct_levels(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut levels: Vec<f64> = values.collect();
    levels.sort_by(f64::total_cmp);
    levels.dedup_by(|a, b| a == b);
    levels
}

fn level_index(levels: &[f64], value: f64) -> usize {
    levels
        .binary_search_by(|probe| probe.total_cmp(&value))
        .unwrap_or_else(|i| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Cell, Column};

    fn num_col(name: &str, values: &[f64]) -> Column {
        Column {
            name: name.to_string(),
            cells: values.iter().map(|v| Cell::Num(*v)).collect(),
        }
    }

    fn frame_of(columns: Vec<Column>) -> Frame {
        Frame::from_columns(columns).unwrap()
    }

    #[test]
    fn chi_square_2x2_known_table() {
        // Contingency table [[10, 20], [20, 10]]: statistic 20/3, df 1.
        let mut a = Vec::new();
        let mut b = Vec::new();
        for (level_a, level_b, count) in
            [(1.0, 0.0, 10), (1.0, 1.0, 20), (2.0, 0.0, 20), (2.0, 1.0, 10)]
        {
            for _ in 0..count {
                a.push(level_a);
                b.push(level_b);
            }
        }
        let frame = frame_of(vec![num_col("A", &a), num_col("B", &b)]);

        let test = chi_square_independence(&frame, "A", "B").unwrap();
        assert_eq!(test.df, 1);
        assert_eq!(test.n, 60);
        assert!((test.statistic - 20.0 / 3.0).abs() < 1e-12);
        assert!((test.p_value - chi_square_sf(20.0 / 3.0, 1)).abs() < 1e-15);
        assert!(test.p_value < 0.05);
    }

    #[test]
    fn chi_square_independent_columns_have_zero_statistic() {
        // Perfectly proportional table: no association.
        let mut a = Vec::new();
        let mut b = Vec::new();
        for (level_a, level_b, count) in
            [(1.0, 0.0, 10), (1.0, 1.0, 10), (2.0, 0.0, 20), (2.0, 1.0, 20)]
        {
            for _ in 0..count {
                a.push(level_a);
                b.push(level_b);
            }
        }
        let frame = frame_of(vec![num_col("A", &a), num_col("B", &b)]);

        let test = chi_square_independence(&frame, "A", "B").unwrap();
        assert!(test.statistic.abs() < 1e-12);
        assert!((test.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn chi_square_single_level_is_fatal() {
        let frame = frame_of(vec![
            num_col("A", &[1.0, 1.0, 1.0]),
            num_col("B", &[0.0, 1.0, 0.0]),
        ]);
        let err = chi_square_independence(&frame, "A", "B").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn anova_known_groups() {
        // Groups {1,2,3}, {2,3,4}, {5,6,7}: F = 13 with df (2, 6).
        let group = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0];
        let value = [1.0, 2.0, 3.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let frame = frame_of(vec![num_col("G", &group), num_col("V", &value)]);

        let test = one_way_anova(&frame, "V", "G").unwrap();
        assert_eq!(test.n_groups, 3);
        assert_eq!(test.df_between, 2);
        assert_eq!(test.df_within, 6);
        assert!((test.f_statistic - 13.0).abs() < 1e-12);
        // Closed form for d1 = 2: (1 + 2f/d2)^(-d2/2) = (6/32)^3.
        assert!((test.p_value - (6.0_f64 / 32.0).powi(3)).abs() < 1e-12);
    }

    #[test]
    fn anova_skips_rows_with_missing_cells() {
        let frame = frame_of(vec![
            Column {
                name: "G".to_string(),
                cells: vec![Cell::Num(1.0), Cell::Missing, Cell::Num(2.0), Cell::Num(2.0), Cell::Num(1.0)],
            },
            Column {
                name: "V".to_string(),
                cells: vec![Cell::Num(1.0), Cell::Num(9.0), Cell::Num(4.0), Cell::Num(5.0), Cell::Num(2.0)],
            },
        ]);

        let test = one_way_anova(&frame, "V", "G").unwrap();
        assert_eq!(test.n, 4);
        assert_eq!(test.n_groups, 2);
    }

    #[test]
    fn anova_zero_within_variance_is_fatal() {
        let frame = frame_of(vec![
            num_col("G", &[1.0, 1.0, 2.0, 2.0]),
            num_col("V", &[3.0, 3.0, 7.0, 7.0]),
        ]);
        let err = one_way_anova(&frame, "V", "G").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
