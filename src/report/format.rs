//! Formatted terminal output for every analysis stage.

use crate::domain::{AnovaTest, ChiSquareTest, ColumnSummary, CorrelationMatrix, LogisticFit};
use crate::io::ingest::IngestReport;

/// Width of the column-name gutter in tables.
const NAME_WIDTH: usize = 15;

/// Width of one numeric table cell.
const CELL_WIDTH: usize = 12;

/// Format the run header (file facts).
pub fn format_ingest_summary(path_display: &str, report: &IngestReport) -> String {
    let mut out = String::new();
    out.push_str("=== loanstat - Loan Default Exploratory Analysis ===\n");
    out.push_str(&format!("Input: {path_display}\n"));
    out.push_str(&format!(
        "Rows: {} | Columns: {}\n",
        report.rows_read, report.n_columns
    ));
    out
}

/// Format the descriptive-statistics table (one row per numeric column).
pub fn format_describe(summaries: &[ColumnSummary]) -> String {
    let mut out = String::new();
    out.push_str("Descriptive statistics:\n");
    out.push_str(&format!(
        "{:<NAME_WIDTH$} {:>10} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$}\n",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    ));

    for s in summaries {
        out.push_str(&format!(
            "{:<NAME_WIDTH$} {:>10} {} {} {} {} {} {} {}\n",
            truncate(&s.name, NAME_WIDTH),
            s.count,
            fmt_opt(s.mean),
            fmt_opt(s.std),
            fmt_opt(s.min),
            fmt_opt(s.q25),
            fmt_opt(s.median),
            fmt_opt(s.q75),
            fmt_opt(s.max),
        ));
    }
    out
}

/// Format the correlation matrix as a numeric table.
///
/// Column headers are abbreviated to keep rows within a terminal width;
/// the row gutter carries the full (truncated) names.
pub fn format_correlation(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    out.push_str("Pearson correlation (pairwise complete):\n");

    out.push_str(&format!("{:<NAME_WIDTH$}", ""));
    for name in &matrix.columns {
        out.push_str(&format!(" {:>7}", truncate(name, 7)));
    }
    out.push('\n');

    for (i, name) in matrix.columns.iter().enumerate() {
        out.push_str(&format!("{:<NAME_WIDTH$}", truncate(name, NAME_WIDTH)));
        for j in 0..matrix.len() {
            match matrix.get(i, j) {
                Some(r) => out.push_str(&format!(" {r:>7.3}")),
                None => out.push_str(&format!(" {:>7}", "-")),
            }
        }
        out.push('\n');
    }
    out
}

/// Format the logistic regression summary.
pub fn format_regression(fit: &LogisticFit, target: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Logistic regression: {target} ~ predictors\n"));
    out.push_str(&format!(
        "n={} | iterations={} | converged={} | log-likelihood={:.4}\n",
        fit.n_used, fit.iterations, fit.converged, fit.log_likelihood
    ));
    out.push_str(&format!(
        "{:<NAME_WIDTH$} {:>14}\n",
        "term", "coefficient"
    ));
    out.push_str(&format!(
        "{:<NAME_WIDTH$} {:>14.6}\n",
        "(intercept)", fit.intercept
    ));
    for c in &fit.coefficients {
        out.push_str(&format!(
            "{:<NAME_WIDTH$} {:>14.6}\n",
            truncate(&c.name, NAME_WIDTH),
            c.value
        ));
    }
    out
}

/// Format the chi-square test summary.
pub fn format_chi_square(test: &ChiSquareTest) -> String {
    format!(
        "Chi-square independence: {} x {}\nn={} | chi2={:.4} | df={} | p-value={}\n",
        test.column_a,
        test.column_b,
        test.n,
        test.statistic,
        test.df,
        fmt_p(test.p_value)
    )
}

/// Format the one-way ANOVA summary.
pub fn format_anova(test: &AnovaTest) -> String {
    format!(
        "One-way ANOVA: {} by {}\nn={} | groups={} | F={:.4} | df=({}, {}) | p-value={}\n",
        test.value_column,
        test.group_column,
        test.n,
        test.n_groups,
        test.f_statistic,
        test.df_between,
        test.df_within,
        fmt_p(test.p_value)
    )
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:>CELL_WIDTH$.4}"),
        None => format!("{:>CELL_WIDTH$}", "-"),
    }
}

fn fmt_p(p: f64) -> String {
    if p < 1e-4 {
        format!("{p:.3e}")
    } else {
        format!("{p:.4}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
