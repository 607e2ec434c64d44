//! Shared analysis pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> encode categoricals -> coerce numerics -> drop identifier ->
//! describe/correlate/fit/tests
//!
//! The CLI front-end then focuses on presentation (printing and exports).

use std::path::Path;

use crate::domain::{
    AnalysisConfig, AnalysisResults, Codebook, ID_COLUMN, NUMERIC_COLUMNS,
};
use crate::error::AppError;
use crate::fit::{LogisticOptions, fit_logistic};
use crate::frame::Frame;
use crate::io::ingest::{IngestReport, load_frame};
use crate::stats::{chi_square_independence, correlate, describe, one_way_anova};

/// All computed outputs of a single `analyze` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub frame: Frame,
    pub report: IngestReport,
    pub results: AnalysisResults,
}

/// Load a CSV and normalize it per the fixed schema.
///
/// Encoding happens before coercion (the coercion list includes the freshly
/// coded categorical columns); the identifier is dropped last since it is
/// unrelated to either.
pub fn load_normalized(path: &Path) -> Result<(Frame, IngestReport), AppError> {
    let (raw, report) = load_frame(path)?;
    let frame = normalize(&raw)?;
    Ok((frame, report))
}

/// Apply the fixed normalization pipeline to a raw (text-cell) frame.
pub fn normalize(raw: &Frame) -> Result<Frame, AppError> {
    let book = Codebook::loan_default();

    let mut frame = raw.clone();
    for entry in &book.entries {
        frame = frame.encode_categorical(entry)?;
    }
    frame = frame.coerce_numeric(&NUMERIC_COLUMNS)?;
    frame.drop_column(ID_COLUMN)
}

/// Execute the full analysis and return the computed outputs.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let (frame, report) = load_normalized(&config.csv_path)?;

    let describe = describe(&frame);
    let correlation = correlate(&frame);

    let regression = fit_logistic(
        &frame,
        &config.predictors,
        &config.target,
        LogisticOptions {
            max_iter: config.max_iter,
            tol: config.tol,
        },
    )?;

    let chi_square = chi_square_independence(&frame, &config.chi_a, &config.chi_b)?;
    let anova = one_way_anova(&frame, &config.anova_value, &config.anova_group)?;

    Ok(RunOutput {
        frame,
        report,
        results: AnalysisResults {
            describe,
            correlation,
            regression,
            chi_square,
            anova,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleOptions, generate_sample};
    use crate::frame::Cell;

    #[test]
    fn normalize_encodes_coerces_and_drops_id() {
        let raw = generate_sample(&SampleOptions {
            n: 40,
            seed: 3,
            unknown_label_rate: 0.0,
        })
        .unwrap();

        let frame = normalize(&raw).unwrap();
        assert!(!frame.has_column("LoanID"));
        assert_eq!(frame.n_rows(), 40);
        assert_eq!(frame.n_columns(), raw.n_columns() - 1);

        // Every analysis column is numeric after normalization.
        for name in NUMERIC_COLUMNS {
            let col = frame.column(name).unwrap();
            assert!(col.is_numeric(), "{name} not numeric");
        }

        // Education codes stay inside the codebook range.
        for cell in &frame.column("Education").unwrap().cells {
            match cell {
                Cell::Num(v) => assert!((1.0..=4.0).contains(v)),
                Cell::Missing => {}
                other => panic!("unexpected cell {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_labels_survive_as_missing_not_errors() {
        let raw = generate_sample(&SampleOptions {
            n: 200,
            seed: 11,
            unknown_label_rate: 0.2,
        })
        .unwrap();

        let frame = normalize(&raw).unwrap();
        let education = frame.column("Education").unwrap();
        assert!(education.missing_count() > 0);
        assert!(education.missing_count() < frame.n_rows());
    }
}
