//! Schema constants, the categorical codebook, and analysis result types.
//!
//! These types are intentionally lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - exported to JSON for downstream tooling
//! - compared in tests without display formatting getting in the way

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifier column: carried through ingest, dropped before analysis,
/// never encoded or analyzed.
pub const ID_COLUMN: &str = "LoanID";

/// Default regression target.
pub const TARGET_COLUMN: &str = "Default";

/// Columns that must be present in the input header.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "LoanID",
    "Age",
    "Income",
    "LoanAmount",
    "CreditScore",
    "MonthsEmployed",
    "NumCreditLines",
    "InterestRate",
    "LoanTerm",
    "DTIRatio",
    "Education",
    "EmploymentType",
    "MaritalStatus",
    "HasMortgage",
    "HasDependents",
    "LoanPurpose",
    "HasCoSigner",
    "Default",
];

/// Columns coerced to numeric after categorical encoding.
///
/// This is the full analysis surface: the originally-numeric fields plus the
/// seven encoded categorical fields and the target.
pub const NUMERIC_COLUMNS: [&str; 17] = [
    "Age",
    "Income",
    "LoanAmount",
    "CreditScore",
    "MonthsEmployed",
    "NumCreditLines",
    "InterestRate",
    "LoanTerm",
    "DTIRatio",
    "Education",
    "EmploymentType",
    "MaritalStatus",
    "HasMortgage",
    "HasDependents",
    "LoanPurpose",
    "HasCoSigner",
    "Default",
];

/// Default predictor set for the logistic regression (originally-numeric
/// fields only; encoded categoricals can be added via `--predictors`).
pub const DEFAULT_PREDICTORS: [&str; 9] = [
    "Age",
    "Income",
    "LoanAmount",
    "CreditScore",
    "MonthsEmployed",
    "NumCreditLines",
    "InterestRate",
    "LoanTerm",
    "DTIRatio",
];

/// Ordered label → code pairs for one categorical column.
#[derive(Debug, Clone)]
pub struct ColumnCodes {
    pub column: &'static str,
    pub codes: &'static [(&'static str, i64)],
}

impl ColumnCodes {
    /// Exact-match lookup; unmapped labels yield `None` (the caller turns
    /// that into a missing-value marker, never an error).
    pub fn code_for(&self, label: &str) -> Option<i64> {
        self.codes
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, c)| *c)
    }
}

/// The fixed categorical codebook for the loan-default dataset.
///
/// One structure instead of seven scattered mapping tables, enumerated
/// explicitly so the encoding order and the exact codes are auditable in one
/// place.
#[derive(Debug, Clone)]
pub struct Codebook {
    pub entries: Vec<ColumnCodes>,
}

impl Codebook {
    /// The codes are reproduced bit-for-bit from the source dataset
    /// convention. Note the `HasMortgage` Yes/No inversion relative to
    /// `HasDependents`/`HasCoSigner`: it is preserved deliberately, since
    /// "fixing" it would silently change every downstream statistic.
    pub fn loan_default() -> Self {
        Self {
            entries: vec![
                ColumnCodes {
                    column: "Education",
                    codes: &[
                        ("High School", 1),
                        ("Bachelor's", 2),
                        ("Master's", 3),
                        ("PhD", 4),
                    ],
                },
                ColumnCodes {
                    column: "EmploymentType",
                    codes: &[
                        ("Unemployed", 1),
                        ("Self-employed", 2),
                        ("Part-time", 3),
                        ("Full-time", 4),
                    ],
                },
                ColumnCodes {
                    column: "MaritalStatus",
                    codes: &[("Single", 1), ("Married", 2), ("Divorced", 3)],
                },
                ColumnCodes {
                    column: "HasMortgage",
                    codes: &[("Yes", 0), ("No", 1)],
                },
                ColumnCodes {
                    column: "HasDependents",
                    codes: &[("Yes", 1), ("No", 0)],
                },
                ColumnCodes {
                    column: "LoanPurpose",
                    codes: &[
                        ("Auto", 1),
                        ("Business", 2),
                        ("Education", 3),
                        ("Home", 4),
                        ("Other", 5),
                    ],
                },
                ColumnCodes {
                    column: "HasCoSigner",
                    codes: &[("Yes", 1), ("No", 0)],
                },
            ],
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnCodes> {
        self.entries.iter().find(|e| e.column == column)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,

    pub predictors: Vec<String>,
    pub target: String,

    pub chi_a: String,
    pub chi_b: String,
    pub anova_value: String,
    pub anova_group: String,

    pub max_iter: usize,
    pub tol: f64,

    pub heatmap: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Per-column descriptive statistics (pandas `describe` contract: sample
/// std with ddof=1, linearly interpolated quartiles).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Count of non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; `None` when fewer than two observations.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Symmetric pairwise Pearson correlation matrix.
///
/// `values[i][j]` is `None` when the pairwise-complete sample is too small or
/// either column has zero variance over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values[i][j]
    }
}

/// One fitted regression term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// Logistic regression fit output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticFit {
    pub intercept: f64,
    pub coefficients: Vec<Coefficient>,
    /// Rows used after listwise deletion of incomplete cases.
    pub n_used: usize,
    pub iterations: usize,
    pub converged: bool,
    pub log_likelihood: f64,
}

/// Chi-square test of independence result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiSquareTest {
    pub column_a: String,
    pub column_b: String,
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
    /// Observations with both cells non-missing.
    pub n: usize,
}

/// One-way ANOVA result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnovaTest {
    pub value_column: String,
    pub group_column: String,
    pub f_statistic: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub p_value: f64,
    pub n_groups: usize,
    pub n: usize,
}

/// Everything a full `analyze` run computes, in exportable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub describe: Vec<ColumnSummary>,
    pub correlation: CorrelationMatrix,
    pub regression: LogisticFit,
    pub chi_square: ChiSquareTest,
    pub anova: AnovaTest,
}
