//! Command-line parsing for the loan-default analysis tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the table/statistics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "loanstat",
    version,
    about = "Exploratory statistics for a loan-default dataset"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full run: describe, correlation + heatmap, regression, chi-square, ANOVA.
    Analyze(AnalyzeArgs),
    /// Normalize the table and print descriptive statistics only.
    Describe(InputArgs),
    /// Normalize the table and print the correlation matrix (and heatmap).
    Correlate(CorrelateArgs),
    /// Generate a seeded synthetic dataset CSV for demos and tests.
    Sample(SampleArgs),
}

/// Options shared by every command that reads a CSV.
#[derive(Debug, Parser, Clone)]
pub struct InputArgs {
    /// Path to the loan-default CSV.
    pub csv: PathBuf,
}

/// Options for the correlation-only command.
#[derive(Debug, Parser, Clone)]
pub struct CorrelateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Skip the text heatmap.
    #[arg(long)]
    pub no_heatmap: bool,
}

/// Options for the full analysis run.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Regression predictor columns (defaults to the numeric field set).
    #[arg(long, value_delimiter = ',')]
    pub predictors: Vec<String>,

    /// Regression target column.
    #[arg(long, default_value = "Default")]
    pub target: String,

    /// First column for the chi-square independence test.
    #[arg(long, default_value = "Education")]
    pub chi_a: String,

    /// Second column for the chi-square independence test.
    #[arg(long, default_value = "Default")]
    pub chi_b: String,

    /// Numeric column for the one-way ANOVA.
    #[arg(long, default_value = "Income")]
    pub anova_value: String,

    /// Grouping column for the one-way ANOVA.
    #[arg(long, default_value = "EmploymentType")]
    pub anova_group: String,

    /// Maximum IRLS iterations for the logistic fit.
    #[arg(long, default_value_t = 25)]
    pub max_iter: usize,

    /// IRLS convergence tolerance (max absolute coefficient update).
    #[arg(long, default_value_t = 1e-8)]
    pub tol: f64,

    /// Skip the text heatmap.
    #[arg(long)]
    pub no_heatmap: bool,

    /// Export the normalized table to CSV.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Export the full analysis results to JSON.
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

/// Options for synthetic dataset generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Number of rows to generate.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows with an out-of-codebook Education label.
    #[arg(long, default_value_t = 0.01)]
    pub unknown_label_rate: f64,
}
