//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the normalization + analysis pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, CorrelateArgs, InputArgs, SampleArgs};
use crate::data::{SampleOptions, generate_sample};
use crate::domain::{AnalysisConfig, DEFAULT_PREDICTORS};
use crate::error::AppError;
use crate::io::export::{write_frame_csv, write_results_json};
use crate::report;
use crate::stats::{correlate, describe};

pub mod pipeline;

/// Entry point for the `loanstat` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Describe(args) => handle_describe(args),
        Command::Correlate(args) => handle_correlate(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    println!(
        "{}",
        report::format_ingest_summary(&config.csv_path.display().to_string(), &run.report)
    );
    println!("{}", report::format_describe(&run.results.describe));
    println!("{}", report::format_correlation(&run.results.correlation));
    if config.heatmap {
        println!("{}", report::render_heatmap(&run.results.correlation));
    }
    println!(
        "{}",
        report::format_regression(&run.results.regression, &config.target)
    );
    println!("{}", report::format_chi_square(&run.results.chi_square));
    println!("{}", report::format_anova(&run.results.anova));

    if let Some(path) = &config.export_csv {
        write_frame_csv(path, &run.frame)?;
    }
    if let Some(path) = &config.export_json {
        write_results_json(path, &run.results)?;
    }

    Ok(())
}

fn handle_describe(args: InputArgs) -> Result<(), AppError> {
    let (frame, report_facts) = pipeline::load_normalized(&args.csv)?;
    println!(
        "{}",
        report::format_ingest_summary(&args.csv.display().to_string(), &report_facts)
    );
    println!("{}", report::format_describe(&describe(&frame)));
    Ok(())
}

fn handle_correlate(args: CorrelateArgs) -> Result<(), AppError> {
    let (frame, report_facts) = pipeline::load_normalized(&args.input.csv)?;
    println!(
        "{}",
        report::format_ingest_summary(&args.input.csv.display().to_string(), &report_facts)
    );
    let matrix = correlate(&frame);
    println!("{}", report::format_correlation(&matrix));
    if !args.no_heatmap {
        println!("{}", report::render_heatmap(&matrix));
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let frame = generate_sample(&SampleOptions {
        n: args.count,
        seed: args.seed,
        unknown_label_rate: args.unknown_label_rate,
    })?;
    write_frame_csv(&args.out, &frame)?;
    println!(
        "Wrote {} synthetic rows to {}",
        frame.n_rows(),
        args.out.display()
    );
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    let predictors = if args.predictors.is_empty() {
        DEFAULT_PREDICTORS.iter().map(|s| s.to_string()).collect()
    } else {
        args.predictors.clone()
    };

    AnalysisConfig {
        csv_path: args.input.csv.clone(),
        predictors,
        target: args.target.clone(),
        chi_a: args.chi_a.clone(),
        chi_b: args.chi_b.clone(),
        anova_value: args.anova_value.clone(),
        anova_group: args.anova_group.clone(),
        max_iter: args.max_iter,
        tol: args.tol,
        heatmap: !args.no_heatmap,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    }
}
