//! Export the normalized table and analysis results.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts: the CSV mirrors the normalized frame cell-for-cell (missing cells
//! become empty fields), and the JSON is the full `AnalysisResults` tree.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::AnalysisResults;
use crate::error::AppError;
use crate::frame::{Cell, Frame};

/// Write a frame to CSV. Missing cells are written as empty fields.
pub fn write_frame_csv(path: &Path, frame: &Frame) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create CSV '{}': {e}", path.display())))?;

    writeln!(file, "{}", frame.column_names().join(","))
        .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for row in 0..frame.n_rows() {
        let fields: Vec<String> = frame
            .columns()
            .iter()
            .map(|col| format_cell(&col.cells[row]))
            .collect();
        writeln!(file, "{}", fields.join(","))
            .map_err(|e| AppError::input(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the full analysis results as pretty-printed JSON.
pub fn write_results_json(path: &Path, results: &AnalysisResults) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, results)
        .map_err(|e| AppError::input(format!("Failed to write results JSON: {e}")))?;
    Ok(())
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => {
            if s.contains(',') || s.contains('"') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.clone()
            }
        }
        // f64 Display renders integral codes without a trailing ".0".
        Cell::Num(v) => format!("{v}"),
        Cell::Missing => String::new(),
    }
}
