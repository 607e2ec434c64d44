//! CSV ingest and schema validation.
//!
//! This module turns a loan-application CSV into a raw `Frame` of text cells
//! that the normalization pipeline can encode and coerce.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Whole-file failure on malformed CSV** (this is a batch tool; a broken
//!   record means a broken export, not a row to skip)
//! - **Deterministic behavior** (column order preserved from the header)

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::REQUIRED_COLUMNS;
use crate::error::AppError;
use crate::frame::{Cell, Column, Frame};

/// Summary facts about the ingested file, for the run header.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub rows_read: usize,
    pub n_columns: usize,
}

/// Load the full record set into memory as text cells.
///
/// Empty fields become `Cell::Missing` immediately; every other value stays a
/// string until `coerce_numeric` runs.
pub fn load_frame(path: &Path) -> Result<(Frame, IngestReport), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let names: Vec<String> = headers.iter().map(clean_header_name).collect();
    ensure_required_columns(&names)?;

    let mut columns: Vec<Column> = names
        .iter()
        .map(|name| Column {
            name: name.clone(),
            cells: Vec::new(),
        })
        .collect();

    let mut rows_read = 0usize;
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, and CSV lines are 1-based.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::input(format!("Malformed CSV at line {line}: {e}")))?;
        push_record(&mut columns, &record, line)?;
        rows_read += 1;
    }

    if rows_read == 0 {
        return Err(AppError::no_data("CSV contains no data rows."));
    }

    let n_columns = columns.len();
    let frame = Frame::from_columns(columns)?;
    Ok((frame, IngestReport { rows_read, n_columns }))
}

fn push_record(columns: &mut [Column], record: &StringRecord, line: usize) -> Result<(), AppError> {
    if record.len() != columns.len() {
        return Err(AppError::input(format!(
            "Malformed CSV at line {line}: expected {} fields, found {}.",
            columns.len(),
            record.len()
        )));
    }
    for (col, field) in columns.iter_mut().zip(record.iter()) {
        let cell = if field.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        };
        col.cells.push(cell);
    }
    Ok(())
}

fn clean_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿LoanID"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn ensure_required_columns(names: &[String]) -> Result<(), AppError> {
    let present: HashSet<&str> = names.iter().map(String::as_str).collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::input(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )))
    }
}
