//! The in-memory record table (`Frame`) and its normalization operations.
//!
//! This is the core of the tool: a small columnar table with an explicit
//! missing-value marker, transformed by value (each operation returns a new
//! `Frame`) so every stage of the pipeline can be tested in isolation.
//!
//! Design goals:
//! - **Cell-level problems never abort**: an unmapped label or unparseable
//!   numeric becomes `Cell::Missing`, not an error.
//! - **Column-level problems are fatal**: operating on a column that does not
//!   exist is a schema bug and fails with exit code 2.
//! - **Deterministic behavior**: no hidden state, column order is preserved.

use crate::domain::ColumnCodes;
use crate::error::AppError;

/// One table cell. `Missing` is distinct from zero and from the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Num(f64),
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell; `Text` and `Missing` yield `None`.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Cell::Num(v) => Some(*v),
            _ => None,
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    /// A column is treated as numeric once it contains no text cells and at
    /// least one actual number (an all-missing column carries no information).
    pub fn is_numeric(&self) -> bool {
        let mut any_num = false;
        for cell in &self.cells {
            match cell {
                Cell::Text(_) => return false,
                Cell::Num(_) => any_num = true,
                Cell::Missing => {}
            }
        }
        any_num
    }

    /// Non-missing numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_num).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }
}

/// A columnar record table. All columns share one row count.
#[derive(Debug, Clone)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Build a frame from columns, validating the shared row count.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, AppError> {
        if let Some(first) = columns.first() {
            let n = first.cells.len();
            for col in &columns {
                if col.cells.len() != n {
                    return Err(AppError::input(format!(
                        "Column `{}` has {} rows, expected {}.",
                        col.name,
                        col.cells.len(),
                        n
                    )));
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    fn require_column(&self, name: &str) -> Result<usize, AppError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| AppError::input(format!("Column not found: `{name}`")))
    }

    /// Columns usable by `describe`/`correlate` after normalization.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    /// Replace string labels in one column with their integer codes.
    ///
    /// Labels absent from the codebook entry become `Missing` (silent, so a
    /// single bad row cannot abort the run). Cells that are already numeric
    /// or missing pass through unchanged, which makes re-encoding harmless.
    pub fn encode_categorical(&self, codes: &ColumnCodes) -> Result<Frame, AppError> {
        let idx = self.require_column(codes.column)?;

        let mut columns = self.columns.clone();
        for cell in &mut columns[idx].cells {
            if let Cell::Text(label) = cell {
                *cell = match codes.code_for(label) {
                    Some(code) => Cell::Num(code as f64),
                    None => Cell::Missing,
                };
            }
        }
        Frame::from_columns(columns)
    }

    /// Coerce the listed columns to numeric.
    ///
    /// Text cells that parse as finite floats become `Num`; everything else
    /// becomes `Missing`. Never fails for bad individual values, and applying
    /// it twice is the same as applying it once.
    pub fn coerce_numeric(&self, names: &[&str]) -> Result<Frame, AppError> {
        for name in names {
            self.require_column(name)?;
        }

        let mut columns = self.columns.clone();
        for col in &mut columns {
            if !names.contains(&col.name.as_str()) {
                continue;
            }
            for cell in &mut col.cells {
                if let Cell::Text(s) = cell {
                    *cell = match s.trim().parse::<f64>() {
                        Ok(v) if v.is_finite() => Cell::Num(v),
                        _ => Cell::Missing,
                    };
                }
            }
        }
        Frame::from_columns(columns)
    }

    /// Remove a named column entirely. Row count is unchanged.
    pub fn drop_column(&self, name: &str) -> Result<Frame, AppError> {
        let idx = self.require_column(name)?;
        let mut columns = self.columns.clone();
        columns.remove(idx);
        Frame::from_columns(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Codebook;

    fn text_col(name: &str, values: &[&str]) -> Column {
        Column {
            name: name.to_string(),
            cells: values.iter().map(|v| Cell::Text(v.to_string())).collect(),
        }
    }

    #[test]
    fn mismatched_column_lengths_are_rejected() {
        let err = Frame::from_columns(vec![
            text_col("A", &["1", "2"]),
            text_col("B", &["1"]),
        ])
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn encode_known_labels_to_codes() {
        let book = Codebook::loan_default();
        let frame = Frame::from_columns(vec![text_col(
            "Education",
            &["High School", "Bachelor's", "Master's", "PhD"],
        )])
        .unwrap();

        let encoded = frame
            .encode_categorical(book.get("Education").unwrap())
            .unwrap();
        let cells = &encoded.column("Education").unwrap().cells;
        assert_eq!(
            cells,
            &vec![Cell::Num(1.0), Cell::Num(2.0), Cell::Num(3.0), Cell::Num(4.0)]
        );
    }

    #[test]
    fn encode_unknown_label_becomes_missing() {
        let book = Codebook::loan_default();
        let frame =
            Frame::from_columns(vec![text_col("Education", &["Associate", "PhD"])]).unwrap();

        let encoded = frame
            .encode_categorical(book.get("Education").unwrap())
            .unwrap();
        let cells = &encoded.column("Education").unwrap().cells;
        assert_eq!(cells[0], Cell::Missing);
        assert_eq!(cells[1], Cell::Num(4.0));
    }

    #[test]
    fn encode_missing_column_is_fatal() {
        let book = Codebook::loan_default();
        let frame = Frame::from_columns(vec![text_col("Age", &["30"])]).unwrap();
        let err = frame
            .encode_categorical(book.get("Education").unwrap())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn spec_example_row_encodes_exactly() {
        let book = Codebook::loan_default();
        let mut frame = Frame::from_columns(vec![
            text_col("Education", &["PhD"]),
            text_col("EmploymentType", &["Full-time"]),
            text_col("MaritalStatus", &["Divorced"]),
            text_col("HasMortgage", &["No"]),
            text_col("LoanPurpose", &["Home"]),
            text_col("HasDependents", &["Yes"]),
            text_col("HasCoSigner", &["No"]),
        ])
        .unwrap();

        for entry in &book.entries {
            frame = frame.encode_categorical(entry).unwrap();
        }

        let expect = [
            ("Education", 4.0),
            ("EmploymentType", 4.0),
            ("MaritalStatus", 3.0),
            ("HasMortgage", 1.0),
            ("LoanPurpose", 4.0),
            ("HasDependents", 1.0),
            ("HasCoSigner", 0.0),
        ];
        for (name, code) in expect {
            assert_eq!(
                frame.column(name).unwrap().cells[0],
                Cell::Num(code),
                "{name}"
            );
        }
    }

    #[test]
    fn coerce_numeric_marks_bad_values_missing() {
        let frame = Frame::from_columns(vec![text_col("Age", &["25", "", "abc", "40.5"])]).unwrap();
        let coerced = frame.coerce_numeric(&["Age"]).unwrap();
        let cells = &coerced.column("Age").unwrap().cells;
        assert_eq!(cells[0], Cell::Num(25.0));
        assert_eq!(cells[1], Cell::Missing);
        assert_eq!(cells[2], Cell::Missing);
        assert_eq!(cells[3], Cell::Num(40.5));
    }

    #[test]
    fn coerce_numeric_is_idempotent() {
        let frame = Frame::from_columns(vec![text_col("Age", &["25", "x", "40.5"])]).unwrap();
        let once = frame.coerce_numeric(&["Age"]).unwrap();
        let twice = once.coerce_numeric(&["Age"]).unwrap();
        assert_eq!(
            once.column("Age").unwrap().cells,
            twice.column("Age").unwrap().cells
        );
    }

    #[test]
    fn drop_column_removes_exactly_one_column() {
        let frame = Frame::from_columns(vec![
            text_col("LoanID", &["a", "b"]),
            text_col("Age", &["1", "2"]),
        ])
        .unwrap();

        let dropped = frame.drop_column("LoanID").unwrap();
        assert_eq!(dropped.n_columns(), frame.n_columns() - 1);
        assert_eq!(dropped.n_rows(), frame.n_rows());
        assert!(!dropped.has_column("LoanID"));

        let err = dropped.drop_column("LoanID").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn numeric_column_detection() {
        let frame = Frame::from_columns(vec![text_col("Age", &["25", "x"])]).unwrap();
        assert!(frame.numeric_columns().is_empty());

        let coerced = frame.coerce_numeric(&["Age"]).unwrap();
        let numeric = coerced.numeric_columns();
        assert_eq!(numeric.len(), 1);
        assert_eq!(numeric[0].missing_count(), 1);
        assert_eq!(numeric[0].numeric_values(), vec![25.0]);
    }
}
