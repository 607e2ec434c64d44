//! Seeded synthetic loan-application sample generation.
//!
//! The generator produces a frame shaped exactly like the raw CSV (all text
//! cells, same header), so the normal ingest → encode → coerce pipeline runs
//! on it unchanged. The default flag is drawn from a hidden logistic model so
//! the regression stage has a real signal to recover, and a small fraction of
//! rows carry an out-of-codebook label to exercise the missing-value path.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Codebook;
use crate::error::AppError;
use crate::frame::{Cell, Column, Frame};

#[derive(Debug, Clone, Copy)]
pub struct SampleOptions {
    pub n: usize,
    pub seed: u64,
    /// Fraction of rows given an `Education` label outside the codebook.
    pub unknown_label_rate: f64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            n: 1000,
            seed: 42,
            unknown_label_rate: 0.01,
        }
    }
}

/// Generate a raw (text-cell) synthetic frame.
pub fn generate_sample(opts: &SampleOptions) -> Result<Frame, AppError> {
    if opts.n == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }
    if !(0.0..1.0).contains(&opts.unknown_label_rate) {
        return Err(AppError::input("Unknown-label rate must be in [0, 1)."));
    }

    let book = Codebook::loan_default();
    let mut rng = StdRng::seed_from_u64(opts.seed);

    let income_noise = Normal::<f64>::new(0.0, 18_000.0)
        .map_err(|e| AppError::numeric(format!("Noise distribution error: {e}")))?;
    let score_noise = Normal::<f64>::new(0.0, 75.0)
        .map_err(|e| AppError::numeric(format!("Noise distribution error: {e}")))?;

    let mut columns: Vec<Column> = [
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
    ]
    .iter()
    .map(|name| Column {
        name: name.to_string(),
        cells: Vec::with_capacity(opts.n),
    })
    .collect();

    for i in 0..opts.n {
        let age = rng.gen_range(18..=70);
        let income = (55_000.0 + income_noise.sample(&mut rng)).max(12_000.0);
        let loan_amount = rng.gen_range(5_000.0..250_000.0_f64);
        let credit_score = (680.0 + score_noise.sample(&mut rng)).clamp(300.0, 850.0).round();
        let months_employed = rng.gen_range(0..=480);
        let num_credit_lines = rng.gen_range(1..=12);
        let interest_rate = rng.gen_range(2.0..28.0_f64);
        let loan_term = *[12, 24, 36, 48, 60].choose(&mut rng).unwrap_or(&36);
        let dti = rng.gen_range(0.05..0.90_f64);

        // Hidden default model: rate and leverage push risk up, credit score
        // pulls it down.
        let eta = -1.5 + 0.10 * (interest_rate - 11.0) - 0.006 * (credit_score - 680.0)
            + 2.0 * (dti - 0.40);
        let default = rng.gen_bool(1.0 / (1.0 + (-eta).exp()));

        let education = if rng.gen_bool(opts.unknown_label_rate) {
            "Vocational".to_string()
        } else {
            pick_label(&book, "Education", &mut rng)
        };

        let values: Vec<String> = vec![
            format!("LN{i:06}"),
            age.to_string(),
            format!("{income:.2}"),
            format!("{loan_amount:.2}"),
            format!("{credit_score:.0}"),
            months_employed.to_string(),
            num_credit_lines.to_string(),
            format!("{interest_rate:.2}"),
            loan_term.to_string(),
            format!("{dti:.2}"),
            education,
            pick_label(&book, "EmploymentType", &mut rng),
            pick_label(&book, "MaritalStatus", &mut rng),
            pick_label(&book, "HasMortgage", &mut rng),
            pick_label(&book, "HasDependents", &mut rng),
            pick_label(&book, "LoanPurpose", &mut rng),
            pick_label(&book, "HasCoSigner", &mut rng),
            if default { "1" } else { "0" }.to_string(),
        ];

        for (col, value) in columns.iter_mut().zip(values) {
            col.cells.push(Cell::Text(value));
        }
    }

    Frame::from_columns(columns)
}

fn pick_label(book: &Codebook, column: &str, rng: &mut StdRng) -> String {
    // Codebook coverage is asserted in domain tests; an empty entry here
    // would be a programming error, so fall back to an empty label rather
    // than panicking.
    book.get(column)
        .and_then(|codes| codes.codes.choose(rng))
        .map(|(label, _)| label.to_string())
        .unwrap_or_default()
}
