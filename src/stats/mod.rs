//! Statistical routines over the normalized frame.
//!
//! Responsibilities:
//!
//! - per-column descriptive statistics (`describe`)
//! - pairwise Pearson correlation (`correlate`, parallel over column pairs)
//! - chi-square / F tail probabilities (`dist`)
//! - classical hypothesis tests (`hypothesis`)

pub mod correlate;
pub mod describe;
pub mod dist;
pub mod hypothesis;

pub use correlate::*;
pub use describe::*;
pub use hypothesis::*;
