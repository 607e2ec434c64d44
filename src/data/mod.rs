//! Data sources.
//!
//! The only source besides a real CSV is the seeded synthetic generator,
//! which lets the full pipeline run (and be tested) without the dataset.

pub mod sample;

pub use sample::*;
