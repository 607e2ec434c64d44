//! `loanstat` library crate.
//!
//! The binary (`loanstat`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future notebook/report front-ends)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod frame;
pub mod io;
pub mod math;
pub mod report;
pub mod stats;
