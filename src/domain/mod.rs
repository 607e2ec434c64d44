//! Shared domain types: the fixed dataset schema, the categorical codebook,
//! run configuration, and analysis result types.

mod types;

pub use types::*;
