//! Numeric kernels shared by the fitting code.

pub mod wls;

pub use wls::*;
