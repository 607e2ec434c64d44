//! Model fitting.
//!
//! Currently a single model: logistic regression of the default flag on the
//! numeric predictor set, solved by IRLS on top of `math::wls`.

pub mod logistic;

pub use logistic::*;
