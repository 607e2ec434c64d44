//! Reporting: all terminal formatting lives here.
//!
//! Keeping formatting in one place means:
//! - the stats/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;
pub mod heatmap;

pub use format::*;
pub use heatmap::*;
