//! Grid coverage of a greenhouse perimeter.
//!
//! [`compute_coverage`] is the entry point. The pieces it is built from are
//! public for callers that want to classify cells one at a time.

mod classify;
mod engine;
mod report;

pub use classify::{CellClass, CellClassifier, ClassifiedCell};
pub use engine::compute_coverage;
pub use report::CoverageReport;
