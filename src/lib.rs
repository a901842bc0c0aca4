//! gridcover - Grid coverage of greenhouse perimeters
//!
//! Lays a regular grid (5 m x 3 m by default) over a drawn perimeter and
//! classifies every cell as fully inside, partially inside or outside, with
//! the covered area of each cell and the overall coverage ratio.
//!
//! ```
//! use gridcover::{compute_coverage, CellClass, GridSpec, Point2};
//!
//! let triangle = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(0.0, 6.0),
//! ];
//! let report = compute_coverage(&triangle, &GridSpec::greenhouse()).unwrap();
//!
//! assert_eq!(report.cells_of(CellClass::Partial).count(), 2);
//! assert!((report.covered_area - 30.0).abs() < 1e-9);
//! ```

pub mod bounds;
pub mod coverage;
pub mod error;
pub mod grid;
pub mod polygon;
pub mod primitives;
pub mod session;
pub mod settings;
pub mod tolerance;

pub use coverage::{compute_coverage, CellClass, ClassifiedCell, CoverageReport};
pub use error::CoverageError;
pub use grid::{GridCell, GridLayout, GridSpec};
pub use polygon::Polygon;
pub use primitives::{Point2, Segment2, Vec2};
pub use session::{CoverageSession, SessionError};
pub use settings::{CoverageSettings, SettingsError};
pub use tolerance::Tolerance;
