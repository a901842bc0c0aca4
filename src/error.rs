//! Error types for coverage computations.

use thiserror::Error;

/// Errors returned by [`compute_coverage`](crate::compute_coverage) and the
/// perimeter validator.
///
/// All input problems are detected before any grid work begins. None of these
/// are transient: the same input always produces the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverageError {
    /// Fewer than 3 distinct vertices, or the enclosed area is zero.
    #[error("perimeter has no area")]
    DegeneratePolygon,

    /// The perimeter crosses or touches itself.
    #[error("perimeter crosses itself between edges {first_edge} and {second_edge}")]
    SelfIntersectingPolygon {
        /// Index of the first offending edge (edge `i` runs from vertex `i` to `i + 1`).
        first_edge: usize,
        /// Index of the second offending edge.
        second_edge: usize,
    },

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the vertex in the caller's input.
        index: usize,
    },

    /// Cell size is not positive and finite, or the origin is not finite.
    #[error("invalid grid: cell size {width} x {height}")]
    InvalidGrid {
        /// Requested cell width.
        width: f64,
        /// Requested cell height.
        height: f64,
    },

    /// Covering the perimeter needs more cells than a single report may hold.
    #[error("grid of {columns} x {rows} cells exceeds the {max} cell limit")]
    GridTooLarge {
        /// Columns needed to cover the bounding box.
        columns: f64,
        /// Rows needed to cover the bounding box.
        rows: f64,
        /// Largest allowed cell count.
        max: usize,
    },

    /// The origin is so far from the perimeter that cell indices lose precision.
    #[error("cell index ({column}, {row}) is out of range")]
    GridIndexOutOfRange {
        /// Index of the leftmost column relative to the origin.
        column: f64,
        /// Index of the bottom row relative to the origin.
        row: f64,
    },

    /// A geometric invariant was violated while clipping.
    ///
    /// Indicates a bug in the primitives rather than bad input.
    #[error("internal geometry error: {0}")]
    InternalGeometry(String),
}

impl CoverageError {
    /// Returns `true` for errors caused by the drawn perimeter itself.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoverageError::DegeneratePolygon
                | CoverageError::SelfIntersectingPolygon { .. }
                | CoverageError::NonFiniteCoordinate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CoverageError::DegeneratePolygon.to_string(),
            "perimeter has no area"
        );
        assert_eq!(
            CoverageError::SelfIntersectingPolygon {
                first_edge: 0,
                second_edge: 2
            }
            .to_string(),
            "perimeter crosses itself between edges 0 and 2"
        );
    }

    #[test]
    fn test_user_errors() {
        assert!(CoverageError::DegeneratePolygon.is_user_error());
        assert!(CoverageError::NonFiniteCoordinate { index: 1 }.is_user_error());
        assert!(!CoverageError::InternalGeometry("clip".into()).is_user_error());
        assert!(!CoverageError::InvalidGrid {
            width: 0.0,
            height: 3.0
        }
        .is_user_error());
        assert!(!CoverageError::GridTooLarge {
            columns: 1e10,
            rows: 6e9,
            max: 10_000_000
        }
        .is_user_error());
    }

    #[test]
    fn test_grid_limit_messages() {
        assert_eq!(
            CoverageError::GridTooLarge {
                columns: 4000.0,
                rows: 3000.0,
                max: 10_000_000
            }
            .to_string(),
            "grid of 4000 x 3000 cells exceeds the 10000000 cell limit"
        );
        assert_eq!(
            CoverageError::GridIndexOutOfRange {
                column: -1e16,
                row: 0.0
            }
            .to_string(),
            "cell index (-10000000000000000, 0) is out of range"
        );
    }
}
