//! Grid cell geometry requested by the caller.

use crate::error::CoverageError;
use crate::primitives::Point2;
use serde::{Deserialize, Serialize};

/// Default cell width in meters.
pub const DEFAULT_CELL_WIDTH: f64 = 5.0;
/// Default cell height in meters.
pub const DEFAULT_CELL_HEIGHT: f64 = 3.0;

/// Cell size and anchor of the coverage grid.
///
/// When `origin` is `None` the grid is anchored at the minimum corner of the
/// perimeter's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub cell_width: f64,
    pub cell_height: f64,
    #[serde(default)]
    pub origin: Option<Point2<f64>>,
}

impl GridSpec {
    /// Creates a grid with the given cell size, anchored at the bounding box.
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
            origin: None,
        }
    }

    /// The standard 5 m x 3 m greenhouse grid.
    pub fn greenhouse() -> Self {
        Self::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT)
    }

    /// Anchors the grid at a fixed point instead of the bounding box.
    pub fn with_origin(mut self, origin: Point2<f64>) -> Self {
        self.origin = Some(origin);
        self
    }

    #[inline]
    pub fn cell_area(&self) -> f64 {
        self.cell_width * self.cell_height
    }

    /// Checks that the cell size is positive and finite and the origin is finite.
    pub fn validate(&self) -> Result<(), CoverageError> {
        let size_ok = self.cell_width.is_finite()
            && self.cell_height.is_finite()
            && self.cell_width > 0.0
            && self.cell_height > 0.0;
        let origin_ok = self.origin.map_or(true, |o| o.is_finite());

        if size_ok && origin_ok {
            Ok(())
        } else {
            Err(CoverageError::InvalidGrid {
                width: self.cell_width,
                height: self.cell_height,
            })
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::greenhouse()
    }
}
