//! Polygon types, validation and clipping.
//!
//! This module provides:
//! - Signed area (shoelace) and point location with an explicit boundary class
//! - Perimeter validation: deduplication, degeneracy and self-intersection checks
//! - Sutherland–Hodgman clipping against axis-aligned rectangles
//!
//! # Example
//!
//! ```
//! use gridcover::bounds::Aabb2;
//! use gridcover::polygon::{clipped_area, Polygon};
//! use gridcover::Point2;
//!
//! let perimeter = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 6.0),
//!     Point2::new(0.0, 6.0),
//! ]);
//! let cell = Aabb2::new(Point2::new(8.0, 4.5), Point2::new(13.0, 7.5));
//!
//! let area: f64 = clipped_area(&perimeter, cell);
//! assert!((area - 3.0).abs() < 1e-12);
//! ```

mod clip;
mod core;
mod validate;

pub use clip::{clip_to_rect, clipped_area};
pub use core::{locate_point, polygon_area, polygon_signed_area, PointLocation, Polygon};
pub use validate::{
    find_self_intersection, is_simple, normalize_perimeter, remove_duplicate_vertices,
};
