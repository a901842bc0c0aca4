//! Epsilon-aware geometric predicates.
//!
//! Predicates take an explicit distance tolerance; [`Tolerance`] derives
//! that tolerance from the scale of the input so there is exactly one
//! epsilon policy for the whole crate.

mod predicates;
mod scale;

pub use predicates::{
    orient2d, point_on_segment, segments_intersect, Orientation, SegmentIntersection,
};
pub use scale::{Tolerance, RELATIVE_EPSILON};
