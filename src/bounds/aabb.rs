//! Axis-aligned rectangles: bounding boxes and grid cells.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners. Grid cells are `Aabb2<f64>`
/// values as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb = aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    #[inline]
    pub fn area(self) -> F {
        self.width() * self.height()
    }

    /// Returns `true` if either side is not longer than `eps`.
    #[inline]
    pub fn is_degenerate(self, eps: F) -> bool {
        !(self.width() > eps && self.height() > eps)
    }

    /// The four corners in counter-clockwise order, starting at `min`.
    #[inline]
    pub fn corners(self) -> [Point2<F>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Returns a new AABB expanded to include the given point.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Moves every side inwards by `d`.
    ///
    /// Returns `None` if the box collapses.
    #[inline]
    pub fn shrink(self, d: F) -> Option<Self> {
        let min = Point2::new(self.min.x + d, self.min.y + d);
        let max = Point2::new(self.max.x - d, self.max.y - d);
        if min.x <= max.x && min.y <= max.y {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Clips a segment to this (closed) box with the Liang–Barsky algorithm.
    ///
    /// Returns the parameter interval `(t0, t1)` of the part of the segment
    /// inside the box, or `None` if the segment misses it.
    pub fn clip_segment(self, segment: Segment2<F>) -> Option<(F, F)> {
        let d = segment.direction();
        let s = segment.start;

        let checks = [
            (-d.x, s.x - self.min.x),
            (d.x, self.max.x - s.x),
            (-d.y, s.y - self.min.y),
            (d.y, self.max.y - s.y),
        ];

        let mut t0 = F::zero();
        let mut t1 = F::one();

        for (p, q) in checks {
            if p == F::zero() {
                // Parallel to this side: entirely in or out.
                if q < F::zero() {
                    return None;
                }
            } else {
                let r = q / p;
                if p < F::zero() {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
                if t0 > t1 {
                    return None;
                }
            }
        }

        Some((t0, t1))
    }

    /// Length of the part of `segment` lying inside this box.
    pub fn clipped_length(self, segment: Segment2<F>) -> F {
        match self.clip_segment(segment) {
            Some((t0, t1)) => (t1 - t0) * segment.length(),
            None => F::zero(),
        }
    }
}
