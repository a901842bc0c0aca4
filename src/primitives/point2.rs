//! 2D point type.

use super::Vec2;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
///
/// Generic over floating-point types (`f32` or `f64`). Coverage computations
/// use `f64` with coordinates in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Computes the squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Returns `true` if the two points are within `eps` of each other.
    #[inline]
    pub fn approx_eq(self, other: Self, eps: F) -> bool {
        self.distance_squared(other) <= eps * eps
    }

    /// Linearly interpolates between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns the midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = F::one() + F::one();
        Self {
            x: (self.x + other.x) / two,
            y: (self.y + other.y) / two,
        }
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the larger of the absolute coordinate values.
    #[inline]
    pub fn max_abs(self) -> F {
        self.x.abs().max(self.y.abs())
    }
}

// Point - Point = Vec2
impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

// Point + Vec2 = Point
impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec2<F>) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl<F: Float> Default for Point2<F> {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_approx_eq() {
        let a: Point2<f64> = Point2::new(1.0, 1.0);
        assert!(a.approx_eq(Point2::new(1.0 + 1e-12, 1.0), 1e-9));
        assert!(!a.approx_eq(Point2::new(1.1, 1.0), 1e-9));
    }

    #[test]
    fn test_lerp_and_midpoint() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 6.0);
        assert_eq!(a.lerp(b, 0.5), Point2::new(5.0, 3.0));
        assert_eq!(a.midpoint(b), Point2::new(5.0, 3.0));
    }

    #[test]
    fn test_point_sub_point() {
        let a: Point2<f64> = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        let v = b - a;
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
        assert_eq!(a + v, b);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2::new(1.0_f64, -2.0).is_finite());
        assert!(!Point2::new(f64::NAN, 0.0).is_finite());
        assert!(!Point2::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(Point2::new(2.5_f64, -1.0).max_abs(), 2.5);
        assert_eq!(Point2::new(-4.0_f64, 3.0).max_abs(), 4.0);
    }
}
