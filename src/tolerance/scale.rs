//! Scale-aware tolerance shared by every coverage computation.

use crate::primitives::Point2;
use num_traits::Float;

/// Relative tolerance applied to the largest coordinate magnitude.
pub const RELATIVE_EPSILON: f64 = 1e-9;

/// An absolute distance tolerance derived from the input's coordinate scale.
///
/// One `Tolerance` is built per computation and passed down to every
/// predicate, so all boundary and equality tests agree with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<F> {
    eps: F,
}

impl<F: Float> Tolerance<F> {
    /// Creates a tolerance with an explicit absolute epsilon.
    #[inline]
    pub fn new(eps: F) -> Self {
        Self { eps: eps.abs() }
    }

    /// Creates a tolerance of `1e-9 * max(1, |largest coordinate|)`.
    pub fn for_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2<F>>,
        F: 'a,
    {
        let magnitude = points
            .into_iter()
            .filter(|p| p.is_finite())
            .fold(F::one(), |acc, p| acc.max(p.max_abs()));
        let relative = F::from(RELATIVE_EPSILON).unwrap_or_else(F::epsilon);
        Self::new(relative * magnitude)
    }

    /// The absolute distance tolerance.
    #[inline]
    pub fn eps(self) -> F {
        self.eps
    }

    /// Area of a sliver `eps` wide running around a `width` x `height` cell.
    ///
    /// Clipped areas closer than this to zero or to the full cell area are
    /// rounding noise. The threshold is a band of width `eps` along the cell's
    /// sides, not `eps * eps`: with metre-scale cells `eps * eps` falls below
    /// the rounding error of the clipped area itself.
    #[inline]
    pub fn sliver_area(self, width: F, height: F) -> F {
        let two = F::one() + F::one();
        self.eps * two * (width.abs() + height.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_small_coordinates_use_unit_scale() {
        let points = [Point2::new(0.0_f64, 0.0), Point2::new(0.5, -0.25)];
        let tol = Tolerance::for_points(&points);
        assert_relative_eq!(tol.eps(), 1e-9);
    }

    #[test]
    fn test_scales_with_magnitude() {
        let points = [Point2::new(0.0_f64, 0.0), Point2::new(-2000.0, 10.0)];
        let tol = Tolerance::for_points(&points);
        assert_relative_eq!(tol.eps(), 2e-6);
    }

    #[test]
    fn test_ignores_non_finite() {
        let points = [Point2::new(f64::INFINITY, 0.0), Point2::new(3.0, 0.0)];
        let tol = Tolerance::for_points(&points);
        assert_relative_eq!(tol.eps(), 3e-9);
    }

    #[test]
    fn test_sliver_is_a_band_not_a_square() {
        let tol = Tolerance::new(1e-6_f64);
        assert_relative_eq!(tol.sliver_area(5.0, 3.0), 1.6e-5);
        assert!(tol.sliver_area(5.0, 3.0) > tol.eps() * tol.eps());
        assert_eq!(Tolerance::new(-1e-6_f64).eps(), 1e-6);
    }
}
