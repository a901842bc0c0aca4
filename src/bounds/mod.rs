//! Axis-aligned bounds.

mod aabb;

pub use aabb::Aabb2;
