//! Ember math - value types shared by the path tracing core.
//!
//! `Vec3` (from glam) doubles as point, direction and linear RGB colour.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
