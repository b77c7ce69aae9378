//! Lumen math types.
//!
//! All geometry is carried in double precision. Points, directions and RGB
//! colors share the same `Vec3` representation.

// Re-export glam for convenience
pub use glam;
pub use glam::DVec3;

mod geometry;
mod ray;

pub use geometry::{normalize_in_place, reflect, refract};
pub use ray::Ray;

/// Three-component vector used for points, directions and colors.
pub type Vec3 = DVec3;

/// Color type alias (linear RGB, typically 0-1 but not clamped)
pub type Color = DVec3;
