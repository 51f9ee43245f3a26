//! Lumen Math - vector types and ray/box primitives shared by the kernel.

// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod camera;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use camera::{CameraFrame, CameraParameters, Orthographic, Perspective};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{normal_matrix, rotation_x, rotation_y, rotation_z, transform_normal};

/// Smallest ray parameter accepted as a hit, to avoid self-intersection.
pub const EPSILON: f32 = 1.0e-6;

/// Largest component of a vector.
#[inline]
pub fn max_component(v: Vec3) -> f32 {
    v.max_element()
}

/// Componentwise absolute value.
#[inline]
pub fn abs(v: Vec3) -> Vec3 {
    v.abs()
}
