//! Lumen Renderer - progressive CPU ray tracing.
//!
//! Camera rays are generated per pixel, intersected brute force against
//! every triangle of the scene (pruned by one bounding box per mesh), turned
//! into colors by an [`Integrator`] and accumulated into a [`Film`] as a
//! running mean. [`RayTracer`] drives this one bucket at a time.

mod bucket;
mod camera;
mod controls;
mod film;
mod integrator;
mod intersection;
mod renderer;
mod tracer;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use camera::{Camera, Projection};
pub use controls::{CameraControls, ControlOptions};
pub use film::Film;
pub use integrator::{Color, Integrator, NormalIntegrator, NormalMode};
pub use intersection::{Intersect, Intersection};
pub use renderer::{pixel_to_screen, render_pixel, RenderConfig, DEFAULT_BUCKET_SIZE};
pub use tracer::{RayTracer, StepReport};
pub use triangle::Triangle;

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, CameraParameters, Interval, Ray, Vec2, Vec3};
