//! Integrators turn a camera ray into a color.

use lumen_core::Scene;
use lumen_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::intersection::Intersect;

/// Linear RGB color.
pub type Color = Vec3;

/// Computes the radiance arriving along a ray.
///
/// Called from worker threads, so implementations must be `Send + Sync`.
pub trait Integrator: Send + Sync {
    fn radiance(&self, scene: &Scene, ray: &Ray) -> Color;
}

/// Which normal the [`NormalIntegrator`] visualizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalMode {
    /// Flat face normal from the triangle winding.
    #[default]
    Geometric,
    /// Interpolated normal inside smoothing groups, flat elsewhere.
    Shading,
}

/// Visualizes surface normals, mapping each axis from `[-1, 1]` to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalIntegrator {
    pub mode: NormalMode,
    /// Color returned when the ray hits nothing.
    pub background: Color,
}

impl NormalIntegrator {
    pub fn new(mode: NormalMode, background: Color) -> Self {
        Self { mode, background }
    }
}

impl Default for NormalIntegrator {
    fn default() -> Self {
        Self::new(NormalMode::Geometric, Color::ZERO)
    }
}

impl Integrator for NormalIntegrator {
    fn radiance(&self, scene: &Scene, ray: &Ray) -> Color {
        let its = scene.intersect(ray);
        if !its.is_hit() {
            return self.background;
        }

        let normal = match self.mode {
            NormalMode::Geometric => its.normal,
            NormalMode::Shading => scene
                .shading_normal(its.mesh, its.face, its.u, its.v)
                .unwrap_or(its.normal),
        };

        normal * 0.5 + Vec3::splat(0.5)
    }
}
