//! Render settings and per-pixel sampling.

use glam::UVec2;
use lumen_core::Scene;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Camera, Color, Integrator, NormalIntegrator, NormalMode, Vec2};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples added to every pixel in one pass
    pub samples_per_pass: u32,
    /// Edge length of the square tiles rendered per step
    pub bucket_size: u32,
    /// Jitter samples inside the pixel for anti-aliasing
    pub jitter: bool,
    /// Seed for the jitter sequence
    pub seed: u64,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Normal visualized by the default integrator
    pub normal_mode: NormalMode,
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pass: 1,
            bucket_size: DEFAULT_BUCKET_SIZE,
            jitter: true,
            seed: 0,
            background: Color::ZERO,
            normal_mode: NormalMode::Geometric,
        }
    }
}

impl RenderConfig {
    /// The normal integrator described by this configuration.
    pub fn integrator(&self) -> NormalIntegrator {
        NormalIntegrator::new(self.normal_mode, self.background)
    }
}

/// Map pixel `(x, y)` plus a sub-pixel offset in `[0, 1)^2` to `[-1, 1]^2`.
#[inline]
pub fn pixel_to_screen(x: u32, y: u32, offset: Vec2, resolution: UVec2) -> Vec2 {
    let p = Vec2::new(x as f32, y as f32) + offset;
    p / resolution.as_vec2() * 2.0 - Vec2::ONE
}

/// Draw the sub-pixel offset for one sample.
#[inline]
fn sample_offset<R: Rng>(jitter: bool, rng: &mut R) -> Vec2 {
    if jitter {
        Vec2::new(rng.gen::<f32>(), rng.gen::<f32>())
    } else {
        Vec2::splat(0.5)
    }
}

/// Trace `config.samples_per_pass` camera rays through pixel `(x, y)` and
/// push one color per sample into `out`.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel<R: Rng>(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    x: u32,
    y: u32,
    resolution: UVec2,
    config: &RenderConfig,
    rng: &mut R,
    out: &mut Vec<Color>,
) {
    for _ in 0..config.samples_per_pass {
        let offset = sample_offset(config.jitter, rng);
        let ray = camera.generate_ray(pixel_to_screen(x, y, offset, resolution));
        out.push(integrator.radiance(scene, &ray));
    }
}
