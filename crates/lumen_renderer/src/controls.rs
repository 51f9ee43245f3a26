//! Camera controls: per-frame camera parameters with turntable and
//! aspect handling.

use glam::UVec2;
use lumen_math::{rotation_y, CameraParameters};
use serde::{Deserialize, Serialize};

/// Options for [`CameraControls`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOptions {
    /// Rotate the camera position around the Y axis over time
    pub turntable: bool,
    /// Turntable speed in radians per second
    pub turntable_speed: f32,
    /// Widen the view for narrow aspect ratios
    pub auto_aspect: bool,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            turntable: false,
            turntable_speed: 1.0,
            auto_aspect: true,
        }
    }
}

/// Produces the [`CameraParameters`] snapshot for each frame.
///
/// Holds the user's base parameters and the turntable angle. The snapshot
/// for a frame applies the turntable rotation on the zx-plane, sets the
/// aspect ratio from the resolution and, with `auto_aspect`, rescales the
/// field of view and the orthographic top/bottom bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraControls {
    initial: CameraParameters,
    params: CameraParameters,
    pub options: ControlOptions,
    angle: f32,
}

impl CameraControls {
    pub fn new(params: CameraParameters, options: ControlOptions) -> Self {
        Self {
            initial: params,
            params,
            options,
            angle: 0.0,
        }
    }

    /// Base parameters before per-frame adjustments.
    pub fn base(&self) -> &CameraParameters {
        &self.params
    }

    /// Mutable access to the base parameters.
    pub fn base_mut(&mut self) -> &mut CameraParameters {
        &mut self.params
    }

    /// Current turntable angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance the turntable by `dt` seconds. Does nothing while the
    /// turntable is off.
    pub fn advance(&mut self, dt: f32) {
        if self.options.turntable {
            self.angle += dt * self.options.turntable_speed;
        }
    }

    /// Restore the initial parameters and turntable angle.
    pub fn reset(&mut self) {
        self.params = self.initial;
        self.angle = 0.0;
        log::debug!("Camera controls reset");
    }

    /// Parameters for a frame rendered at `resolution`.
    pub fn parameters(&self, resolution: UVec2) -> CameraParameters {
        let mut result = self.params;
        result.position = rotation_y(self.angle) * self.params.position;

        result.aspect = if resolution.y > 0 {
            resolution.x as f32 / resolution.y as f32
        } else {
            1.0
        };

        if self.options.auto_aspect && result.aspect > 0.0 {
            result.perspective.fov /= result.aspect.clamp(0.2, 1.0);
            result.orthographic.top /= result.aspect;
            result.orthographic.bottom /= result.aspect;
        }

        result
    }
}

impl Default for CameraControls {
    fn default() -> Self {
        Self::new(CameraParameters::default(), ControlOptions::default())
    }
}
