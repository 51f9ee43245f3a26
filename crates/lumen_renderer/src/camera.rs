//! Camera for ray generation.

use lumen_math::{CameraFrame, CameraParameters, Orthographic, Ray, Vec2, Vec3};

/// Projection used by a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective { half_view_span: Vec2 },
    Orthographic(Orthographic),
}

/// Maps normalized screen coordinates to world-space rays.
///
/// Everything is frozen from one [`CameraParameters`] snapshot; build a new
/// camera when the parameters change.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    frame: CameraFrame,
    projection: Projection,
}

impl Camera {
    pub fn new(params: &CameraParameters) -> Self {
        let projection = if params.is_perspective {
            Projection::Perspective {
                half_view_span: params.half_view_span(),
            }
        } else {
            Projection::Orthographic(params.orthographic)
        };

        Self {
            position: params.position,
            frame: params.frame(),
            projection,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Generate the ray through `pixel`, a screen point in `[-1, 1]^2`.
    ///
    /// Positive `pixel.y` moves against the camera's up-vector, so `y = -1`
    /// is the top edge of the image.
    pub fn generate_ray(&self, pixel: Vec2) -> Ray {
        let CameraFrame { dir, right, up } = self.frame;

        match self.projection {
            Projection::Perspective { half_view_span } => {
                let p = pixel * half_view_span;
                let direction = (dir + right * p.x - up * p.y).normalize_or_zero();
                Ray::new(self.position, direction)
            }
            Projection::Orthographic(rect) => {
                let s = (pixel + Vec2::ONE) * 0.5;
                let offset_right = rect.left + (rect.right - rect.left) * s.x;
                let offset_up = rect.bottom + (rect.top - rect.bottom) * s.y;
                Ray::new(self.position + right * offset_right + up * offset_up, dir)
            }
        }
    }
}
