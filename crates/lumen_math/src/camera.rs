use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Orthonormal camera basis built from a view direction and a world up-vector.
///
/// `dir` looks into the scene (-z in camera space), `right` is +x and `up`
/// is +y. `up` is recomputed from `right` and `dir`, so the three vectors are
/// mutually orthogonal even when the supplied up-vector is not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub dir: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraFrame {
    /// Build a frame from a (not necessarily unit) view direction and up-vector.
    ///
    /// If the view direction is zero or parallel to `world_up` the basis
    /// collapses; the zero vectors that result make every generated ray miss
    /// instead of carrying NaN into intersection tests.
    pub fn new(dir: Vec3, world_up: Vec3) -> Self {
        let dir = dir.normalize_or_zero();
        let right = dir.cross(world_up).normalize_or_zero();
        let up = right.cross(dir);
        if right == Vec3::ZERO {
            log::warn!(
                "Degenerate camera frame: view direction {:?} is zero or parallel to up {:?}",
                dir,
                world_up
            );
        }
        Self { dir, right, up }
    }

    /// True if the basis could not be built.
    pub fn is_degenerate(&self) -> bool {
        self.right == Vec3::ZERO
    }
}

/// Perspective projection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Perspective {
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self { fov: 30.0 }
    }
}

/// Orthographic view rectangle in camera-plane units.
///
/// `left`/`right` bound the horizontal axis, `top`/`bottom` the vertical one.
/// The default has `top = -1` and `bottom = 1`, matching the vertical sign
/// convention of the perspective path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orthographic {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Orthographic {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: -1.0,
            bottom: 1.0,
        }
    }
}

/// Snapshot of everything needed to build a camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParameters {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// World up-vector.
    pub up: Vec3,
    pub perspective: Perspective,
    pub orthographic: Orthographic,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Perspective projection when true, orthographic otherwise.
    pub is_perspective: bool,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.5, 4.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            perspective: Perspective::default(),
            orthographic: Orthographic::default(),
            aspect: 1.0,
            is_perspective: true,
        }
    }
}

impl CameraParameters {
    /// Look from `position` at `target` with +Y up and default projection.
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Orthonormal camera frame.
    pub fn frame(&self) -> CameraFrame {
        CameraFrame::new(self.target - self.position, self.up)
    }

    /// Half of the width and height of the view frustum at depth 1.
    pub fn half_view_span(&self) -> Vec2 {
        let h = (self.perspective.fov.to_radians() * 0.5).tan();
        Vec2::new(h * self.aspect, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_orthonormal() {
        // Up-vector deliberately not perpendicular to the view direction
        let frame = CameraFrame::new(Vec3::new(1.0, -0.5, -2.0), Vec3::new(0.2, 1.0, 0.1));

        assert!((frame.dir.length() - 1.0).abs() < 1e-5);
        assert!((frame.right.length() - 1.0).abs() < 1e-5);
        assert!((frame.up.length() - 1.0).abs() < 1e-5);
        assert!(frame.dir.dot(frame.right).abs() < 1e-5);
        assert!(frame.dir.dot(frame.up).abs() < 1e-5);
        assert!(frame.right.dot(frame.up).abs() < 1e-5);
    }

    #[test]
    fn test_frame_looking_down_negative_z() {
        let frame = CameraParameters::look_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO).frame();

        assert!((frame.dir - Vec3::NEG_Z).length() < 1e-6);
        assert!((frame.right - Vec3::X).length() < 1e-6);
        assert!((frame.up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_frame_degenerate() {
        let frame = CameraFrame::new(Vec3::Y, Vec3::Y);
        assert!(frame.is_degenerate());
        assert!(!frame.dir.is_nan());
        assert!(!frame.up.is_nan());
    }

    #[test]
    fn test_half_view_span() {
        let mut params = CameraParameters::default();
        params.perspective.fov = 90.0;
        params.aspect = 2.0;

        let span = params.half_view_span();
        assert!((span.y - 1.0).abs() < 1e-6);
        assert!((span.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_parameters_deserialize_partial() {
        let params: CameraParameters =
            serde_json::from_str(r#"{ "position": [1.0, 2.0, 3.0], "is_perspective": false }"#)
                .unwrap();

        assert_eq!(params.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(!params.is_perspective);
        assert_eq!(params.perspective.fov, 30.0);
        assert_eq!(params.orthographic, Orthographic::default());
    }
}
