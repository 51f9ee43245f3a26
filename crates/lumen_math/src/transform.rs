// Transform helpers for editing mesh geometry in place.
//
// Points and normals transform differently: normals use the inverse
// transpose of the linear part so they stay perpendicular to the surface.

use glam::{Mat3, Vec3};

/// Rotation about the X axis by `angle` radians (right-handed).
pub fn rotation_x(angle: f32) -> Mat3 {
    Mat3::from_rotation_x(angle)
}

/// Rotation about the Y axis by `angle` radians (right-handed).
pub fn rotation_y(angle: f32) -> Mat3 {
    Mat3::from_rotation_y(angle)
}

/// Rotation about the Z axis by `angle` radians (right-handed).
pub fn rotation_z(angle: f32) -> Mat3 {
    Mat3::from_rotation_z(angle)
}

/// Matrix that maps normals under the linear transform `m`.
///
/// Returns `None` when `m` is singular (e.g. a zero scale factor), since no
/// normal transform exists for a collapsed axis.
pub fn normal_matrix(m: &Mat3) -> Option<Mat3> {
    let det = m.determinant();
    if det.abs() <= f32::EPSILON || !det.is_finite() {
        return None;
    }
    Some(m.inverse().transpose())
}

/// Transform a normal by a normal matrix and renormalize.
pub fn transform_normal(normal_matrix: &Mat3, normal: Vec3) -> Vec3 {
    (*normal_matrix * normal).normalize_or_zero()
}
