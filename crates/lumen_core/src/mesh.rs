//! Triangle mesh representation consumed by the ray tracer.
//!
//! Meshes are built by an external loader and handed over fully formed.
//! Construction validates the index invariant once, so intersection code can
//! index the vertex array without further checks.

use std::ops::Range;

use lumen_math::{normal_matrix, rotation_x, rotation_y, rotation_z, transform_normal};
use lumen_math::{Aabb, Mat3, Vec2, Vec3};
use thiserror::Error;

/// Errors that can occur when assembling a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Expected {expected} normals (one per vertex), got {actual}")]
    NormalCountMismatch { expected: usize, actual: usize },

    #[error("Expected {expected} texture coordinates (one per vertex), got {actual}")]
    TexCoordCountMismatch { expected: usize, actual: usize },

    #[error("Smoothing group {start}..{end} lies outside the mesh's {face_count} faces")]
    SmoothGroupOutOfRange {
        start: usize,
        end: usize,
        face_count: usize,
    },
}

/// Vertex indices of one triangle, counter-clockwise when seen from the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleIndices {
    pub v1: u32,
    pub v2: u32,
    pub v3: u32,
}

impl TriangleIndices {
    pub fn new(v1: u32, v2: u32, v3: u32) -> Self {
        Self { v1, v2, v3 }
    }

    /// Indices as `usize`, ready for slice access.
    #[inline]
    pub fn to_usize(self) -> [usize; 3] {
        [self.v1 as usize, self.v2 as usize, self.v3 as usize]
    }
}

/// A triangle mesh with per-vertex attributes and smoothing groups.
///
/// Normals and texture coordinates are parallel to `positions`. Each
/// smoothing group is a `[start, end)` range of faces whose shading normal is
/// interpolated from the vertex normals; every other face shades flat.
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: Vec<Vec3>,
    faces: Vec<TriangleIndices>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    smooth_groups: Vec<Range<usize>>,
    bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from positions and faces, optionally with vertex normals.
    ///
    /// Missing normals are computed from the faces. Texture coordinates
    /// default to zero and there are no smoothing groups until
    /// [`Mesh::with_smooth_groups`] adds them.
    pub fn new(
        positions: Vec<Vec3>,
        faces: Vec<TriangleIndices>,
        normals: Option<Vec<Vec3>>,
    ) -> Result<Self, MeshError> {
        for (face, indices) in faces.iter().enumerate() {
            for index in [indices.v1, indices.v2, indices.v3] {
                if index as usize >= positions.len() {
                    return Err(MeshError::IndexOutOfRange {
                        face,
                        index,
                        vertex_count: positions.len(),
                    });
                }
            }
        }

        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(MeshError::NormalCountMismatch {
                    expected: positions.len(),
                    actual: normals.len(),
                });
            }
        }

        let has_normals = normals.is_some();
        let mut mesh = Self::from_parts(
            positions,
            faces,
            normals.unwrap_or_default(),
            None,
            Vec::new(),
        );
        if !has_normals {
            mesh.compute_normals();
        }
        Ok(mesh)
    }

    /// Assemble a mesh whose indices are known to be valid.
    pub(crate) fn from_parts(
        positions: Vec<Vec3>,
        faces: Vec<TriangleIndices>,
        normals: Vec<Vec3>,
        tex_coords: Option<Vec<Vec2>>,
        smooth_groups: Vec<Range<usize>>,
    ) -> Self {
        debug_assert!(faces
            .iter()
            .all(|f| f.to_usize().iter().all(|&i| i < positions.len())));
        debug_assert!(smooth_groups.iter().all(|g| g.end <= faces.len()));

        let bounds = Aabb::from_points(&positions);
        let tex_coords = tex_coords.unwrap_or_else(|| vec![Vec2::ZERO; positions.len()]);
        Self {
            positions,
            faces,
            normals,
            tex_coords,
            smooth_groups,
            bounds,
        }
    }

    /// Attach per-vertex texture coordinates.
    pub fn with_tex_coords(mut self, tex_coords: Vec<Vec2>) -> Result<Self, MeshError> {
        if tex_coords.len() != self.positions.len() {
            return Err(MeshError::TexCoordCountMismatch {
                expected: self.positions.len(),
                actual: tex_coords.len(),
            });
        }
        self.tex_coords = tex_coords;
        Ok(self)
    }

    /// Mark face ranges that use interpolated vertex normals.
    pub fn with_smooth_groups(mut self, groups: Vec<Range<usize>>) -> Result<Self, MeshError> {
        let face_count = self.faces.len();
        if let Some(bad) = groups
            .iter()
            .find(|g| g.start > g.end || g.end > face_count)
        {
            return Err(MeshError::SmoothGroupOutOfRange {
                start: bad.start,
                end: bad.end,
                face_count,
            });
        }
        self.smooth_groups = groups;
        Ok(self)
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle faces.
    pub fn faces(&self) -> &[TriangleIndices] {
        &self.faces
    }

    /// Per-vertex normals (unit length unless the vertex is degenerate).
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    pub fn smooth_groups(&self) -> &[Range<usize>] {
        &self.smooth_groups
    }

    /// Pre-computed bounding box over all vertices.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Positions of the three corners of face `face`.
    #[inline]
    pub fn triangle_vertices(&self, face: usize) -> [Vec3; 3] {
        let [a, b, c] = self.faces[face].to_usize();
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Unit geometric normal of a face, zero for degenerate faces.
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.triangle_vertices(face);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Area of every face, in face order.
    pub fn face_areas(&self) -> Vec<f32> {
        (0..self.faces.len())
            .map(|face| {
                let [a, b, c] = self.triangle_vertices(face);
                0.5 * (b - a).cross(c - a).length()
            })
            .collect()
    }

    /// True if `face` belongs to a smoothing group.
    pub fn is_smooth(&self, face: usize) -> bool {
        self.smooth_groups.iter().any(|group| group.contains(&face))
    }

    /// Shading normal at barycentric `(u, v)` on `face`.
    ///
    /// The hit point is `(1 - u - v) * v1 + u * v2 + v * v3`. Smooth faces
    /// interpolate the vertex normals with the same weights; flat faces use
    /// the geometric face normal.
    pub fn shading_normal(&self, face: usize, u: f32, v: f32) -> Vec3 {
        if !self.is_smooth(face) {
            return self.face_normal(face);
        }

        let [a, b, c] = self.faces[face].to_usize();
        let w = 1.0 - u - v;
        let interpolated = self.normals[a] * w + self.normals[b] * u + self.normals[c] * v;
        match interpolated.try_normalize() {
            Some(n) => n,
            None => self.face_normal(face),
        }
    }

    /// Re-compute the bounding box from the current positions.
    pub fn update_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions);
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Face normals are accumulated unnormalized, so larger faces weigh more.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for face in &self.faces {
            let [i0, i1, i2] = face.to_usize();
            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];

            // Counter-clockwise winding faces the viewer
            let face_normal = (p1 - p0).cross(p2 - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        let mut degenerate = 0usize;
        for normal in &mut normals {
            match normal.try_normalize() {
                Some(n) => *normal = n,
                None => {
                    // Default up normal for unreferenced or zero-area vertices
                    *normal = Vec3::Y;
                    degenerate += 1;
                }
            }
        }
        if degenerate > 0 {
            log::warn!(
                "{} of {} vertices have no usable face normal, defaulting to +Y",
                degenerate,
                normals.len()
            );
        }

        self.normals = normals;
    }

    /// Scale the mesh about the origin.
    ///
    /// Normals are transformed with the inverse scale. A zero factor flattens
    /// the mesh; its normals are then recomputed from the flattened faces.
    pub fn scale(&mut self, factors: Vec3) {
        self.apply_linear(&Mat3::from_diagonal(factors));
    }

    /// Translate every vertex. Normals are unaffected.
    pub fn translate(&mut self, offset: Vec3) {
        for position in &mut self.positions {
            *position += offset;
        }
        self.update_bounds();
    }

    /// Rotate about the X axis by `angle` radians.
    pub fn rotate_x(&mut self, angle: f32) {
        self.apply_linear(&rotation_x(angle));
    }

    /// Rotate about the Y axis by `angle` radians.
    pub fn rotate_y(&mut self, angle: f32) {
        self.apply_linear(&rotation_y(angle));
    }

    /// Rotate about the Z axis by `angle` radians.
    pub fn rotate_z(&mut self, angle: f32) {
        self.apply_linear(&rotation_z(angle));
    }

    fn apply_linear(&mut self, m: &Mat3) {
        for position in &mut self.positions {
            *position = *m * *position;
        }

        match normal_matrix(m) {
            Some(n) => {
                for normal in &mut self.normals {
                    *normal = transform_normal(&n, *normal);
                }
            }
            None => self.compute_normals(),
        }

        self.update_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn quad() -> Mesh {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0), // v0
            Vec3::new(1.0, 0.0, 0.0), // v1
            Vec3::new(0.0, 1.0, 0.0), // v2
            Vec3::new(1.0, 1.0, 0.0), // v3
        ];
        let faces = vec![TriangleIndices::new(0, 1, 2), TriangleIndices::new(1, 3, 2)];
        Mesh::new(positions, faces, None).unwrap()
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.normals().len(), 4);
        assert_eq!(mesh.tex_coords().len(), 4);
        assert!(mesh.smooth_groups().is_empty());
    }

    #[test]
    fn test_index_out_of_range_is_rejected() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let faces = vec![TriangleIndices::new(0, 1, 2), TriangleIndices::new(0, 2, 3)];

        let err = Mesh::new(positions, faces, None).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_attribute_counts_are_checked() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let faces = vec![TriangleIndices::new(0, 1, 2)];

        let err = Mesh::new(positions.clone(), faces.clone(), Some(vec![Vec3::Z])).unwrap_err();
        assert!(matches!(err, MeshError::NormalCountMismatch { expected: 3, actual: 1 }));

        let mesh = Mesh::new(positions, faces, None).unwrap();
        let err = mesh.with_tex_coords(vec![Vec2::ZERO; 2]).unwrap_err();
        assert!(matches!(err, MeshError::TexCoordCountMismatch { .. }));
    }

    #[test]
    fn test_smooth_groups_are_checked() {
        assert!(quad().with_smooth_groups(vec![0..2]).is_ok());

        let err = quad().with_smooth_groups(vec![1..3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::SmoothGroupOutOfRange {
                start: 1,
                end: 3,
                face_count: 2
            }
        );
    }

    #[test]
    fn test_compute_normals() {
        let mesh = quad();

        // Counter-clockwise in the XY plane seen from +Z
        for normal in mesh.normals() {
            assert!((normal.z - 1.0).abs() < 0.001);
        }
        assert!((mesh.face_normal(0) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_bounds_computation() {
        let positions = vec![
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let mesh = Mesh::new(positions, vec![TriangleIndices::new(0, 1, 2)], None).unwrap();

        assert_eq!(mesh.bounds().min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(mesh.bounds().max, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_face_areas() {
        let areas = quad().face_areas();
        assert_eq!(areas.len(), 2);
        assert!((areas[0] - 0.5).abs() < 1e-6);
        assert!((areas[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shading_normal_flat_vs_smooth() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = vec![
            Vec3::new(-1.0, 0.0, 1.0).normalize(),
            Vec3::new(1.0, 0.0, 1.0).normalize(),
            Vec3::Z,
        ];
        let flat = Mesh::new(positions, vec![TriangleIndices::new(0, 1, 2)], Some(normals)).unwrap();
        let smooth = flat.clone().with_smooth_groups(vec![0..1]).unwrap();

        // Flat faces ignore the vertex normals
        assert!((flat.shading_normal(0, 0.5, 0.0) - Vec3::Z).length() < 1e-6);

        // Halfway between v1 and v2 the x components cancel
        let n = smooth.shading_normal(0, 0.5, 0.0);
        assert!((n - Vec3::Z).length() < 1e-6);

        // At v2 the normal equals its vertex normal
        let n = smooth.shading_normal(0, 1.0, 0.0);
        assert!((n - Vec3::new(1.0, 0.0, 1.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_translate_updates_bounds() {
        let mut mesh = quad();
        mesh.translate(Vec3::new(5.0, 0.0, -1.0));

        assert_eq!(mesh.bounds().min, Vec3::new(5.0, 0.0, -1.0));
        assert_eq!(mesh.bounds().max, Vec3::new(6.0, 1.0, -1.0));
        assert!((mesh.normals()[0] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_rotate_moves_normals() {
        let mut mesh = quad();
        mesh.rotate_x(-FRAC_PI_2);

        // +Z rotated by -90 degrees about X points to +Y
        for normal in mesh.normals() {
            assert!((*normal - Vec3::Y).length() < 1e-5);
        }
        // The vertex at y = 1 ends up at z = -1
        assert!((mesh.bounds().min.z + 1.0).abs() < 1e-5);

        // Rotating about Z keeps the normals of a quad in the xy-plane
        let mut mesh = quad();
        mesh.rotate_z(FRAC_PI_2);
        for normal in mesh.normals() {
            assert!((*normal - Vec3::Z).length() < 1e-5);
        }
        assert!((mesh.positions()[1] - Vec3::Y).length() < 1e-5);
        assert!((mesh.bounds().min.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scale_uses_inverse_for_normals() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let tilted = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mut mesh = Mesh::new(
            positions,
            vec![TriangleIndices::new(0, 1, 2)],
            Some(vec![tilted; 3]),
        )
        .unwrap();

        mesh.scale(Vec3::new(2.0, 1.0, 1.0));

        assert_eq!(mesh.bounds().max, Vec3::new(2.0, 1.0, 0.0));
        let expected = Vec3::new(0.5, 1.0, 0.0).normalize();
        assert!((mesh.normals()[0] - expected).length() < 1e-5);
    }

    #[test]
    fn test_zero_scale_recomputes_normals() {
        let mut mesh = quad();
        mesh.scale(Vec3::new(1.0, 0.0, 1.0));

        // The quad collapsed to a line; normals fall back to +Y
        assert!(mesh.normals().iter().all(|n| !n.is_nan()));
        assert_eq!(mesh.bounds().max.y, 0.0);
    }
}
