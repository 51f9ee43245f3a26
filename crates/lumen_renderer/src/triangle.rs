//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lumen_core::Mesh;
use lumen_math::{Ray, Vec3, EPSILON};

use crate::intersection::{Intersect, Intersection};

/// Relative determinant below which the ray is treated as parallel to the
/// triangle. Scaled by the lengths of the vectors forming the determinant.
const PARALLEL_EPSILON: f32 = f32::EPSILON;

/// Three vertex positions, counter-clockwise when seen from the front.
///
/// No normal is stored; the geometric normal is derived from the winding
/// and shading normals come from the owning mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }

    /// Resolve face `face` of `mesh` through its index triple.
    #[inline]
    pub fn from_mesh(mesh: &Mesh, face: usize) -> Self {
        let [v1, v2, v3] = mesh.triangle_vertices(face);
        Self { v1, v2, v3 }
    }

    /// Unit normal of the front face (zero for a degenerate triangle).
    pub fn normal(&self) -> Vec3 {
        (self.v2 - self.v1).cross(self.v3 - self.v1).normalize_or_zero()
    }
}

impl Intersect for Triangle {
    /// Closest hit inside the ray's range and more than `EPSILON` world
    /// units in front of the origin.
    ///
    /// The direction does not need to be unit length; `t` scales inversely
    /// with it. On a hit the barycentrics satisfy
    /// `point = (1 - u - v) * v1 + u * v2 + v * v3`. Parallel rays and
    /// zero-area triangles never hit.
    fn intersect(&self, ray: &Ray) -> Intersection {
        let edge1 = self.v2 - self.v1;
        let edge2 = self.v3 - self.v1;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle, or either the triangle or the
        // direction is degenerate
        if a.abs() <= PARALLEL_EPSILON * edge1.length() * h.length() || !a.is_finite() {
            return Intersection::default();
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v1;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return Intersection::default();
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return Intersection::default();
        }

        let t = f * edge2.dot(q);
        if t * ray.direction.length() <= EPSILON || !ray.range.contains(t) {
            return Intersection::default();
        }

        Intersection {
            point: ray.at(t),
            t,
            normal: edge1.cross(edge2).normalize_or_zero(),
            u,
            v,
            ..Default::default()
        }
    }
}
