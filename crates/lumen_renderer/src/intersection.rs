//! Intersect trait and Intersection record for closest-hit queries.
//!
//! Meshes and scenes are searched brute force: every triangle of a mesh is
//! tested once the ray passes the mesh's bounding box, and every mesh of a
//! scene is visited in order. An acceleration structure only has to
//! implement [`Intersect`] to replace this.

use lumen_core::{Mesh, Scene};
use lumen_math::{Ray, Vec3};

use crate::triangle::Triangle;

/// Record of a ray-surface intersection.
///
/// `t = +inf` (any non-finite value) encodes "no hit", so a fresh record
/// compares as farther than every real hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub point: Vec3,
    /// Ray parameter of the hit
    pub t: f32,
    /// Geometric normal from the triangle winding (unit length)
    pub normal: Vec3,
    /// Index of the mesh within the scene
    pub mesh: usize,
    /// Index of the face within the mesh
    pub face: usize,
    /// Barycentric coordinates of the hit on the face
    pub u: f32,
    pub v: f32,
}

impl Default for Intersection {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            t: f32::INFINITY,
            normal: Vec3::ZERO,
            mesh: 0,
            face: 0,
            u: 0.0,
            v: 0.0,
        }
    }
}

impl Intersection {
    /// True if this record describes an actual hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t.is_finite()
    }
}

/// Trait for geometry that can be hit by rays.
pub trait Intersect: Send + Sync {
    /// Closest hit within the ray's valid range, or a non-hit record.
    fn intersect(&self, ray: &Ray) -> Intersection;
}

impl Intersect for Mesh {
    fn intersect(&self, ray: &Ray) -> Intersection {
        let mut closest = Intersection::default();
        if !self.bounds().hit(ray) {
            return closest;
        }

        for face in 0..self.triangle_count() {
            let hit = Triangle::from_mesh(self, face).intersect(&ray.clipped(closest.t));
            // Strict comparison: the first of several equal hits wins
            if hit.t < closest.t {
                closest = Intersection { face, ..hit };
            }
        }

        closest
    }
}

impl Intersect for Scene {
    fn intersect(&self, ray: &Ray) -> Intersection {
        let mut closest = Intersection::default();

        for (mesh_index, mesh) in self.meshes().iter().enumerate() {
            let hit = mesh.intersect(&ray.clipped(closest.t));
            if hit.t < closest.t {
                closest = Intersection {
                    mesh: mesh_index,
                    ..hit
                };
            }
        }

        closest
    }
}
