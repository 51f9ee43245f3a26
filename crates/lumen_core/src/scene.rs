//! Scene container handed to the ray tracer.
//!
//! A scene exclusively owns its meshes. It stays read-only while a frame is
//! being rendered; meshes are only added between frames.

use lumen_math::{Aabb, Vec3};

use crate::mesh::Mesh;

/// An ordered collection of meshes.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    bounds: Aabb,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a mesh and return its index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.bounds = Aabb::surrounding(&self.bounds, mesh.bounds());
        log::debug!(
            "Added mesh {}: {} vertices, {} triangles",
            self.meshes.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Meshes in insertion order.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    /// Get the number of meshes.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Total triangle count across all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Check if the scene has no meshes.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Bounding box of every mesh (empty for an empty scene).
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Shading normal on `face` of mesh `mesh` at barycentric `(u, v)`.
    ///
    /// Returns `None` if the mesh or face does not exist.
    pub fn shading_normal(&self, mesh: usize, face: usize, u: f32, v: f32) -> Option<Vec3> {
        let mesh = self.meshes.get(mesh)?;
        if face >= mesh.triangle_count() {
            return None;
        }
        Some(mesh.shading_normal(face, u, v))
    }
}

impl FromIterator<Mesh> for Scene {
    fn from_iter<I: IntoIterator<Item = Mesh>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for mesh in iter {
            scene.add_mesh(mesh);
        }
        scene
    }
}
