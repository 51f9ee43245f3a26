//! Lumen Core - meshes and scenes for the ray tracing kernel.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh` (indexed triangles with normals, UVs and smooth groups)
//! - **Scene**: `Scene`, an ordered collection of meshes
//! - **Shapes**: built-in triangle, quad, cube and UV sphere meshes
//!
//! # Example
//!
//! ```
//! use lumen_core::{shapes, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_mesh(shapes::cube(1.0));
//! scene.add_mesh(shapes::uv_sphere(0.5, 16, 8));
//! assert_eq!(scene.mesh_count(), 2);
//! ```

pub mod mesh;
pub mod scene;
pub mod shapes;

// Re-export commonly used types
pub use mesh::{Mesh, MeshError, TriangleIndices};
pub use scene::Scene;
