//! Built-in meshes for demos and tests.
//!
//! All shapes wind counter-clockwise when seen from outside, so geometric
//! normals point outward.

use std::f32::consts::PI;

use lumen_math::{Vec2, Vec3};

use crate::mesh::{Mesh, TriangleIndices};

/// Unit triangle in the XY plane centered on the origin, facing +Z.
pub fn triangle() -> Mesh {
    let positions = vec![
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
    ];
    let tex_coords = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];
    Mesh::from_parts(
        positions,
        vec![TriangleIndices::new(0, 1, 2)],
        vec![Vec3::Z; 3],
        Some(tex_coords),
        Vec::new(),
    )
}

/// Square of side `size` in the XY plane centered on the origin, facing +Z.
pub fn quad(size: f32) -> Mesh {
    let h = size * 0.5;
    let positions = vec![
        Vec3::new(-h, -h, 0.0),
        Vec3::new(h, -h, 0.0),
        Vec3::new(h, h, 0.0),
        Vec3::new(-h, h, 0.0),
    ];
    let tex_coords = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    Mesh::from_parts(
        positions,
        vec![TriangleIndices::new(0, 1, 2), TriangleIndices::new(0, 2, 3)],
        vec![Vec3::Z; 4],
        Some(tex_coords),
        Vec::new(),
    )
}

/// Axis-aligned cube spanning `[-half_extent, half_extent]` on every axis.
///
/// Each side has its own four vertices so vertex normals stay flat.
pub fn cube(half_extent: f32) -> Mesh {
    // (normal, u, v) with u x v = normal
    let sides = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut tex_coords = Vec::with_capacity(24);
    let mut faces = Vec::with_capacity(12);

    for (normal, u, v) in sides {
        let base = positions.len() as u32;
        let center = normal * half_extent;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push(center + (u * su + v * sv) * half_extent);
            normals.push(normal);
            tex_coords.push(Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5));
        }
        faces.push(TriangleIndices::new(base, base + 1, base + 2));
        faces.push(TriangleIndices::new(base, base + 2, base + 3));
    }

    Mesh::from_parts(positions, faces, normals, Some(tex_coords), Vec::new())
}

/// UV sphere centered on the origin, shaded smooth as a single group.
///
/// `segments` runs around the Y axis and `rings` from pole to pole; both are
/// clamped to usable minimums. Pole triangles that would have zero area are
/// left out.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut tex_coords = Vec::new();

    for r in 0..=rings {
        let theta = PI * r as f32 / rings as f32;
        for s in 0..=segments {
            let phi = 2.0 * PI * s as f32 / segments as f32;
            let n = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
            positions.push(n * radius);
            normals.push(n);
            tex_coords.push(Vec2::new(
                s as f32 / segments as f32,
                r as f32 / rings as f32,
            ));
        }
    }

    let index = |r: u32, s: u32| r * (segments + 1) + s;
    let mut faces = Vec::new();
    for r in 0..rings {
        for s in 0..segments {
            let a = index(r, s);
            let b = index(r + 1, s);
            let c = index(r + 1, s + 1);
            let d = index(r, s + 1);
            if r + 1 != rings {
                faces.push(TriangleIndices::new(a, b, c));
            }
            if r != 0 {
                faces.push(TriangleIndices::new(a, c, d));
            }
        }
    }

    let all_faces = 0..faces.len();
    Mesh::from_parts(positions, faces, normals, Some(tex_coords), vec![all_faces])
}
