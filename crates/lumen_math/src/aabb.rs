use crate::{Ray, Vec3};

/// Axis-Aligned Bounding Box used to prune mesh traversal.
///
/// Once non-empty, `min <= max` holds componentwise. The empty box
/// (`min = +inf`, `max = -inf`) contains nothing and is never hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points, in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every point. Empty input gives the empty box.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        points
            .into_iter()
            .fold(Self::EMPTY, |aabb, p| aabb.including(*p))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Grow the box so that it contains `point`.
    pub fn including(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// True if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// `max - min`.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Vec3 {
        self.min + self.extents() * 0.5
    }

    /// True if `point` lies inside the closed box.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Test if a ray intersects this AABB within the ray's valid range.
    ///
    /// Uses the slab method. A zero direction component means the ray is
    /// parallel to that slab: it can only hit if the origin already lies
    /// between the slab planes. The test is closed, so rays that only touch
    /// a face, edge or corner count as hits.
    pub fn hit(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut range = ray.range;
        if range.is_empty() {
            return false;
        }

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if direction == 0.0 {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            range.min = t0.max(range.min);
            range.max = t1.min(range.max);
            if range.max < range.min {
                return false;
            }
        }

        true
    }

    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
