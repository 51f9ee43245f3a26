use crate::{Interval, Vec3};

/// A ray in 3D space with origin, direction, and valid parameter range.
///
/// The direction does not have to be normalized for box and triangle tests;
/// rays produced by the camera are unit length. `range` is the interval of
/// `t` values that count as hits. Traversal narrows `range.max` to the
/// closest hit found so far.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub range: Interval,
}

impl Ray {
    /// Create a ray covering `[0, inf]`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            range: Interval::forward(),
        }
    }

    /// Same ray with a different valid range.
    pub fn with_range(self, range: Interval) -> Self {
        Self { range, ..self }
    }

    /// Same ray with the upper bound lowered to `t_max`.
    #[inline]
    pub fn clipped(&self, t_max: f32) -> Self {
        Self {
            range: self.range.clip_max(t_max),
            ..*self
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
