use serde::{Deserialize, Serialize};

/// A closed range of ray parameters `[min, max]`.
///
/// An interval with `min > max` is empty. Rays carry one of these as their
/// valid parametric range; the closest hit found so far shrinks `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range of a physical ray: everything in front of the origin.
    pub fn forward() -> Self {
        Self::new(0.0, f32::INFINITY)
    }

    /// True if no value lies in the interval. NaN bounds count as empty.
    pub fn is_empty(&self) -> bool {
        self.min > self.max || self.min.is_nan() || self.max.is_nan()
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Overlap of two intervals (possibly empty).
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Same interval with the upper bound lowered to `max` if that is tighter.
    pub fn clip_max(&self, max: f32) -> Interval {
        Interval::new(self.min, self.max.min(max))
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

impl Default for Interval {
    fn default() -> Self {
        Self::forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains_is_inclusive() {
        let interval = Interval::new(0.0, 10.0);
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));

        assert!(!interval.surrounds(0.0));
        assert!(interval.surrounds(5.0));
    }

    #[test]
    fn test_interval_intersect() {
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(3.0, 8.0);
        assert_eq!(a.intersect(&b), Interval::new(3.0, 5.0));

        let c = Interval::new(6.0, 8.0);
        assert!(a.intersect(&c).is_empty());

        // Touching endpoints still overlap in a closed interval
        let d = Interval::new(5.0, 9.0);
        assert!(!a.intersect(&d).is_empty());
    }

    #[test]
    fn test_interval_empty_and_universe() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::UNIVERSE.contains(1e10));
        assert!(Interval::new(f32::NAN, 1.0).is_empty());
    }

    #[test]
    fn test_interval_clip_max() {
        let range = Interval::forward();
        assert_eq!(range.clip_max(3.0), Interval::new(0.0, 3.0));
        assert_eq!(Interval::new(0.0, 2.0).clip_max(3.0), Interval::new(0.0, 2.0));
    }
}
