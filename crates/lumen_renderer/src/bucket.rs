//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets). Progressive rendering works
//! through them one at a time; the pixels inside a bucket are evaluated in
//! parallel with rayon and handed back for accumulation into the film.

use glam::{IVec2, UVec2};
use lumen_core::Scene;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::renderer::render_pixel;
use crate::{Camera, Color, Integrator, RenderConfig};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Image coordinates of the `i`-th pixel in row-major bucket order.
    #[inline]
    pub fn pixel(&self, i: u32) -> UVec2 {
        UVec2::new(self.x + i % self.width, self.y + i / self.width)
    }
}

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets are rendered from the center outward so the middle of the
/// image converges first. A zero `bucket_size` is treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center (stable, so ties keep
/// scanline order).
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Samples per pixel in `samples`
    pub samples_per_pixel: u32,
    /// Sample colors, pixels in row-major order and each pixel's samples
    /// contiguous
    pub samples: Vec<Color>,
}

impl BucketResult {
    /// Iterate over `(pixel, samples)` pairs.
    pub fn pixels(&self) -> impl Iterator<Item = (IVec2, &[Color])> + '_ {
        let stride = self.samples_per_pixel.max(1) as usize;
        self.samples
            .chunks(stride)
            .enumerate()
            .map(move |(i, samples)| (self.bucket.pixel(i as u32).as_ivec2(), samples))
    }
}

/// Seed for one pixel in one pass, so results do not depend on how rayon
/// schedules the work.
#[inline]
fn pixel_seed(seed: u64, pass: u32, pixel: UVec2, resolution: UVec2) -> u64 {
    let index = pixel.y as u64 * resolution.x as u64 + pixel.x as u64;
    seed ^ ((pass as u64) << 40) ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render a single bucket.
///
/// Pixels are distributed over the rayon pool; each worker owns its pixels
/// and only reads the scene.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    config: &RenderConfig,
    resolution: UVec2,
    pass: u32,
) -> BucketResult {
    let samples = (0..bucket.pixel_count())
        .into_par_iter()
        .flat_map_iter(|i| {
            let pixel = bucket.pixel(i);
            let mut rng = StdRng::seed_from_u64(pixel_seed(config.seed, pass, pixel, resolution));
            let mut out = Vec::with_capacity(config.samples_per_pass as usize);
            render_pixel(
                camera, scene, integrator, pixel.x, pixel.y, resolution, config, &mut rng,
                &mut out,
            );
            out
        })
        .collect();

    BucketResult {
        bucket: *bucket,
        samples_per_pixel: config.samples_per_pass,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::shapes;
    use lumen_math::{CameraParameters, Vec3};
    use std::collections::HashSet;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
    }

    #[test]
    fn test_buckets_cover_each_pixel_once() {
        let buckets = generate_buckets(37, 23, 8);
        let mut seen = HashSet::new();
        for bucket in &buckets {
            for i in 0..bucket.pixel_count() {
                assert!(seen.insert(bucket.pixel(i)));
            }
        }
        assert_eq!(seen.len(), 37 * 23);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_empty_image_has_no_buckets() {
        assert!(generate_buckets(0, 0, 16).is_empty());
        assert!(generate_buckets(16, 0, 16).is_empty());
        assert_eq!(generate_buckets(4, 4, 0).len(), 16);
    }

    #[test]
    fn test_render_bucket_is_deterministic() {
        let scene: Scene = std::iter::once(shapes::cube(0.5)).collect();
        let camera = Camera::new(&CameraParameters::look_at(Vec3::new(1.0, 1.0, 3.0), Vec3::ZERO));
        let config = RenderConfig {
            samples_per_pass: 2,
            seed: 7,
            ..Default::default()
        };
        let integrator = config.integrator();
        let resolution = UVec2::new(16, 16);
        let bucket = Bucket::new(4, 4, 8, 8, 0);

        let a = render_bucket(&bucket, &camera, &scene, &integrator, &config, resolution, 0);
        let b = render_bucket(&bucket, &camera, &scene, &integrator, &config, resolution, 0);

        assert_eq!(a.samples.len(), 8 * 8 * 2);
        assert_eq!(a.samples, b.samples);

        let pixels: Vec<_> = a.pixels().collect();
        assert_eq!(pixels.len(), 64);
        assert_eq!(pixels[0].0, IVec2::new(4, 4));
        assert_eq!(pixels[9].0, IVec2::new(5, 5));
        assert!(pixels.iter().all(|(_, s)| s.len() == 2));
    }
}
