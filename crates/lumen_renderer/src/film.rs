//! Film: the accumulation buffer behind progressive rendering.
//!
//! Each pixel keeps the running mean of every color added to it together
//! with a sample count, so a new pass refines the image without revisiting
//! earlier samples.

use glam::{IVec2, UVec2};

use crate::integrator::Color;

/// Number of pixels at `resolution`, computed without `u32` overflow.
#[inline]
fn buffer_len(resolution: UVec2) -> usize {
    resolution.x as usize * resolution.y as usize
}

/// Resolution-sized color buffer with per-pixel sample counts.
#[derive(Debug, Clone)]
pub struct Film {
    resolution: UVec2,
    pixels: Vec<Color>,
    weights: Vec<u32>,
}

impl Film {
    /// Create a black film. A non-positive width or height gives an empty
    /// film that ignores every write.
    pub fn new(width: i32, height: i32) -> Self {
        let resolution = if width > 0 && height > 0 {
            UVec2::new(width as u32, height as u32)
        } else {
            UVec2::ZERO
        };
        let size = buffer_len(resolution);

        Self {
            resolution,
            pixels: vec![Color::ZERO; size],
            weights: vec![0; size],
        }
    }

    /// Film dimensions in pixels.
    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.resolution.x
    }

    pub fn height(&self) -> u32 {
        self.resolution.y
    }

    /// Row-major mean colors, `width * height` entries.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Row-major sample counts, parallel to [`Film::pixels`].
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    fn index(&self, pixel: IVec2) -> Option<usize> {
        let in_range = pixel.x >= 0
            && pixel.y >= 0
            && (pixel.x as u32) < self.resolution.x
            && (pixel.y as u32) < self.resolution.y;
        in_range.then(|| pixel.y as usize * self.resolution.x as usize + pixel.x as usize)
    }

    /// Mean color of a pixel, `None` outside the film.
    pub fn pixel(&self, pixel: IVec2) -> Option<Color> {
        self.index(pixel).map(|i| self.pixels[i])
    }

    /// Number of samples accumulated into a pixel (0 outside the film).
    pub fn weight(&self, pixel: IVec2) -> u32 {
        self.index(pixel).map_or(0, |i| self.weights[i])
    }

    /// Fold one sample into a pixel's running mean.
    ///
    /// Coordinates outside the film are ignored.
    pub fn add_pixel_color(&mut self, pixel: IVec2, color: Color) {
        let Some(i) = self.index(pixel) else {
            return;
        };

        let weight = self.weights[i] + 1;
        self.weights[i] = weight;
        let mean = self.pixels[i];
        self.pixels[i] = mean + (color - mean) / weight as f32;
    }

    /// Reset every color and weight to zero.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
        self.weights.fill(0);
    }

    /// Total samples across the film.
    pub fn sample_count(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }

    /// Convert to 8-bit RGBA (for saving). Colors are clamped to `[0, 1]`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
            bytes.extend_from_slice(&[c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255]);
        }
        bytes
    }

    /// RGBA `f32` texels as raw bytes, ready for a texture upload.
    ///
    /// Alpha is 1 for pixels that have received samples and 0 otherwise.
    pub fn texture_data(&self) -> Vec<u8> {
        let texels: Vec<[f32; 4]> = self
            .pixels
            .iter()
            .zip(&self.weights)
            .map(|(c, &w)| [c.x, c.y, c.z, if w > 0 { 1.0 } else { 0.0 }])
            .collect();
        bytemuck::cast_slice(&texels).to_vec()
    }
}
