// src/effects/shadow_mask.rs
//
// Static fold shading for backends that can't tint a textured mesh per
// vertex. A repeating horizontal alpha gradient, one wave per 2π grid
// columns, painted once into a transparent image the size of the bitmap.

use nannou::image::RgbaImage;
use rayon::prelude::*;
use std::f32::consts::{PI, TAU};

/// Gradient stops for one wave period plus its placement on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowGradient {
    /// Width in pixels of one full oscillation.
    pub single_wave: f32,
    /// Grid columns covered by one period, always odd.
    pub block_per_wave: usize,
    /// Start of the first period on the x axis.
    pub phase_offset: f32,
    /// Alpha-only ARGB colors, alpha in the top byte.
    pub colors: Vec<u32>,
    /// Stop positions in [0, 1), evenly spaced.
    pub offsets: Vec<f32>,
}

impl ShadowGradient {
    /// Alpha of the repeating gradient at horizontal position `x`.
    pub fn alpha_at(&self, x: f32) -> u8 {
        let mut t = (x - self.phase_offset) / self.single_wave;
        t -= t.floor();

        let last = self.offsets.len() - 1;

        if t <= self.offsets[0] {
            return (self.colors[0] >> 24) as u8;
        }
        // past the last stop the final color holds until the period wraps
        if t >= self.offsets[last] {
            return (self.colors[last] >> 24) as u8;
        }

        let k = self.offsets.iter().rposition(|&o| o <= t).unwrap_or(0);
        let (t0, t1) = (self.offsets[k], self.offsets[k + 1]);
        let a0 = (self.colors[k] >> 24) as f32;
        let a1 = (self.colors[k + 1] >> 24) as f32;
        let mix = (t - t0) / (t1 - t0);
        (a0 + (a1 - a0) * mix).round().clamp(0.0, 255.0) as u8
    }
}

/// The painted mask. Black everywhere, alpha varies along x only.
#[derive(Debug, Clone)]
pub struct ShadowMask {
    pub image: RgbaImage,
    pub gradient: ShadowGradient,
}

impl ShadowMask {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width() == width && self.height() == height
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShadowMaskBuilder {
    columns: u32,
    max_alpha: u8,
}

impl ShadowMaskBuilder {
    pub fn new(columns: u32, max_alpha: u8) -> Self {
        Self {
            columns: columns.max(1),
            max_alpha,
        }
    }

    /// Lays out the gradient stops for a bitmap `bitmap_width` pixels wide.
    /// Returns None for a zero-width bitmap.
    pub fn gradient(&self, bitmap_width: u32) -> Option<ShadowGradient> {
        let column_width = bitmap_width as f32 / self.columns as f32;
        if column_width <= 0.0 {
            return None;
        }

        let single_wave = column_width * TAU;
        let mut block_per_wave = (single_wave / column_width) as usize;
        if block_per_wave % 2 == 0 {
            block_per_wave += 1;
        }

        let waves = bitmap_width as f32 / single_wave;
        let phase_offset = (waves - waves.floor()) * single_wave + single_wave / 2.0;

        let half_wave = block_per_wave / 2;
        let per_alpha = (self.max_alpha as usize / half_wave.saturating_sub(1).max(1)) as f32;
        let per_offset = 1.0 / block_per_wave as f32;

        let mut colors = vec![0u32; block_per_wave];
        let mut offsets = vec![0f32; block_per_wave];
        for i in -(half_wave as isize)..=(half_wave as isize) {
            let from_edge = half_wave - i.unsigned_abs();
            let index = (i + half_wave as isize) as usize;
            let alpha = (per_alpha * (from_edge as f32 / block_per_wave as f32 * PI).sin())
                .clamp(0.0, 255.0) as u32;
            colors[index] = alpha << 24;
            offsets[index] = per_offset * index as f32;
        }

        Some(ShadowGradient {
            single_wave,
            block_per_wave,
            phase_offset,
            colors,
            offsets,
        })
    }

    /// Paints the gradient across a transparent `width` x `height` image.
    /// Returns None if either dimension is zero.
    pub fn build(&self, width: u32, height: u32) -> Option<ShadowMask> {
        if width == 0 || height == 0 {
            return None;
        }
        let gradient = self.gradient(width)?;

        tracing::debug!(
            "building shadow mask {}x{}: wave {:.1}px, {} blocks per wave",
            width,
            height,
            gradient.single_wave,
            gradient.block_per_wave
        );

        // every row is identical, so sample once at pixel centres and copy
        let row: Vec<u8> = (0..width)
            .flat_map(|x| [0, 0, 0, gradient.alpha_at(x as f32 + 0.5)])
            .collect();

        let mut pixels = vec![0u8; row.len() * height as usize];
        pixels
            .par_chunks_mut(row.len())
            .for_each(|dst| dst.copy_from_slice(&row));

        let image = RgbaImage::from_raw(width, height, pixels)?;
        Some(ShadowMask { image, gradient })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ShadowMaskBuilder {
        ShadowMaskBuilder::new(40, 255)
    }

    #[test]
    fn test_block_per_wave_is_odd() {
        let gradient = builder().gradient(800).unwrap();
        assert_eq!(gradient.block_per_wave % 2, 1);
        assert_eq!(gradient.block_per_wave, 7);
        assert_eq!(gradient.colors.len(), gradient.block_per_wave);
        assert_eq!(gradient.offsets.len(), gradient.block_per_wave);
    }

    #[test]
    fn test_single_wave_spans_two_pi_columns() {
        let gradient = builder().gradient(800).unwrap();
        assert!((gradient.single_wave - 20.0 * TAU).abs() < 1e-3);
    }

    #[test]
    fn test_colors_are_symmetric_alpha_only() {
        let gradient = builder().gradient(800).unwrap();
        let n = gradient.colors.len();
        for i in 0..n {
            assert_eq!(gradient.colors[i], gradient.colors[n - 1 - i]);
            assert_eq!(gradient.colors[i] & 0x00FF_FFFF, 0);
        }
        // edges are clear, the centre band is the darkest
        assert_eq!(gradient.colors[0], 0);
        let center = gradient.colors[n / 2] >> 24;
        assert!(gradient.colors.iter().all(|c| (c >> 24) <= center));
        assert!(center > 0);
    }

    #[test]
    fn test_offsets_evenly_spaced() {
        let gradient = builder().gradient(800).unwrap();
        let step = 1.0 / gradient.block_per_wave as f32;
        for (i, offset) in gradient.offsets.iter().enumerate() {
            assert!((offset - step * i as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gradient_repeats() {
        let gradient = builder().gradient(800).unwrap();
        for x in [3.0_f32, 40.0, 77.5, 101.0] {
            let a = gradient.alpha_at(x) as i32;
            let b = gradient.alpha_at(x + gradient.single_wave) as i32;
            assert!((a - b).abs() <= 1, "x = {}: {} vs {}", x, a, b);
        }
    }

    #[test]
    fn test_max_alpha_scales_mask() {
        let full = builder().gradient(800).unwrap();
        let faint = ShadowMaskBuilder::new(40, 64).gradient(800).unwrap();
        let n = full.colors.len() / 2;
        assert!((faint.colors[n] >> 24) < (full.colors[n] >> 24));
    }

    #[test]
    fn test_mask_matches_bitmap_and_varies_only_along_x() {
        let mask = builder().build(320, 48).unwrap();
        assert!(mask.matches(320, 48));

        for x in 0..320 {
            let top = mask.image.get_pixel(x, 0).0;
            let bottom = mask.image.get_pixel(x, 47).0;
            assert_eq!(top, bottom);
            assert_eq!(&top[..3], &[0, 0, 0]);
        }
        assert!(mask.image.pixels().any(|p| p.0[3] > 0));
    }

    #[test]
    fn test_build_is_idempotent() {
        let a = builder().build(200, 10).unwrap();
        let b = builder().build(200, 10).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
        assert_eq!(a.gradient, b.gradient);
    }

    #[test]
    fn test_empty_bitmap_skips_construction() {
        assert!(builder().build(0, 100).is_none());
        assert!(builder().build(100, 0).is_none());
        assert!(builder().gradient(0).is_none());
    }
}
