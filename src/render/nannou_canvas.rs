// src/render/nannou_canvas.rs
//
// nannou backend for the curtain mesh. nannou's textured meshes ignore
// vertex colors, so per-vertex shading is drawn as a second, untextured
// mesh of black vertices whose alpha is the inverse of the gray channel.
// tex * c and tex * (1 - a) with a = 1 - c come out the same.

use nannou::image::DynamicImage;
use nannou::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use super::compositor::{CurtainFrame, MeshCanvas, MeshTexture, TextureSource};
use crate::effects::ShadowMask;
use crate::error::{CurtainError, Result};
use crate::models::SurfaceSize;
use crate::views::curtain::unpack_argb;

// overlay alpha is quantized so only a handful of mask textures exist
pub const MASK_ALPHA_LEVELS: u32 = 16;

impl TextureSource for wgpu::Texture {
    fn dimensions(&self) -> (u32, u32) {
        let [width, height] = self.size();
        (width, height)
    }
}

pub fn load_texture(app: &App, path: &Path) -> Result<wgpu::Texture> {
    wgpu::Texture::from_path(app, path)
        .map_err(|e| CurtainError::Texture(format!("{}: {}", path.display(), e)))
}

/// Surface pixels (top-left origin, y down) to nannou draw space
/// (centre origin, y up).
pub fn to_draw_point(x: f32, y: f32, surface: SurfaceSize) -> Point3 {
    pt3(x - surface.width / 2.0, surface.height / 2.0 - y, 0.0)
}

/// Inverse of `to_draw_point`, for mouse positions.
pub fn to_surface_point(point: Point2, surface: SurfaceSize) -> (f32, f32) {
    (point.x + surface.width / 2.0, surface.height / 2.0 - point.y)
}

/// Mask textures pre-multiplied by each overlay alpha level, uploaded on demand.
#[derive(Default)]
pub struct MaskTextureCache {
    levels: HashMap<u32, wgpu::Texture>,
    mask_size: Option<(u32, u32)>,
}

impl MaskTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(alpha: u8) -> u32 {
        (alpha as u32 * MASK_ALPHA_LEVELS + 127) / 255
    }

    /// Makes sure the texture for `alpha` exists before the frame is drawn.
    pub fn prepare(&mut self, app: &App, mask: &ShadowMask, alpha: u8) {
        let size = (mask.width(), mask.height());
        if self.mask_size != Some(size) {
            self.levels.clear();
            self.mask_size = Some(size);
        }

        let level = Self::level(alpha);
        if level == 0 || self.levels.contains_key(&level) {
            return;
        }

        tracing::debug!("uploading shadow mask level {}/{}", level, MASK_ALPHA_LEVELS);
        let image = scaled_mask(mask, level);
        let texture = wgpu::Texture::from_image(app, &image);
        self.levels.insert(level, texture);
    }

    pub fn get(&self, alpha: u8) -> Option<&wgpu::Texture> {
        self.levels.get(&Self::level(alpha))
    }

    pub fn clear(&mut self) {
        self.levels.clear();
        self.mask_size = None;
    }
}

/// The mask with its alpha channel scaled to `level / MASK_ALPHA_LEVELS`.
pub fn scaled_mask(mask: &ShadowMask, level: u32) -> DynamicImage {
    let level = level.min(MASK_ALPHA_LEVELS);
    let mut image = mask.image.clone();
    for pixel in image.pixels_mut() {
        pixel.0[3] = (pixel.0[3] as u32 * level / MASK_ALPHA_LEVELS) as u8;
    }
    DynamicImage::ImageRgba8(image)
}

pub struct NannouMeshCanvas<'a> {
    draw: &'a Draw,
    surface: SurfaceSize,
    masks: &'a MaskTextureCache,
}

impl<'a> NannouMeshCanvas<'a> {
    pub fn new(draw: &'a Draw, surface: SurfaceSize, masks: &'a MaskTextureCache) -> Self {
        Self {
            draw,
            surface,
            masks,
        }
    }

    fn points(&self, positions: &[f32]) -> Vec<Point3> {
        positions
            .chunks_exact(2)
            .map(|xy| to_draw_point(xy[0], xy[1], self.surface))
            .collect()
    }

    fn draw_textured(
        &self,
        texture: &wgpu::Texture,
        points: &[Point3],
        frame: &CurtainFrame<'_, wgpu::Texture>,
    ) {
        let vertices = points
            .iter()
            .zip(frame.tex_coords)
            .map(|(point, uv)| (*point, pt2(uv[0], uv[1])));
        self.draw
            .mesh()
            .indexed_textured(texture, vertices, frame.indices.iter().copied());
    }
}

impl MeshCanvas for NannouMeshCanvas<'_> {
    type Texture = wgpu::Texture;

    fn draw_textured_mesh(
        &mut self,
        texture: MeshTexture<'_, wgpu::Texture>,
        frame: &CurtainFrame<'_, wgpu::Texture>,
        colors: Option<&[u32]>,
        alpha: u8,
    ) {
        let points = self.points(frame.positions);

        match texture {
            MeshTexture::Primary(texture) => {
                self.draw_textured(texture, &points, frame);

                if let Some(colors) = colors {
                    let shade = points.iter().zip(colors).map(|(point, color)| {
                        let [_, gray, _, _] = unpack_argb(*color);
                        (*point, srgba(0.0, 0.0, 0.0, (255 - gray) as f32 / 255.0))
                    });
                    self.draw
                        .mesh()
                        .indexed_colored(shade, frame.indices.iter().copied());
                }
            }
            MeshTexture::ShadowMask(_) => {
                if let Some(texture) = self.masks.get(alpha) {
                    self.draw_textured(texture, &points, frame);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ShadowMaskBuilder;

    #[test]
    fn test_point_mapping_round_trips() {
        let surface = SurfaceSize::new(800.0, 400.0);
        let p = to_draw_point(0.0, 0.0, surface);
        assert_eq!((p.x, p.y), (-400.0, 200.0));
        let p = to_draw_point(800.0, 400.0, surface);
        assert_eq!((p.x, p.y), (400.0, -200.0));
        assert_eq!(to_surface_point(pt2(-400.0, 200.0), surface), (0.0, 0.0));
        assert_eq!(to_surface_point(pt2(0.0, 0.0), surface), (400.0, 200.0));
    }

    #[test]
    fn test_alpha_levels() {
        assert_eq!(MaskTextureCache::level(0), 0);
        assert_eq!(MaskTextureCache::level(255), MASK_ALPHA_LEVELS);
        assert_eq!(MaskTextureCache::level(128), 8);
        assert_eq!(MaskTextureCache::level(5), 0);
    }

    #[test]
    fn test_scaled_mask_scales_alpha_only() {
        let mask = ShadowMaskBuilder::new(10, 255).build(100, 4).unwrap();
        let half = scaled_mask(&mask, MASK_ALPHA_LEVELS / 2).to_rgba8();
        let full = scaled_mask(&mask, MASK_ALPHA_LEVELS).to_rgba8();
        assert_eq!(full.as_raw(), mask.image.as_raw());
        for (scaled, original) in half.pixels().zip(mask.image.pixels()) {
            assert_eq!(scaled.0[3], original.0[3] / 2);
            assert_eq!(&scaled.0[..3], &[0, 0, 0]);
        }
    }
}
