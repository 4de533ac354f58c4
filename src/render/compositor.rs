// src/render/compositor.rs
//
// Turns one generated frame into mesh draw calls: the textured curtain,
// then the shadow mask overlay when per-vertex colors are unavailable.

use crate::effects::ShadowMask;
use crate::models::Grid;

/// Anything that can be drawn through the curtain mesh.
pub trait TextureSource {
    fn dimensions(&self) -> (u32, u32);
}

/// Which texture a mesh draw samples from.
pub enum MeshTexture<'a, T> {
    Primary(&'a T),
    ShadowMask(&'a ShadowMask),
}

/// One frame's worth of borrowed mesh data.
pub struct CurtainFrame<'a, T> {
    pub texture: &'a T,
    pub grid: Grid,
    /// Interleaved x,y in surface pixels, row-major.
    pub positions: &'a [f32],
    /// Packed 0xAARRGGBB per vertex, per-vertex shading only.
    pub colors: Option<&'a [u32]>,
    pub tex_coords: &'a [[f32; 2]],
    pub indices: &'a [usize],
    /// Shadow mask and the uniform alpha to draw it with.
    pub overlay: Option<(&'a ShadowMask, u8)>,
}

/// The "draw textured mesh" primitive of a rendering backend.
pub trait MeshCanvas {
    type Texture;

    fn draw_textured_mesh(
        &mut self,
        texture: MeshTexture<'_, Self::Texture>,
        frame: &CurtainFrame<'_, Self::Texture>,
        colors: Option<&[u32]>,
        alpha: u8,
    );
}

pub struct FrameCompositor;

impl FrameCompositor {
    /// Issues the draw calls for `frame` and returns how many were made.
    pub fn compose<C: MeshCanvas>(frame: &CurtainFrame<'_, C::Texture>, canvas: &mut C) -> usize {
        canvas.draw_textured_mesh(MeshTexture::Primary(frame.texture), frame, frame.colors, 255);

        match frame.overlay {
            Some((mask, alpha)) => {
                canvas.draw_textured_mesh(MeshTexture::ShadowMask(mask), frame, None, alpha);
                2
            }
            None => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ShadowMaskBuilder;

    struct Bitmap;

    impl TextureSource for Bitmap {
        fn dimensions(&self) -> (u32, u32) {
            (16, 16)
        }
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, bool, u8)>,
    }

    impl MeshCanvas for Recorder {
        type Texture = Bitmap;

        fn draw_textured_mesh(
            &mut self,
            texture: MeshTexture<'_, Bitmap>,
            _frame: &CurtainFrame<'_, Bitmap>,
            colors: Option<&[u32]>,
            alpha: u8,
        ) {
            let name = match texture {
                MeshTexture::Primary(_) => "primary",
                MeshTexture::ShadowMask(_) => "mask",
            };
            self.calls.push((name, colors.is_some(), alpha));
        }
    }

    fn frame<'a>(
        colors: Option<&'a [u32]>,
        overlay: Option<(&'a ShadowMask, u8)>,
    ) -> CurtainFrame<'a, Bitmap> {
        CurtainFrame {
            texture: &Bitmap,
            grid: Grid::new(1, 1),
            positions: &[0.0; 8],
            colors,
            tex_coords: &[[0.0, 0.0]; 4],
            indices: &[0, 2, 1, 1, 2, 3],
            overlay,
        }
    }

    #[test]
    fn test_per_vertex_single_draw() {
        let colors = [0xFFFF_FFFF; 4];
        let mut canvas = Recorder::default();
        let calls = FrameCompositor::compose(&frame(Some(&colors), None), &mut canvas);
        assert_eq!(calls, 1);
        assert_eq!(canvas.calls, vec![("primary", true, 255)]);
    }

    #[test]
    fn test_mask_overlay_follows_primary() {
        let mask = ShadowMaskBuilder::new(1, 255).build(16, 16).unwrap();
        let mut canvas = Recorder::default();
        let calls = FrameCompositor::compose(&frame(None, Some((&mask, 90))), &mut canvas);
        assert_eq!(calls, 2);
        assert_eq!(canvas.calls, vec![("primary", false, 255), ("mask", false, 90)]);
    }
}
