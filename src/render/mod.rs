// src/render/mod.rs
// Drawing of generated curtain frames

pub mod compositor;
pub mod nannou_canvas;

pub use compositor::{CurtainFrame, FrameCompositor, MeshCanvas, MeshTexture, TextureSource};
pub use nannou_canvas::{
    load_texture, to_draw_point, to_surface_point, MaskTextureCache, NannouMeshCanvas,
};
