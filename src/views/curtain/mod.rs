pub mod curtain_view;
pub mod mesh_generator;

pub use curtain_view::CurtainView;
pub use mesh_generator::{
    generate, pack_gray, unpack_argb, CurtainState, MeshBuffers, MeshParams, ShadingMode,
    DEFAULT_MAX_ALPHA, DEFAULT_MAX_WAVE,
};
