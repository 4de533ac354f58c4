// src/views/mod.rs

pub mod curtain;

pub use curtain::{CurtainState, CurtainView, MeshBuffers, MeshParams, ShadingMode};
