pub mod shadow_mask;

pub use shadow_mask::{ShadowGradient, ShadowMask, ShadowMaskBuilder};
