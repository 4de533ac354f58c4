// src/lib.rs
//
// Curtain slide transition: a bitmap drawn through a deformable mesh that
// follows a pull point with a trailing wave and fold shading.

pub mod animation;
pub mod config;
pub mod controllers;
pub mod effects;
pub mod error;
pub mod models;
pub mod render;
pub mod utilities;
pub mod views;

pub use error::{CurtainError, Result};
