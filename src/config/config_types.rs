// src/config/config_types.rs
//
// Config types for the app

use crate::models::grid_model::{Direction, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::utilities::easing::EasingType;
use crate::views::curtain::{DEFAULT_MAX_ALPHA, DEFAULT_MAX_WAVE};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub texture_file: String,
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

/************************* Curtain Config ********************/
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurtainConfig {
    pub columns: u32,
    pub rows: u32,
    pub direction: Direction,
    pub smoothing: f32, // fraction of the remaining gap closed per tick
    pub tick_ms: u64,
    pub max_wave: f32, // fold amplitude in px at full pull
    pub max_alpha: u8,
    pub easing: EasingType,
    pub per_vertex_color: bool, // false selects the shadow mask overlay
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            direction: Direction::Right,
            smoothing: 0.3,
            tick_ms: 20,
            max_wave: DEFAULT_MAX_WAVE,
            max_alpha: DEFAULT_MAX_ALPHA,
            easing: EasingType::EaseIn,
            per_vertex_color: true,
        }
    }
}
