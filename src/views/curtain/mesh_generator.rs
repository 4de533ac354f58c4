// src/views/curtain/mesh_generator.rs
//
// Per-frame curtain deformation. Every vertex position and shade is
// recomputed from the pull point, the trailing offset and the direction.
// Buffers are allocated once per grid and overwritten in place.

use crate::models::{Direction, Grid, PullPoint, SurfaceSize};
use crate::utilities::easing::EasingType;
use std::f32::consts::PI;

pub const DEFAULT_MAX_WAVE: f32 = 60.0;
pub const DEFAULT_MAX_ALPHA: u8 = 0xFF;

// phase advance of the fold wave per grid column
const WAVE_PHASE_STEP: f32 = 0.5;
// compression (in px) that maps to a full-strength overlay, before the x4 gain
const OVERLAY_SCALE: f32 = 120.0;
const OVERLAY_GAIN: f32 = 4.0;

/// How fold shading reaches the screen. Resolved once per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// Grayscale color per vertex, multiplied into the texture.
    PerVertex,
    /// One uniform alpha for a precomputed shadow mask overlay.
    ShadowMask,
}

impl ShadingMode {
    pub fn from_capability(supports_per_vertex_color: bool) -> Self {
        if supports_per_vertex_color {
            ShadingMode::PerVertex
        } else {
            ShadingMode::ShadowMask
        }
    }
}

/// Everything the deformation reads in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CurtainState {
    pub pull: PullPoint,
    pub trailing_offset_x: f32,
    pub direction: Direction,
    pub grid: Grid,
    pub surface: SurfaceSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    pub easing: EasingType,
    pub max_wave: f32,
    pub max_alpha: u8,
    pub shading: ShadingMode,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            easing: EasingType::EaseIn,
            max_wave: DEFAULT_MAX_WAVE,
            max_alpha: DEFAULT_MAX_ALPHA,
            shading: ShadingMode::PerVertex,
        }
    }
}

/// Interleaved x,y positions plus either per-vertex colors or one overlay alpha.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    grid: Grid,
    shading: ShadingMode,
    positions: Vec<f32>,
    colors: Vec<u32>,
    overlay_alpha: u8,
}

impl MeshBuffers {
    pub fn new(grid: Grid, shading: ShadingMode) -> Self {
        let count = grid.vertex_count();
        let colors = match shading {
            ShadingMode::PerVertex => vec![pack_gray(255); count],
            ShadingMode::ShadowMask => Vec::new(),
        };
        Self {
            grid,
            shading,
            positions: vec![0.0; count * 2],
            colors,
            overlay_alpha: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Some only in per-vertex mode.
    pub fn colors(&self) -> Option<&[u32]> {
        match self.shading {
            ShadingMode::PerVertex => Some(&self.colors),
            ShadingMode::ShadowMask => None,
        }
    }

    /// Uniform alpha for the shadow mask overlay. Always 0 in per-vertex mode.
    pub fn overlay_alpha(&self) -> u8 {
        self.overlay_alpha
    }

    pub fn position(&self, column: u32, row: u32) -> (f32, f32) {
        let i = self.grid.vertex_index(column, row) * 2;
        (self.positions[i], self.positions[i + 1])
    }

    // reallocates only when the layout the buffers were sized for changes
    fn ensure_layout(&mut self, grid: Grid, shading: ShadingMode) {
        if self.grid != grid || self.shading != shading {
            *self = Self::new(grid, shading);
        }
    }

    // undeformed lattice, full brightness, no overlay
    fn fill_flat(&mut self, surface: SurfaceSize) {
        let columns = self.grid.columns;
        let rows = self.grid.rows;
        let x_block = finite_or_zero(surface.width / columns as f32);
        let y_block = finite_or_zero(surface.height / rows as f32);

        for row in 0..=rows {
            for column in 0..=columns {
                let i = self.grid.vertex_index(column, row);
                self.positions[i * 2] = column as f32 * x_block;
                self.positions[i * 2 + 1] = row as f32 * y_block;
            }
        }
        self.colors.fill(pack_gray(255));
        self.overlay_alpha = 0;
    }
}

/// Recomputes the whole mesh for one frame.
///
/// Degenerate inputs (zero or non-finite surface, non-finite pull point or
/// trailing offset, or a zero vertical span around the pull point) produce
/// the flat, unshaded grid instead of dividing by zero.
pub fn generate(state: &CurtainState, params: &MeshParams, buffers: &mut MeshBuffers) {
    buffers.ensure_layout(state.grid, params.shading);

    let surface = state.surface;
    let pull = state.pull;
    let trailing = state.trailing_offset_x;

    if surface.is_degenerate() || !pull.x.is_finite() || !pull.y.is_finite() || !trailing.is_finite()
    {
        buffers.fill_flat(surface);
        return;
    }

    let width = surface.width;
    let height = surface.height;

    // larger of the two vertical spans from the pull point to the edges
    let long_dis_side = pull.y.max(height - pull.y);
    if long_dis_side <= 0.0 {
        buffers.fill_flat(surface);
        return;
    }

    let grid = state.grid;
    let columns = grid.columns;
    let rows = grid.rows;
    let x_block = width / columns as f32;
    let y_block = height / rows as f32;

    let ratio_global = pull.x / width;
    let gap = params.max_wave
        * match state.direction {
            Direction::Left => ratio_global,
            Direction::Right => 1.0 - ratio_global,
        };

    let overlay_per_px = params.max_alpha as f32 / OVERLAY_SCALE * OVERLAY_GAIN;
    let mut overlay_alpha = 0.0_f32;

    for row in 0..=rows {
        let fy = y_block * row as f32;
        let long_ratio = params
            .easing
            .interpolate((fy - pull.y).abs() / long_dis_side);
        let real_width = long_ratio * (pull.x - trailing);
        let ratio_row = (pull.x - real_width) / width;

        for column in 0..=columns {
            let i = grid.vertex_index(column, row);
            let col = column as f32;

            buffers.positions[i * 2] = match state.direction {
                Direction::Left => (columns - column) as f32 * x_block * ratio_row + col * x_block,
                Direction::Right => col * x_block * ratio_row,
            };

            let compression = (col * WAVE_PHASE_STEP - PI).sin() * gap + gap;
            let real_height = height - compression;
            let offset_y = real_height / rows as f32 * row as f32;
            buffers.positions[i * 2 + 1] = (height - real_height) / 2.0 + offset_y;

            let channel = 255 - (compression as i32) * 2;
            match params.shading {
                ShadingMode::PerVertex => {
                    buffers.colors[i] = pack_gray(channel.clamp(0, 255) as u8);
                }
                ShadingMode::ShadowMask => {
                    if channel < 255 {
                        let alpha = (255 - channel) as f32 * overlay_per_px;
                        overlay_alpha = overlay_alpha.max(alpha);
                    }
                }
            }
        }
    }

    buffers.overlay_alpha = overlay_alpha.clamp(0.0, 255.0) as u8;
}

/// Opaque gray, 0xAARRGGBB.
#[inline]
pub fn pack_gray(channel: u8) -> u32 {
    let c = channel as u32;
    0xFF00_0000 | (c << 16) | (c << 8) | c
}

/// Splits 0xAARRGGBB into [a, r, g, b].
#[inline]
pub fn unpack_argb(color: u32) -> [u8; 4] {
    color.to_be_bytes()
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
