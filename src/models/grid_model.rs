// src/models/grid_model.rs
//
// The fixed-resolution lattice the bitmap is warped over, plus the
// surface and pull point it is laid out against.

use serde::Deserialize;

pub const DEFAULT_COLUMNS: u32 = 40;
pub const DEFAULT_ROWS: u32 = 7;

/// Which edge of the curtain slides. The opposite edge stays anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Right edge anchored, left edge slides.
    Left,
    /// Left edge anchored, right edge slides.
    #[default]
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: u32,
    pub rows: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
        }
    }
}

impl Grid {
    /// Zero dimensions are bumped to 1 so every grid has at least one cell.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn vertex_count(&self) -> usize {
        (self.columns as usize + 1) * (self.rows as usize + 1)
    }

    pub fn vertex_index(&self, column: u32, row: u32) -> usize {
        row as usize * (self.columns as usize + 1) + column as usize
    }

    /// Texture coordinates per vertex, (0,0) top-left to (1,1) bottom-right.
    pub fn tex_coords(&self) -> Vec<[f32; 2]> {
        let mut coords = Vec::with_capacity(self.vertex_count());
        for row in 0..=self.rows {
            for column in 0..=self.columns {
                coords.push([
                    column as f32 / self.columns as f32,
                    row as f32 / self.rows as f32,
                ]);
            }
        }
        coords
    }

    /// Two triangles per cell, indexing into the row-major vertex list.
    pub fn triangle_indices(&self) -> Vec<usize> {
        let stride = self.columns as usize + 1;
        let mut indices = Vec::with_capacity(self.columns as usize * self.rows as usize * 6);
        for row in 0..self.rows as usize {
            for column in 0..self.columns as usize {
                let top_left = row * stride + column;
                let top_right = top_left + 1;
                let bottom_left = top_left + stride;
                let bottom_right = bottom_left + 1;
                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }
        indices
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}

/// Live drag position in surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PullPoint {
    pub x: f32,
    pub y: f32,
}

impl PullPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts a fraction of the surface (0..1 on each axis) into pixels.
    pub fn from_fraction(fx: f32, fy: f32, surface: SurfaceSize) -> Self {
        Self {
            x: surface.width * fx,
            y: surface.height * fy,
        }
    }
}
