// src/views/curtain/curtain_view.rs
//
// Owns the curtain state and drives it: input setters, the periodic tick
// that advances the trailing offset, lazy shadow mask construction and
// per-frame mesh generation. Drawing is left to the FrameCompositor.

use std::time::Duration;

use super::mesh_generator::{generate, CurtainState, MeshBuffers, MeshParams, ShadingMode};
use crate::animation::{TickTimer, TrailingOffset};
use crate::config::CurtainConfig;
use crate::effects::{ShadowMask, ShadowMaskBuilder};
use crate::models::{Direction, Grid, PullPoint, SurfaceSize};
use crate::render::{CurtainFrame, TextureSource};

pub struct CurtainView<T> {
    state: CurtainState,
    params: MeshParams,
    trailing: TrailingOffset,
    timer: TickTimer,
    buffers: MeshBuffers,
    tex_coords: Vec<[f32; 2]>,
    indices: Vec<usize>,
    texture: Option<T>,
    mask_builder: ShadowMaskBuilder,
    shadow_mask: Option<ShadowMask>,
    center: (f32, f32),
    redraw_requested: bool,
}

impl<T: TextureSource> CurtainView<T> {
    pub fn new(config: &CurtainConfig) -> Self {
        let grid = Grid::new(config.columns, config.rows);
        let params = MeshParams {
            easing: config.easing,
            max_wave: config.max_wave,
            max_alpha: config.max_alpha,
            shading: ShadingMode::from_capability(config.per_vertex_color),
        };

        let trailing = TrailingOffset::new(0.0, config.smoothing);
        let timer = TickTimer::new(Duration::from_millis(config.tick_ms));

        tracing::info!(
            "Curtain view {}x{} grid, shading {:?}",
            grid.columns,
            grid.rows,
            params.shading
        );
        tracing::debug!(
            "trailing offset settles within 1% after {} ticks of {:?}",
            trailing.ticks_to_converge(0.01),
            timer.period()
        );

        Self {
            state: CurtainState {
                pull: PullPoint::default(),
                trailing_offset_x: 0.0,
                direction: config.direction,
                grid,
                surface: SurfaceSize::default(),
            },
            params,
            trailing,
            timer,
            buffers: MeshBuffers::new(grid, params.shading),
            tex_coords: grid.tex_coords(),
            indices: grid.triangle_indices(),
            texture: None,
            mask_builder: ShadowMaskBuilder::new(grid.columns, config.max_alpha),
            shadow_mask: None,
            center: (0.0, 0.0),
            redraw_requested: false,
        }
    }

    /************************ lifecycle ************************/

    /// Starts the tick. Call when the view becomes visible.
    pub fn attach(&mut self) {
        self.timer.start();
        self.redraw_requested = true;
    }

    /// Stops the tick. Nothing advances until the next attach.
    pub fn detach(&mut self) {
        self.timer.stop();
    }

    pub fn is_attached(&self) -> bool {
        self.timer.is_running()
    }

    /************************ input ************************/

    /// Replaces the texture. The shadow mask is rebuilt when the shading mode
    /// needs it and the old one no longer matches the bitmap size.
    pub fn set_texture(&mut self, texture: T) {
        let (width, height) = texture.dimensions();
        tracing::info!("Texture assigned: {}x{}", width, height);

        if self
            .shadow_mask
            .as_ref()
            .is_some_and(|mask| !mask.matches(width, height))
        {
            self.shadow_mask = None;
        }
        self.texture = Some(texture);

        if self.params.shading == ShadingMode::ShadowMask && self.shadow_mask.is_none() {
            self.shadow_mask = self.mask_builder.build(width, height);
            if self.shadow_mask.is_none() {
                tracing::warn!("Texture has no area, shadow mask skipped");
            }
        }

        self.redraw_requested = true;
    }

    /// Drops the texture and its mask; the view goes back to drawing nothing.
    pub fn clear_texture(&mut self) -> Option<T> {
        self.shadow_mask = None;
        self.redraw_requested = true;
        self.texture.take()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.direction != direction {
            tracing::debug!("Direction set to {:?}", direction);
        }
        self.state.direction = direction;
        self.redraw_requested = true;
    }

    /// Pull point in surface pixels. Non-finite coordinates are ignored.
    pub fn set_pull_point(&mut self, x: f32, y: f32) {
        self.apply_pull(PullPoint::new(x, y));
    }

    /// Pull point as a fraction of the surface size.
    pub fn set_pull_point_fraction(&mut self, fx: f32, fy: f32) {
        self.apply_pull(PullPoint::from_fraction(fx, fy, self.state.surface));
    }

    fn apply_pull(&mut self, pull: PullPoint) {
        if !(pull.x.is_finite() && pull.y.is_finite()) {
            tracing::warn!("Ignoring non-finite pull point ({}, {})", pull.x, pull.y);
            return;
        }
        self.state.pull = pull;
        self.redraw_requested = true;
    }

    pub fn on_surface_resize(&mut self, width: f32, height: f32) {
        self.state.surface = SurfaceSize::new(width, height);
        self.center = self.state.surface.center();
        self.redraw_requested = true;
    }

    /************************ per frame ************************/

    /// Feeds elapsed seconds to the tick timer. Each due tick moves the
    /// trailing offset once toward the pull point. Regenerates the mesh when
    /// anything changed and returns whether it did.
    pub fn update(&mut self, dt: f32) -> bool {
        let ticks = self.timer.update(dt);
        for _ in 0..ticks {
            self.state.trailing_offset_x = self.trailing.advance(self.state.pull.x);
        }
        if ticks > 0 {
            self.redraw_requested = true;
        }

        if self.redraw_requested {
            self.prepare_frame()
        } else {
            false
        }
    }

    /// Regenerates the mesh from current state. A no-op without a texture.
    pub fn prepare_frame(&mut self) -> bool {
        if self.texture.is_none() {
            return false;
        }
        generate(&self.state, &self.params, &mut self.buffers);
        self.redraw_requested = false;
        true
    }

    /// The data one frame needs to draw. None until a texture is assigned.
    pub fn frame(&self) -> Option<CurtainFrame<'_, T>> {
        let texture = self.texture.as_ref()?;
        let overlay = match self.params.shading {
            ShadingMode::PerVertex => None,
            ShadingMode::ShadowMask => self
                .shadow_mask
                .as_ref()
                .map(|mask| (mask, self.buffers.overlay_alpha())),
        };

        Some(CurtainFrame {
            texture,
            grid: self.buffers.grid(),
            positions: self.buffers.positions(),
            colors: self.buffers.colors(),
            tex_coords: &self.tex_coords,
            indices: &self.indices,
            overlay,
        })
    }

    /************************ accessors ************************/

    pub fn state(&self) -> &CurtainState {
        &self.state
    }

    pub fn shading(&self) -> ShadingMode {
        self.params.shading
    }

    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    pub fn shadow_mask(&self) -> Option<&ShadowMask> {
        self.shadow_mask.as_ref()
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    pub fn trailing_offset(&self) -> f32 {
        self.trailing.value()
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }
}
