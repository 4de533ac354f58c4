// src/animation/trailing_offset.rs
//
// Exponential smoothing of the pull point's horizontal coordinate.
// The lagging value is what gives the curtain its drag inertia.

pub const DEFAULT_SMOOTHING: f32 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct TrailingOffset {
    offset: f32,
    smoothing: f32,
}

impl Default for TrailingOffset {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_SMOOTHING)
    }
}

impl TrailingOffset {
    /// `smoothing` is the fraction of the remaining distance covered per tick.
    /// Values outside (0, 1] are clamped into that range.
    pub fn new(initial: f32, smoothing: f32) -> Self {
        let smoothing = if smoothing.is_finite() {
            smoothing.clamp(f32::EPSILON, 1.0)
        } else {
            DEFAULT_SMOOTHING
        };
        Self {
            offset: initial,
            smoothing,
        }
    }

    /// One tick: `offset += (target - offset) * smoothing`.
    /// The result always lies between the previous offset and `target`.
    /// A non-finite target leaves the offset where it is.
    pub fn advance(&mut self, target: f32) -> f32 {
        if target.is_finite() {
            self.offset += (target - self.offset) * self.smoothing;
        }
        self.offset
    }

    pub fn value(&self) -> f32 {
        self.offset
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Number of ticks needed to close all but `tolerance` (a fraction, e.g. 0.01)
    /// of any initial gap. Depends only on the smoothing factor.
    pub fn ticks_to_converge(&self, tolerance: f32) -> u32 {
        if self.smoothing >= 1.0 || tolerance >= 1.0 {
            return 1;
        }
        if tolerance <= 0.0 {
            return u32::MAX;
        }
        let remaining = 1.0 - self.smoothing;
        (tolerance.ln() / remaining.ln()).ceil() as u32
    }
}
