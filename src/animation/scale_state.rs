//! Per-node scale progression.
//!
//! A transition moves `scale` from `prev_scale` one unit toward
//! `prev_scale + dir`. The step is slow (a third of [`SC_GAP`]) until the
//! scale passes [`SC_DIV`], then switches to the full [`SC_GAP`].

use crate::constants::{SC_DIV, SC_GAP, TRIS};

/// Coarse state of a [`ScaleState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No transition running (`dir == 0`)
    Idle,
    /// A transition toward `prev_scale + dir` is in progress
    Advancing,
}

/// `0` below [`SC_DIV`], `1` from there up to twice the threshold.
pub fn scale_factor(scale: f32) -> f32 {
    (scale / SC_DIV).floor()
}

/// Blend between `1/a` and `1/b` driven by [`scale_factor`].
pub fn mirror_value(scale: f32, a: usize, b: usize) -> f32 {
    let k = scale_factor(scale);
    (1.0 - k) * (1.0 / a as f32) + k * (1.0 / b as f32)
}

/// Scale increment applied by one tick while moving in direction `dir`.
pub fn update_scale(scale: f32, dir: f32) -> f32 {
    mirror_value(scale, TRIS, 1) * SC_GAP * dir
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleState {
    pub scale: f32,
    pub prev_scale: f32,
    pub dir: f32,
}

impl ScaleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.dir == 0.0 {
            Phase::Idle
        } else {
            Phase::Advancing
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == Phase::Idle
    }

    /// Begin a transition away from `prev_scale`.
    ///
    /// Returns `true` when a transition was started; while one is already
    /// running this is a no-op and returns `false`.
    pub fn start_updating(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.dir = 1.0 - 2.0 * self.prev_scale;
        true
    }

    /// Advance one tick. Returns the new resting scale once the transition
    /// has covered a full unit.
    pub fn advance(&mut self) -> Option<f32> {
        if self.is_idle() {
            return None;
        }
        self.scale += update_scale(self.scale, self.dir);
        if (self.scale - self.prev_scale).abs() > 1.0 {
            self.scale = self.prev_scale + self.dir;
            self.dir = 0.0;
            self.prev_scale = self.scale;
            return Some(self.prev_scale);
        }
        None
    }
}
