use bevy::prelude::*;
use noisy_float::prelude::*;

use crate::note::Lane;

pub const LANE_COUNT: usize = 5;

/// Horizontal lane positions, normalized by viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneTable(pub [f32; LANE_COUNT]);

impl LaneTable {
    pub fn at(&self, lane: Lane) -> f32 {
        self.0[lane.index()]
    }

    pub fn first(&self) -> f32 {
        self.0[0]
    }

    pub fn last(&self) -> f32 {
        self.0[LANE_COUNT - 1]
    }
}

/// Everything about the stage layout that is fixed for a render pass.
///
/// Heights are normalized by viewport height. `future_window` is the time it
/// takes a note to travel from the ceiling to the baseline, `past_window` is
/// how long a passed note stays a draw candidate.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct StageConfig {
    pub future_window: R32,
    pub past_window: R32,
    pub avatar_radius: f32,
    pub start_positions: LaneTable,
    pub end_positions: LaneTable,
    pub baseline: f32,
    pub ceiling: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            future_window: r32(1.),
            past_window: r32(0.2),
            avatar_radius: 25.,
            start_positions: LaneTable([0.272363281, 0.381347656, 0.5, 0.618652344, 0.727636719]),
            end_positions: LaneTable([0.192382812, 0.346191406, 0.5, 0.653808594, 0.807617188]),
            baseline: 0.828125,
            ceiling: 0.21875,
        }
    }
}

impl StageConfig {
    pub fn with_future_window(self, seconds: f32) -> Self {
        assert!(0. < seconds, "future window must be positive, got {seconds}");
        Self {
            future_window: r32(seconds),
            ..self
        }
    }

    pub fn with_past_window(self, seconds: f32) -> Self {
        assert!(0. <= seconds, "past window must not be negative, got {seconds}");
        Self {
            past_window: r32(seconds),
            ..self
        }
    }

    pub fn with_avatar_radius(self, avatar_radius: f32) -> Self {
        Self {
            avatar_radius,
            ..self
        }
    }

    pub fn avatar_diameter(&self) -> f32 {
        self.avatar_radius * 2.
    }

    /// Bounds of the window as seconds, for comparisons against `R64` times.
    pub(crate) fn future_seconds(&self) -> R64 {
        r64(self.future_window.raw() as f64)
    }

    pub(crate) fn past_seconds(&self) -> R64 {
        r64(self.past_window.raw() as f64)
    }
}
