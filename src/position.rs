use bevy::prelude::*;
use noisy_float::prelude::*;

use crate::{
    config::StageConfig,
    note::{Lane, Note},
    status::{classify, StageStatus},
    timing::{transformed_time, x_ease, y_ease, Clamp},
};

/// Eased time below which notes shrink along the first slope.
pub const RADIUS_BREAKPOINT: f32 = 0.75;
const NEAR_SHRINK: f32 = 0.933333333;
const FAR_SHRINK: f32 = 1.2;

/// Per frame input owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct RenderContext {
    pub now: R64,
    pub viewport: Vec2,
    /// Show lane changes: notes originate from their start lane instead of their finish lane.
    pub preview: bool,
}

impl RenderContext {
    /// Panics on non finite time or a non finite, negative viewport.
    pub fn new(now: f64, viewport: Vec2, preview: bool) -> Self {
        assert!(
            viewport.is_finite() && viewport.cmpge(Vec2::ZERO).all(),
            "invalid viewport {viewport}"
        );
        Self {
            now: r64(now),
            viewport,
            preview,
        }
    }

    pub fn at(self, now: f64) -> Self {
        Self { now: r64(now), ..self }
    }

    pub fn display_start_lane(&self, note: &Note) -> Lane {
        if self.preview {
            note.start_lane
        } else {
            note.finish_lane
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(0., Vec2::new(1280., 720.), false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotePosition {
    pub center: Vec2,
    pub radius: f32,
}

pub fn start_x(ctx: &RenderContext, config: &StageConfig, lane: Lane) -> f32 {
    ctx.viewport.x * config.start_positions.at(lane)
}

pub fn end_x(ctx: &RenderContext, config: &StageConfig, lane: Lane) -> f32 {
    ctx.viewport.x * config.end_positions.at(lane)
}

pub fn baseline_y(ctx: &RenderContext, config: &StageConfig) -> f32 {
    ctx.viewport.y * config.baseline
}

/// Where upcoming notes are born.
pub fn ceiling_y(ctx: &RenderContext, config: &StageConfig) -> f32 {
    ctx.viewport.y * config.ceiling
}

pub fn x_at(ctx: &RenderContext, config: &StageConfig, finish: Lane, start: Lane, t: f32) -> f32 {
    let end = end_x(ctx, config, finish);
    let start = start_x(ctx, config, if ctx.preview { start } else { finish });
    end - (end - start) * x_ease(t)
}

pub fn y_at(ctx: &RenderContext, config: &StageConfig, t: f32) -> f32 {
    let (ceiling, baseline) = (ceiling_y(ctx, config), baseline_y(ctx, config));
    baseline - (baseline - ceiling) * y_ease(t)
}

pub fn radius_at(t: f32, full: f32) -> f32 {
    match t {
        t if t < 0. => full,
        t if t < RADIUS_BREAKPOINT => full * (1. - t * NEAR_SHRINK),
        t if t < 1. => full * ((1. - t) * FAR_SHRINK),
        _ => 0.,
    }
}

pub fn note_time(note: &Note, ctx: &RenderContext, config: &StageConfig, clamp: Clamp) -> f32 {
    transformed_time(note.hit_timing, ctx.now, config.future_window, clamp)
}

/// Radius ignores clamping, passed notes keep the full avatar size.
pub fn note_radius(note: &Note, ctx: &RenderContext, config: &StageConfig) -> f32 {
    radius_at(note_time(note, ctx, config, Clamp::NONE), config.avatar_radius)
}

pub fn resolve_position(
    note: &Note,
    ctx: &RenderContext,
    config: &StageConfig,
    clamp: Clamp,
) -> NotePosition {
    let t = note_time(note, ctx, config, clamp);
    NotePosition {
        center: Vec2::new(
            x_at(ctx, config, note.finish_lane, note.start_lane, t),
            y_at(ctx, config, t),
        ),
        radius: note_radius(note, ctx, config),
    }
}

/// Endpoint of a straight connector. Off stage notes are pinned to the
/// line they are about to enter or have just left.
pub fn pair_endpoint(note: &Note, ctx: &RenderContext, config: &StageConfig) -> Vec2 {
    match classify(note.hit_timing, ctx.now, config.future_window) {
        StageStatus::Passed => Vec2::new(
            end_x(ctx, config, note.finish_lane),
            baseline_y(ctx, config),
        ),
        StageStatus::Upcoming => Vec2::new(
            start_x(ctx, config, ctx.display_start_lane(note)),
            ceiling_y(ctx, config),
        ),
        StageStatus::OnStage => resolve_position(note, ctx, config, Clamp::NONE).center,
    }
}

/// Centres of the judgment circles notes land on.
pub fn avatar_centers(ctx: &RenderContext, config: &StageConfig) -> [Vec2; 5] {
    Lane::ALL.map(|lane| Vec2::new(end_x(ctx, config, lane), baseline_y(ctx, config)))
}

/// The spawn line, spanning the outermost start lanes.
pub fn ceiling_span(ctx: &RenderContext, config: &StageConfig) -> (Vec2, Vec2) {
    let y = ceiling_y(ctx, config);
    (
        Vec2::new(ctx.viewport.x * config.start_positions.first(), y),
        Vec2::new(ctx.viewport.x * config.start_positions.last(), y),
    )
}
