use bevy::prelude::*;
use lyon::geom::CubicBezierSegment;
use tap::Pipe;

use crate::{
    config::StageConfig,
    curve::synthesize_cubic,
    note::{Chart, Note, NoteIndex},
    position::{baseline_y, end_x, note_time, pair_endpoint, resolve_position, x_at, y_at, RenderContext},
    status::{classify, is_on_stage, is_passed, StageStatus},
    timing::Clamp,
};

/// `Default` only fills unused `ArrayVec` slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    #[default]
    /// Notes hit at the same time.
    Sync,
    Hold,
    Flick,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineGeometry {
    Segment { from: Vec2, to: Vec2 },
    Curve(CubicBezierSegment<f32>),
}

/// A point gliding along the baseline from a passed slide note to the next one in its chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineAnchor {
    /// How far playback is between the two notes, 0 at the passed one.
    pub fraction: f32,
    pub position: Vec2,
}

pub fn baseline_anchor(
    passed: &Note,
    next: &Note,
    ctx: &RenderContext,
    config: &StageConfig,
) -> BaselineAnchor {
    let span = (next.hit_timing - passed.hit_timing).raw();
    let fraction = match (ctx.now - passed.hit_timing).raw() / span {
        _ if span <= 0. => 1.,
        fraction => fraction.clamp(0., 1.) as f32,
    };

    let (start, end) = (
        end_x(ctx, config, passed.finish_lane),
        end_x(ctx, config, next.finish_lane),
    );

    BaselineAnchor {
        fraction,
        position: Vec2::new(fraction * (end - start) + start, baseline_y(ctx, config)),
    }
}

pub fn build_connector(
    kind: ConnectorKind,
    chart: &Chart,
    from: NoteIndex,
    to: NoteIndex,
    ctx: &RenderContext,
    config: &StageConfig,
) -> Option<LineGeometry> {
    let (a, b) = (chart.get(from), chart.get(to));

    match kind {
        ConnectorKind::Sync => sync_line(a, b, ctx, config),
        ConnectorKind::Hold => hold_curve(a, b, ctx, config),
        ConnectorKind::Flick => straight_line(a, b, ctx, config),
        ConnectorKind::Slide => slide_curve(chart, a, b, ctx, config),
    }
}

fn sync_line(a: &Note, b: &Note, ctx: &RenderContext, config: &StageConfig) -> Option<LineGeometry> {
    let on_stage = |note: &Note| is_on_stage(note.hit_timing, ctx.now, config.future_window);
    if !on_stage(a) || !on_stage(b) {
        return None;
    }

    let left = resolve_position(a, ctx, config, Clamp::NONE).center.x;
    let right = resolve_position(b, ctx, config, Clamp::NONE);
    let (y, r) = (right.center.y, right.radius);
    let (left, right) = (left.min(right.center.x), left.max(right.center.x));

    Some(LineGeometry::Segment {
        from: Vec2::new(left + r, y),
        to: Vec2::new(right - r, y),
    })
}

fn both_off_stage_same_side(a: &Note, b: &Note, ctx: &RenderContext, config: &StageConfig) -> bool {
    let status = |note: &Note| classify(note.hit_timing, ctx.now, config.future_window);
    status(a).shares_off_stage_side(status(b))
}

fn straight_line(a: &Note, b: &Note, ctx: &RenderContext, config: &StageConfig) -> Option<LineGeometry> {
    if both_off_stage_same_side(a, b, ctx, config) {
        return None;
    }

    Some(LineGeometry::Segment {
        from: pair_endpoint(a, ctx, config),
        to: pair_endpoint(b, ctx, config),
    })
}

fn hold_curve(a: &Note, b: &Note, ctx: &RenderContext, config: &StageConfig) -> Option<LineGeometry> {
    if both_off_stage_same_side(a, b, ctx, config) {
        return None;
    }

    let t1 = note_time(a, ctx, config, Clamp::BOTH);
    let start = Vec2::new(x_at(ctx, config, a.finish_lane, a.start_lane, t1), y_at(ctx, config, t1));
    Some(curve_towards(start, t1, b, ctx, config))
}

/// Curve from an already placed start into `b`. The apex follows `b`'s lanes.
fn curve_towards(start: Vec2, t1: f32, b: &Note, ctx: &RenderContext, config: &StageConfig) -> LineGeometry {
    let t2 = note_time(b, ctx, config, Clamp::BOTH);
    let tmid = (t1 + t2) * 0.5;
    let point = |t: f32| Vec2::new(x_at(ctx, config, b.finish_lane, b.start_lane, t), y_at(ctx, config, t));

    synthesize_cubic(start, point(tmid), point(t2)).pipe(LineGeometry::Curve)
}

#[rustfmt::skip]
fn slide_curve(
    chart: &Chart,
    a: &Note,
    b: &Note,
    ctx: &RenderContext,
    config: &StageConfig,
)
    -> Option<LineGeometry>
{
    if b.is_flick() {
        return straight_line(a, b, ctx, config);
    }

    match classify(a.hit_timing, ctx.now, config.future_window) {
        _ if a.is_slide_end => hold_curve(a, b, ctx, config),
        StageStatus::OnStage => hold_curve(a, b, ctx, config),
        StageStatus::Passed => match a.links.next_slide.map(|next| chart.get(next)) {
            None => {
                debug!("passed slide note at {} has no next slide note", a.hit_timing);
                hold_curve(a, b, ctx, config)
            }
            Some(next) if is_passed(next.hit_timing, ctx.now) => None,
            Some(next) => baseline_anchor(a, next, ctx, config)
                .position
                .pipe(|start| curve_towards(start, note_time(a, ctx, config, Clamp::BOTH), b, ctx, config))
                .pipe(Some),
        },
        StageStatus::Upcoming => None,
    }
}
