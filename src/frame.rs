use bevy::prelude::{Resource, Vec2};
use tinyvec::ArrayVec;

use crate::{
    config::StageConfig,
    connector::{baseline_anchor, build_connector, ConnectorKind, LineGeometry},
    note::{Chart, FlickDirection, NoteIndex, NoteKind},
    position::{resolve_position, NotePosition, RenderContext},
    status::{classify, is_passed, StageStatus},
    timing::Clamp,
    window::{select_visible_window, VisibleWindow},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub from: NoteIndex,
    pub to: NoteIndex,
    pub geometry: LineGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphShape {
    Tap,
    Flick(FlickDirection),
    Hold,
    Slide { translucent: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub note: NoteIndex,
    pub shape: GlyphShape,
    pub center: Vec2,
    pub radius: f32,
}

/// Everything the host draws for one frame. Connectors come before the
/// glyph of the note that produced them, notes in chart order.
#[derive(Debug, Default, Clone, PartialEq, Resource)]
pub struct FrameGeometry {
    pub window: VisibleWindow,
    pub connectors: Vec<Connector>,
    pub glyphs: Vec<Glyph>,
}

type Links = ArrayVec<[(ConnectorKind, NoteIndex, NoteIndex); 4]>;

/// A chart seen at one instant through one configuration.
#[derive(Clone, Copy)]
pub struct Stage<'a> {
    pub chart: &'a Chart,
    pub context: &'a RenderContext,
    pub config: &'a StageConfig,
}

impl<'a> Stage<'a> {
    pub fn new(chart: &'a Chart, context: &'a RenderContext, config: &'a StageConfig) -> Self {
        Self {
            chart,
            context,
            config,
        }
    }

    pub fn visible_window(&self) -> VisibleWindow {
        select_visible_window(self.chart, self.context.now, self.config)
    }

    pub fn status(&self, index: NoteIndex) -> StageStatus {
        classify(self.chart.get(index).hit_timing, self.context.now, self.config.future_window)
    }

    pub fn position(&self, index: NoteIndex, clamp: Clamp) -> NotePosition {
        resolve_position(self.chart.get(index), self.context, self.config, clamp)
    }

    pub fn connector(&self, kind: ConnectorKind, from: NoteIndex, to: NoteIndex) -> Option<LineGeometry> {
        build_connector(kind, self.chart, from, to, self.context, self.config)
    }

    /// Relationships `index` is responsible for drawing. Back links are only
    /// followed when the earlier note can no longer draw the line itself.
    fn links(&self, index: NoteIndex) -> Links {
        let note = self.chart.get(index);
        let mut links = Links::new();
        let behind = |prev: &NoteIndex| self.status(*prev) != StageStatus::OnStage;

        if let Some(pair) = note.links.sync_pair.filter(|_| note.is_sync) {
            links.push((ConnectorKind::Sync, index, pair));
        }

        match note.kind {
            NoteKind::TapOrFlick => {
                if let Some(next) = note.links.next_flick.filter(|_| note.is_flick()) {
                    links.push((ConnectorKind::Flick, index, next));
                }
            }
            NoteKind::Hold => {
                links.extend(note.links.next_hold.map(|next| (ConnectorKind::Hold, index, next)));
                links.extend(note.links.prev_hold.filter(behind).map(|prev| (ConnectorKind::Hold, prev, index)));
            }
            NoteKind::Slide => {
                links.extend(note.links.next_slide.map(|next| (ConnectorKind::Slide, index, next)));
                links.extend(note.links.prev_slide.filter(behind).map(|prev| (ConnectorKind::Slide, prev, index)));
            }
        }

        links
    }

    pub fn glyph(&self, index: NoteIndex) -> Option<Glyph> {
        let note = self.chart.get(index);
        let status = self.status(index);
        let at = |shape, NotePosition { center, radius }| Glyph {
            note: index,
            shape,
            center,
            radius,
        };
        let live = |shape| at(shape, self.position(index, Clamp::NONE));
        let on_stage = |shape| (status == StageStatus::OnStage).then(|| live(shape));

        match note.kind {
            NoteKind::TapOrFlick if note.is_flick() => on_stage(GlyphShape::Flick(note.flick)),
            NoteKind::TapOrFlick if note.is_hold_release => on_stage(GlyphShape::Hold),
            NoteKind::TapOrFlick => on_stage(GlyphShape::Tap),
            NoteKind::Hold => on_stage(GlyphShape::Hold),
            NoteKind::Slide if note.is_flick() => on_stage(GlyphShape::Flick(note.flick)),
            NoteKind::Slide if note.is_slide_end || status == StageStatus::OnStage => {
                Some(live(GlyphShape::Slide {
                    translucent: note.is_slide_middle,
                }))
            }
            NoteKind::Slide if status == StageStatus::Passed => note
                .links
                .next_slide
                .map(|next| self.chart.get(next))
                .filter(|next| !is_passed(next.hit_timing, self.context.now))
                .map(|next| {
                    let anchor = baseline_anchor(note, next, self.context, self.config);
                    at(
                        GlyphShape::Slide { translucent: false },
                        NotePosition {
                            center: anchor.position,
                            radius: self.config.avatar_radius,
                        },
                    )
                }),
            NoteKind::Slide => None,
        }
    }

    pub fn compose(&self, window: VisibleWindow) -> FrameGeometry {
        let mut frame = FrameGeometry {
            window: window.clone(),
            ..Default::default()
        };

        window.into_iter().flatten().map(NoteIndex).for_each(|index| {
            frame.connectors.extend(self.links(index).into_iter().filter_map(|(kind, from, to)| {
                self.connector(kind, from, to).map(|geometry| Connector {
                    kind,
                    from,
                    to,
                    geometry,
                })
            }));
            frame.glyphs.extend(self.glyph(index));
        });

        frame
    }
}

pub fn compose_frame(
    chart: &Chart,
    context: &RenderContext,
    config: &StageConfig,
    window: VisibleWindow,
) -> FrameGeometry {
    Stage::new(chart, context, config).compose(window)
}
