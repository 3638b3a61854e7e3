use bevy::prelude::*;
use derive_more::{Deref, From};
use itertools::Itertools;
use noisy_float::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("lane {0} is outside of 1..=5")]
    LaneOutOfRange(u8),
    #[error("note {0} is earlier than the note before it")]
    Unsorted(usize),
    #[error("note {from} links to {to} but the chart only has {len} notes")]
    DanglingLink { from: usize, to: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Lane {
    pub const ALL: [Lane; 5] = [Lane::One, Lane::Two, Lane::Three, Lane::Four, Lane::Five];

    /// Zero based position into lane tables.
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for Lane {
    type Error = ChartError;

    fn try_from(lane: u8) -> Result<Self, Self::Error> {
        Lane::ALL
            .get((lane as usize).wrapping_sub(1))
            .copied()
            .ok_or(ChartError::LaneOutOfRange(lane))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    TapOrFlick,
    Hold,
    Slide,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlickDirection {
    #[default]
    None,
    Left,
    Right,
}

/// Position of a note inside its owning [`Chart`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, From)]
pub struct NoteIndex(pub usize);

/// Relationship neighbours. Never owning, always resolved by the chart loader.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoteLinks {
    pub next_flick: Option<NoteIndex>,
    pub next_hold: Option<NoteIndex>,
    pub prev_hold: Option<NoteIndex>,
    pub next_slide: Option<NoteIndex>,
    pub prev_slide: Option<NoteIndex>,
    pub sync_pair: Option<NoteIndex>,
}

impl NoteLinks {
    pub(crate) fn iter(&self) -> impl Iterator<Item = NoteIndex> {
        [
            self.next_flick,
            self.next_hold,
            self.prev_hold,
            self.next_slide,
            self.prev_slide,
            self.sync_pair,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub hit_timing: R64,
    pub kind: NoteKind,
    pub start_lane: Lane,
    pub finish_lane: Lane,
    pub flick: FlickDirection,
    pub is_sync: bool,
    pub is_hold_release: bool,
    pub is_slide_end: bool,
    pub is_slide_middle: bool,
    pub links: NoteLinks,
}

impl Note {
    /// Panics if `hit_timing` is not finite.
    pub fn new(kind: NoteKind, hit_timing: f64, lane: Lane) -> Self {
        Self {
            hit_timing: r64(hit_timing),
            kind,
            start_lane: lane,
            finish_lane: lane,
            flick: FlickDirection::None,
            is_sync: false,
            is_hold_release: false,
            is_slide_end: false,
            is_slide_middle: false,
            links: NoteLinks::default(),
        }
    }

    pub fn tap(hit_timing: f64, lane: Lane) -> Self {
        Self::new(NoteKind::TapOrFlick, hit_timing, lane)
    }

    pub fn hold(hit_timing: f64, lane: Lane) -> Self {
        Self::new(NoteKind::Hold, hit_timing, lane)
    }

    pub fn slide(hit_timing: f64, lane: Lane) -> Self {
        Self::new(NoteKind::Slide, hit_timing, lane)
    }

    pub fn starting_from(self, start_lane: Lane) -> Self {
        Self { start_lane, ..self }
    }

    pub fn flicked(self, flick: FlickDirection) -> Self {
        Self { flick, ..self }
    }

    pub fn with_links(self, links: NoteLinks) -> Self {
        Self { links, ..self }
    }

    pub fn is_flick(&self) -> bool {
        self.flick != FlickDirection::None
    }
}

/// Owning, time sorted note sequence. Links inside the notes index into it.
#[derive(Debug, Default, Clone, Deref, Resource)]
pub struct Chart(Vec<Note>);

impl Chart {
    pub fn new(notes: Vec<Note>) -> Result<Self, ChartError> {
        if let Some((index, _)) = notes
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (prev, curr))| curr.hit_timing < prev.hit_timing)
        {
            return Err(ChartError::Unsorted(index + 1));
        }

        let len = notes.len();
        for (from, note) in notes.iter().enumerate() {
            if let Some(to) = note.links.iter().find(|to| len <= **to) {
                return Err(ChartError::DanglingLink { from, to: *to, len });
            }
        }

        let chart = Self(notes);
        chart.report_anomalies();
        Ok(chart)
    }

    pub fn get(&self, index: NoteIndex) -> &Note {
        &self.0[*index]
    }

    pub fn notes(&self) -> &[Note] {
        &self.0
    }

    /// Malformed charts still render, with whatever fallback each case has.
    fn report_anomalies(&self) {
        let back_link = |to: Option<NoteIndex>, back: fn(&NoteLinks) -> Option<NoteIndex>, from: usize| {
            to.filter(|to| back(&self.get(*to).links) != Some(NoteIndex(from)))
        };

        self.0.iter().enumerate().for_each(|(from, note)| {
            if let Some(to) = back_link(note.links.next_hold, |links| links.prev_hold, from) {
                warn!("hold note {from} points at {} which does not point back", *to);
            }
            if let Some(to) = back_link(note.links.next_slide, |links| links.prev_slide, from) {
                warn!("slide note {from} points at {} which does not point back", *to);
            }
            if let Some(to) = back_link(note.links.sync_pair, |links| links.sync_pair, from) {
                warn!("sync note {from} pairs with {} which pairs elsewhere", *to);
            }
            if note.is_sync && note.links.sync_pair.is_none() {
                warn!("sync note {from} has no pair");
            }
            if note.is_slide_middle && note.links.next_slide.is_none() {
                warn!("slide note {from} is flagged as a chain middle but ends the chain");
            }
        })
    }
}
