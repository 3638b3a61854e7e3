use std::ops::RangeInclusive;

use bevy::prelude::*;
use noisy_float::prelude::*;

use crate::{config::StageConfig, note::Note};

/// Inclusive range of notes worth looking at this frame, `None` when nothing is.
pub type VisibleWindow = Option<RangeInclusive<usize>>;

/// Passed notes stay candidates for `past_window` seconds so their
/// connector lines keep being drawn after the glyph is gone.
pub fn select_visible_window(notes: &[Note], now: R64, config: &StageConfig) -> VisibleWindow {
    scan(notes, 0, now, config)
}

fn scan(notes: &[Note], from: usize, now: R64, config: &StageConfig) -> VisibleWindow {
    let (past, future) = (now - config.past_seconds(), now + config.future_seconds());
    let mut start = None;
    let mut end = None;

    for (index, note) in notes.iter().enumerate().skip(from) {
        if start.is_none() && past < note.hit_timing {
            start = Some(index);
        }
        if future < note.hit_timing {
            break;
        }
        end = Some(index);
    }

    start.zip(end).filter(|(start, end)| start <= end).map(|(start, end)| start..=end)
}

/// Caches the head of the window between frames.
///
/// `seek` is meant for small forward steps of playback time and walks from
/// the cached head, `jump` binary searches it. Both answer exactly what
/// [`select_visible_window`] would. Call `reset` when the chart is swapped.
#[derive(Debug, Default, Clone, Resource)]
pub struct WindowSeeker {
    head: usize,
    last: Option<R64>,
}

impl WindowSeeker {
    pub fn seek(&mut self, notes: &[Note], now: R64, config: &StageConfig) -> VisibleWindow {
        match self.last {
            Some(last) if now < last => return self.jump(notes, now, config),
            _ if notes.len() < self.head => return self.jump(notes, now, config),
            _ => {}
        }

        let past = now - config.past_seconds();
        self.head += notes[self.head..]
            .iter()
            .take_while(|note| note.hit_timing <= past)
            .count();
        self.last = Some(now);

        scan(notes, self.head, now, config)
    }

    pub fn jump(&mut self, notes: &[Note], now: R64, config: &StageConfig) -> VisibleWindow {
        let past = now - config.past_seconds();
        self.head = notes.partition_point(|note| note.hit_timing <= past);
        self.last = Some(now);

        scan(notes, self.head, now, config)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Lane;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn notes(times: &[f64]) -> Vec<Note> {
        times.iter().map(|time| Note::tap(*time, Lane::Three)).collect()
    }

    #[test_case(&[], 0.; "empty sequence")]
    #[test_case(&[5., 6., 7.], 0.; "everything in the future")]
    #[test_case(&[0., 1., 2.], 10.; "everything passed")]
    #[test_case(&[0., 0.5, 3.], 1.; "gap across the window")]
    fn nothing_visible(times: &[f64], now: f64) {
        assert_eq!(select_visible_window(&notes(times), r64(now), &StageConfig::default()), None);
    }

    #[test_case(&[0., 0.5, 1., 1.5, 2.5], 1., 2..=3; "middle of the chart")]
    #[test_case(&[0., 0.5, 1., 1.5, 2.], 1., 2..=4; "future edge is inclusive")]
    #[test_case(&[1., 1., 1.], 0., 0..=2; "simultaneous notes")]
    fn visible(times: &[f64], now: f64, expected: RangeInclusive<usize>) {
        assert_eq!(
            select_visible_window(&notes(times), r64(now), &StageConfig::default()),
            Some(expected)
        );
    }

    #[test]
    fn past_edge_is_exclusive() {
        let config = StageConfig::default().with_past_window(0.25);
        assert_eq!(
            select_visible_window(&notes(&[0.75, 0.76, 1.]), r64(1.), &config),
            Some(1..=2)
        );
    }

    #[test]
    fn seeker_agrees_with_scan() {
        let config = StageConfig::default();
        let notes = notes(&(0..40).map(|i| i as f64 * 0.25).collect::<Vec<_>>());
        let mut seeker = WindowSeeker::default();

        let forwards = (0..120).map(|i| i as f64 * 0.1);
        let backwards = [3.3, 3.3, 0., 7.5, 2.];

        forwards.chain(backwards).map(r64).for_each(|now| {
            assert_eq!(
                seeker.seek(&notes, now, &config),
                select_visible_window(&notes, now, &config),
                "{now}"
            );
        });
    }

    #[test]
    fn jump_agrees_with_scan() {
        let config = StageConfig::default();
        let notes = notes(&[0., 0.1, 0.1, 0.4, 2., 2.05, 9.]);
        let mut seeker = WindowSeeker::default();

        [8.5, 0.3, 1.9, 0., 20.].map(r64).into_iter().for_each(|now| {
            assert_eq!(
                seeker.jump(&notes, now, &config),
                select_visible_window(&notes, now, &config),
                "{now}"
            );
        });
    }

    #[test]
    fn seeker_survives_a_shorter_chart() {
        let config = StageConfig::default();
        let mut seeker = WindowSeeker::default();
        seeker.seek(&notes(&[0., 1., 2., 3., 4.]), r64(4.), &config);

        let short = notes(&[5.]);
        assert_eq!(seeker.seek(&short, r64(4.5), &config), Some(0..=0));
        seeker.reset();
        assert_eq!(seeker.seek(&short, r64(4.6), &config), Some(0..=0));
    }
}
