use noisy_float::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageStatus {
    /// Further away than the future window, not on screen yet.
    Upcoming,
    OnStage,
    Passed,
}

impl StageStatus {
    /// Two endpoints off stage on the same side mean the line between them is too.
    pub fn shares_off_stage_side(self, other: Self) -> bool {
        self == other && self != StageStatus::OnStage
    }
}

pub fn classify(hit_timing: R64, now: R64, future_window: R32) -> StageStatus {
    match hit_timing {
        hit if hit < now => StageStatus::Passed,
        hit if now + (future_window.raw() as f64) < hit => StageStatus::Upcoming,
        _ => StageStatus::OnStage,
    }
}

pub fn is_on_stage(hit_timing: R64, now: R64, future_window: R32) -> bool {
    now <= hit_timing && hit_timing <= now + (future_window.raw() as f64)
}

pub fn is_passed(hit_timing: R64, now: R64) -> bool {
    hit_timing < now
}

pub fn is_coming(hit_timing: R64, now: R64, future_window: R32) -> bool {
    now + (future_window.raw() as f64) < hit_timing
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use StageStatus::*;

    #[test_case(0.99, Passed; "just passed")]
    #[test_case(1.0, OnStage; "now")]
    #[test_case(1.5, OnStage; "inside")]
    #[test_case(2.0, OnStage; "future edge")]
    #[test_case(2.0 + 1e-9, Upcoming; "beyond future edge")]
    fn partition(hit_timing: f64, expected: StageStatus) {
        let (hit, now, window) = (r64(hit_timing), r64(1.), r32(1.));

        assert_eq!(classify(hit, now, window), expected);
        assert_eq!(is_on_stage(hit, now, window), expected == OnStage);
        assert_eq!(is_passed(hit, now), expected == Passed);
        assert_eq!(is_coming(hit, now, window), expected == Upcoming);
    }

    #[test]
    fn exactly_one_state() {
        let window = r32(1.);
        (-30..=30).map(|i| r64(i as f64 / 10.)).for_each(|hit| {
            let now = r64(0.);
            let states = [
                is_passed(hit, now),
                is_on_stage(hit, now, window),
                is_coming(hit, now, window),
            ];
            assert_eq!(states.iter().filter(|state| **state).count(), 1, "{hit}");
        })
    }

    #[test]
    fn off_stage_sides() {
        let all = [Upcoming, OnStage, Passed];
        let skipped = all
            .iter()
            .flat_map(|a| all.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| a.shares_off_stage_side(*b))
            .collect::<Vec<_>>();

        assert_eq!(skipped, vec![(Upcoming, Upcoming), (Passed, Passed)]);
    }
}
