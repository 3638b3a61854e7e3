use noisy_float::prelude::*;

/// Height of the arc notes travel along, relative to linear travel.
pub const Y_HUMP: f32 = 2.05128205;

/// Which out of window progress values get pinned to the window edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clamp {
    /// Notes further away than the future window report progress 1.
    pub coming: bool,
    /// Notes that have passed report progress 0.
    pub passed: bool,
}

impl Clamp {
    pub const NONE: Clamp = Clamp {
        coming: false,
        passed: false,
    };
    pub const BOTH: Clamp = Clamp {
        coming: true,
        passed: true,
    };
}

pub fn ease(progress: f32) -> f32 {
    progress / (2. - progress)
}

pub fn x_ease(t: f32) -> f32 {
    t
}

pub fn y_ease(t: f32) -> f32 {
    t + Y_HUMP * t * (1. - t)
}

/// Remaining time as a fraction of the future window. 1 at the ceiling, 0 at the baseline.
pub fn progress(hit_timing: R64, now: R64, future_window: R32, clamp: Clamp) -> f32 {
    let remaining = (hit_timing - now).raw();

    match remaining as f32 / future_window.raw() {
        _ if clamp.coming && (future_window.raw() as f64) < remaining => 1.,
        _ if clamp.passed && remaining < 0. => 0.,
        progress => progress,
    }
}

/// Eased progress, the `t` every positional curve is driven by.
pub fn transformed_time(hit_timing: R64, now: R64, future_window: R32, clamp: Clamp) -> f32 {
    ease(progress(hit_timing, now, future_window, clamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn ease_inflections() {
        assert_eq!(ease(0.), 0.);
        assert_eq!(ease(1.), 1.);
        assert_eq!(ease(0.5), 0.5 / 1.5);
    }

    #[test]
    fn ease_growth() {
        (1..=100).map(|i| i as f32 / 100.).for_each(|p1| {
            let p0 = p1 - 0.01;
            assert!(ease(p0) < ease(p1), "{p0} -> {p1}");
        })
    }

    #[test]
    fn y_overshoots() {
        assert_eq!(y_ease(0.), 0.);
        assert_eq!(y_ease(1.), 1.);
        (1..100).map(|i| i as f32 / 100.).for_each(|t| {
            assert!(t < y_ease(t), "{t}");
            assert_eq!(x_ease(t), t);
        })
    }

    #[test]
    fn y_hump_value() {
        assert_eq!(y_ease(0.5), 0.5 + 2.05128205 * 0.25);
    }

    #[test_case(1.5, Clamp::NONE, 0.5; "half way")]
    #[test_case(3.0, Clamp::NONE, 2.0; "beyond window unclamped")]
    #[test_case(3.0, Clamp { coming: true, passed: false }, 1.0; "beyond window clamped")]
    #[test_case(0.5, Clamp::NONE, -0.5; "passed unclamped")]
    #[test_case(0.5, Clamp { coming: false, passed: true }, 0.0; "passed clamped")]
    #[test_case(1.0, Clamp::BOTH, 0.0; "at baseline")]
    #[test_case(2.0, Clamp::BOTH, 1.0; "at ceiling")]
    fn window_progress(hit_timing: f64, clamp: Clamp, expected: f32) {
        assert_eq!(progress(r64(hit_timing), r64(1.), r32(1.), clamp), expected);
    }

    #[test]
    fn wider_window() {
        assert_eq!(progress(r64(2.), r64(1.), r32(2.), Clamp::NONE), 0.5);
        assert_eq!(transformed_time(r64(3.), r64(1.), r32(2.), Clamp::NONE), 1.);
    }
}
