use bevy::prelude::*;
use lyon::geom::CubicBezierSegment;

/// Control points of the cubic through `start` and `end` whose quadratic
/// form peaks at `apex` half way along. One axis at a time.
pub fn synthesize_cubic_controls(start: f32, apex: f32, end: f32) -> (f32, f32) {
    let control = apex * 2. - (start + end) * 0.5;
    ((start + control * 2.) / 3., (end + control * 2.) / 3.)
}

pub fn synthesize_cubic(start: Vec2, apex: Vec2, end: Vec2) -> CubicBezierSegment<f32> {
    let (x1, x2) = synthesize_cubic_controls(start.x, apex.x, end.x);
    let (y1, y2) = synthesize_cubic_controls(start.y, apex.y, end.y);

    CubicBezierSegment {
        from: start.to_array().into(),
        ctrl1: [x1, y1].into(),
        ctrl2: [x2, y2].into(),
        to: end.to_array().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::geom::{point, QuadraticBezierSegment};
    use pretty_assertions::assert_eq;

    fn assert_near(a: lyon::geom::Point<f32>, b: lyon::geom::Point<f32>) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn straight_line_stays_straight() {
        let (start, apex, end) = (Vec2::new(0., 0.), Vec2::new(2., 1.), Vec2::new(4., 2.));
        let cubic = synthesize_cubic(start, apex, end);

        [cubic.ctrl1, cubic.ctrl2].into_iter().for_each(|ctrl| {
            let offset = Vec2::new(ctrl.x, ctrl.y) - start;
            assert!(offset.perp_dot(end - start).abs() < 1e-4, "{ctrl:?}");
        });
    }

    #[test]
    fn endpoints_are_kept() {
        let cubic = synthesize_cubic(Vec2::new(1., 7.), Vec2::new(3., -2.), Vec2::new(9., 4.));
        assert_eq!(cubic.from, point(1., 7.));
        assert_eq!(cubic.to, point(9., 4.));
    }

    #[test]
    fn passes_through_apex() {
        let apex = Vec2::new(3., -2.);
        let cubic = synthesize_cubic(Vec2::new(1., 7.), apex, Vec2::new(9., 4.));
        assert_near(cubic.sample(0.5), apex.to_array().into());
    }

    #[test]
    fn matches_degree_elevation() {
        let (start, apex, end) = (Vec2::new(10., 80.), Vec2::new(42., 15.), Vec2::new(70., 60.));
        let ctrl = apex * 2. - (start + end) * 0.5;

        let elevated = QuadraticBezierSegment {
            from: start.to_array().into(),
            ctrl: ctrl.to_array().into(),
            to: end.to_array().into(),
        }
        .to_cubic();
        let synthesized = synthesize_cubic(start, apex, end);

        assert_near(synthesized.ctrl1, elevated.ctrl1);
        assert_near(synthesized.ctrl2, elevated.ctrl2);
    }

    #[test]
    fn per_axis_formula() {
        assert_eq!(synthesize_cubic_controls(0., 3., 6.), (2., 4.));
        assert_eq!(synthesize_cubic_controls(5., 5., 5.), (5., 5.));
    }
}
