/// Restricts `value` to `[min, max]`. If the bounds cross, `min` wins.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    let value = if value > max { max } else { value };

    if value < min {
        min
    } else {
        value
    }
}

/// Rounds to the nearest integer, halves going towards positive infinity.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// The multiple of `increment` nearest to `value`.
///
/// A zero `increment` gives NaN, which callers pass along as is.
pub fn snap(value: f32, increment: f32) -> f32 {
    round_half_up(value / increment) * increment
}

#[cfg(test)]
mod tests {
    use super::{clamp, round_half_up, snap};
    use proptest::prelude::*;

    #[test]
    fn clamp_picks_bound_or_value() {
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(4.0, 0.0, 10.0), 4.0);
        assert_eq!(clamp(4.0, 4.0, 4.0), 4.0);
    }

    #[test]
    fn crossed_bounds_prefer_min() {
        assert_eq!(clamp(20.0, 10.0, 5.0), 10.0);
        assert_eq!(clamp(7.0, 10.0, 5.0), 10.0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }

    #[test]
    fn snap_to_grid() {
        assert_eq!(snap(23.0, 10.0), 20.0);
        assert_eq!(snap(25.0, 10.0), 30.0);
        assert_eq!(snap(0.0, 7.5), 0.0);
    }

    #[test]
    fn zero_increment_is_nan() {
        assert!(snap(12.0, 0.0).is_nan());
    }

    proptest! {
        #[test]
        fn clamp_stays_in_bounds(x in -1e6f32..1e6, a in -1e6f32..1e6, b in -1e6f32..1e6) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let clamped = clamp(x, lo, hi);

            prop_assert!(lo <= clamped && clamped <= hi);
            if x < lo {
                prop_assert_eq!(clamped, lo);
            } else if x > hi {
                prop_assert_eq!(clamped, hi);
            } else {
                prop_assert_eq!(clamped, x);
            }
        }

        #[test]
        fn snap_is_nearest_multiple(p in -1e4f64..1e4, d in 0.01f64..100.0) {
            let (p, d) = (p as f32, d as f32);
            let snapped = snap(p, d);
            let steps = snapped / d;

            prop_assert!((steps - steps.round()).abs() <= 1e-3 * steps.abs().max(1.0));
            prop_assert!((snapped - p).abs() <= d / 2.0 + 1e-3 * p.abs().max(d));
        }
    }
}
