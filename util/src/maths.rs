//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

/// Return `num` evenly spaced values over the closed interval `[start, stop]`.
///
/// Both endpoints are included, the last value is exactly `stop`. A `num` of
/// one returns only `start`, and zero returns an empty vector.
pub fn linspace<T>(start: T, stop: T, num: usize) -> Vec<T>
where
    T: Float
{
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            // Indices are counted in `T` directly, exact up to the mantissa width
            let last = (1..num).fold(T::zero(), |acc, _| acc + T::one());

            let mut values = Vec::with_capacity(num);
            let mut index = T::zero();

            for _ in 0..num {
                values.push(lin_map((T::zero(), last), (start, stop), index));
                index = index + T::one();
            }

            // Floating point error can leave the final value just short of the end
            values[num - 1] = stop;

            values
        }
    }
}

/// Shift `end` by whole turns so that sweeping from `start` to the result moves
/// in the requested direction.
///
/// A clockwise sweep is a decreasing angle, so the returned value is the
/// largest `end - k * 2pi` (k >= 0) which is not greater than `start`. A
/// counter-clockwise sweep returns the smallest `end + k * 2pi` not less than
/// `start`. If `end` already lies on the requested side of `start` (or equals
/// it) it is returned unchanged.
///
/// The sweep is computed from the remainder of the angular distance, so the
/// cost doesn't depend on the number of turns. When `start` is so large that
/// a sub-turn sweep is below its precision the result collapses onto `start`,
/// it is never on the wrong side.
pub fn unwrap_angle<T>(start: T, end: T, clockwise: bool) -> T
where
    T: Float + FloatConst
{
    if clockwise {
        if end <= start {
            end
        }
        else {
            let sweep = rem_euclid(start - end, T::TAU());
            (start - sweep).min(start)
        }
    }
    else {
        if end >= start {
            end
        }
        else {
            let sweep = rem_euclid(end - start, T::TAU());
            (start + sweep).max(start)
        }
    }
}

/// Euclidean remainder of `value / modulus`, in `[0, modulus]`.
///
/// The upper bound is only reached when rounding a tiny negative remainder.
fn rem_euclid<T>(value: T, modulus: T) -> T
where
    T: Float
{
    let rem = value % modulus;

    if rem < T::zero() {
        rem + modulus
    }
    else {
        rem
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{PI, TAU};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0.0, 10.0), (0.0, 1.0), 5.0), 0.5);
        assert_eq!(lin_map((0.0, 2.0), (1.0, -1.0), 2.0), -1.0);
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let vals = linspace(0.0, -PI, 4);
        let expected = [0.0, -PI / 3.0, -2.0 * PI / 3.0, -PI];
        assert_eq!(vals.len(), 4);
        for (v, e) in vals.iter().zip(expected.iter()) {
            assert!(approx_eq(*v, *e), "{} != {}", v, e);
        }
        assert_eq!(vals[3], -PI);

        assert_eq!(linspace(1.0, 1.0, 3), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unwrap_angle_clockwise() {
        assert!(approx_eq(unwrap_angle(0.0, PI, true), -PI));
        assert_eq!(unwrap_angle(1.0, 0.5, true), 0.5);
        assert_eq!(unwrap_angle(1.0, 1.0, true), 1.0);

        // Several windings are removed, never overshooting by a full turn
        let end = unwrap_angle(0.0, 3.0 * TAU + 0.5, true);
        assert!(approx_eq(end, 0.5 - TAU));
        assert!(end <= 0.0 && end > -TAU);
    }

    #[test]
    fn test_unwrap_angle_counter_clockwise() {
        assert!(approx_eq(unwrap_angle(0.0, PI, false), PI));
        assert!(approx_eq(unwrap_angle(0.0, -PI, false), PI));
        assert_eq!(unwrap_angle(0.0, 0.0, false), 0.0);

        let end = unwrap_angle(1.0, 1.0 - 2.0 * TAU - 0.25, false);
        assert!(approx_eq(end, 1.0 + TAU - 0.25));
        assert!(end >= 1.0 && end < 1.0 + TAU);
    }

    #[test]
    fn test_unwrap_angle_full_turn_is_stationary() {
        assert_eq!(unwrap_angle(0.0, TAU, true), 0.0);
        assert_eq!(unwrap_angle(0.0, -TAU, false), 0.0);
        assert_eq!(unwrap_angle(0.0_f32, std::f32::consts::TAU, true), 0.0);
    }

    #[test]
    fn test_unwrap_angle_huge_magnitudes() {
        // Adding a full turn no longer changes these values
        let end = unwrap_angle(1e18, 0.1, false);
        assert!(end >= 1e18);

        let end = unwrap_angle(1e300, -1e300, false);
        assert!(end >= 1e300);

        let end = unwrap_angle(-1e18, 0.1, true);
        assert!(end <= -1e18);

        let end = unwrap_angle(-3.7e17, 1e300, true);
        assert!(end <= -3.7e17);
    }

    #[test]
    fn test_linspace_f32() {
        assert_eq!(linspace(0.0_f32, 2.0, 3), vec![0.0, 1.0, 2.0]);
    }
}
