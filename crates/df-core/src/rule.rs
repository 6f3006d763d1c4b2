//! The linear bounded-confidence compromise rule.

/// Post-interaction opinions of a pair.
///
/// If `|oi - oj| < threshold` both move toward each other by `rate` times the
/// gap:
///
/// ```text
/// oi' = oi - rate * (oi - oj)
/// oj' = oj + rate * (oi - oj)
/// ```
///
/// Otherwise the pair is returned unchanged.  The comparison is strict, so a
/// threshold of 0 never updates anything.  With `rate <= 0.5` both results
/// stay within `[min(oi, oj), max(oi, oj)]`; larger rates are accepted but
/// overshoot.
///
/// The rule is not symmetric in its arguments bit-for-bit: swapping the roles
/// of `oi` and `oj` yields the same values only up to floating-point rounding.
///
/// ```
/// use df_core::compromise;
///
/// assert_eq!(compromise(0.2, 0.8, 1.0, 0.5), (0.5, 0.5));
/// assert_eq!(compromise(0.2, 0.8, 0.3, 0.5), (0.2, 0.8));
/// ```
#[inline]
pub fn compromise(oi: f64, oj: f64, threshold: f64, rate: f64) -> (f64, f64) {
    let gap = oi - oj;
    if gap.abs() < threshold {
        (oi - rate * gap, oj + rate * gap)
    } else {
        (oi, oj)
    }
}

/// Apply [`compromise`] to `opinions[i]` and `opinions[j]` in place.
///
/// Returns `true` if the pair was within the threshold.  `i == j` is allowed,
/// is always a no-op and returns `false`.
#[inline]
pub fn interact(opinions: &mut [f64], i: usize, j: usize, threshold: f64, rate: f64) -> bool {
    if i == j {
        return false;
    }
    if (opinions[i] - opinions[j]).abs() >= threshold {
        return false;
    }
    let (oi, oj) = compromise(opinions[i], opinions[j], threshold, rate);
    opinions[i] = oi;
    opinions[j] = oj;
    true
}
