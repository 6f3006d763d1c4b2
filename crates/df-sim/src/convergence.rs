//! Snapshot equality under decimal rounding.

use df_core::{Opinions, rounded_eq};

use crate::SimResult;

/// `true` iff every pair of corresponding opinions in `a` and `b` is equal
/// after rounding each to `ndigits` decimal places.
///
/// Fails with `ShapeMismatch` if the snapshots differ in shape.
///
/// ```
/// use df_core::OpinionVec;
/// use df_sim::compare;
///
/// let a = OpinionVec::new(vec![0.101, 0.5]).unwrap();
/// let b = OpinionVec::new(vec![0.099, 0.5]).unwrap();
/// assert!(compare(&a, &b, 2).unwrap());
/// assert!(!compare(&a, &b, 3).unwrap());
/// ```
pub fn compare<S: Opinions>(a: &S, b: &S, ndigits: u32) -> SimResult<bool> {
    a.ensure_same_shape(b)?;
    Ok(a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .all(|(&x, &y)| rounded_eq(x, y, ndigits)))
}
