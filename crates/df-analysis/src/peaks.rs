//! Opinion cluster ("peak") detection.

use df_core::{Opinions, round_to};

/// Distinct values of `snapshot` after rounding each opinion to `ndigits`
/// decimal places, in order of first occurrence.
///
/// Membership is a linear scan of the peaks found so far, O(n·k) for `n`
/// agents and `k` peaks.  `k` stays small once a run has settled.
///
/// ```
/// use df_analysis::detect_peaks;
/// use df_core::OpinionVec;
///
/// let s = OpinionVec::new(vec![0.101, 0.104, 0.099, 0.5]).unwrap();
/// assert_eq!(detect_peaks(&s, 2), vec![0.1, 0.5]);
/// ```
pub fn detect_peaks<S: Opinions>(snapshot: &S, ndigits: u32) -> Vec<f64> {
    let mut peaks: Vec<f64> = Vec::new();
    for &x in snapshot.as_slice() {
        let r = round_to(x, ndigits);
        if !peaks.contains(&r) {
            peaks.push(r);
        }
    }
    peaks
}

/// Number of peaks in `snapshot` at `ndigits` precision.
#[inline]
pub fn peak_count<S: Opinions>(snapshot: &S, ndigits: u32) -> usize {
    detect_peaks(snapshot, ndigits).len()
}
