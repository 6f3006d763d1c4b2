//! Per-snapshot and per-step summary statistics.

use df_core::Opinions;

use crate::{AnalysisError, AnalysisResult};

/// Arithmetic mean of one snapshot.
pub fn snapshot_mean<S: Opinions>(snapshot: &S) -> Option<f64> {
    let values = snapshot.as_slice();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divisor `n`) of one snapshot.
pub fn snapshot_variance<S: Opinions>(snapshot: &S) -> Option<f64> {
    let m = snapshot_mean(snapshot)?;
    let values = snapshot.as_slice();
    Some(values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / values.len() as f64)
}

/// Mean opinion at every step of `snapshots` (e.g. `history.snapshots()`).
///
/// All snapshots must share a shape and hold at least one agent.
pub fn mean<S: Opinions>(snapshots: &[S]) -> AnalysisResult<Vec<f64>> {
    per_step(snapshots, snapshot_mean)
}

/// Population variance at every step of `snapshots`.
pub fn variance<S: Opinions>(snapshots: &[S]) -> AnalysisResult<Vec<f64>> {
    per_step(snapshots, snapshot_variance)
}

fn per_step<S: Opinions>(snapshots: &[S], f: fn(&S) -> Option<f64>) -> AnalysisResult<Vec<f64>> {
    let Some(first) = snapshots.first() else {
        return Ok(Vec::new());
    };
    snapshots
        .iter()
        .enumerate()
        .map(|(step, s)| {
            first.ensure_same_shape(s)?;
            f(s).ok_or(AnalysisError::EmptySnapshot { step })
        })
        .collect()
}
