//! Append-only record of a run's opinion snapshots.

use std::ops::Index;

use df_core::Opinions;

/// How the convergence-retry loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceReport {
    /// Whether the last check found the two snapshots equal.
    pub converged: bool,
    /// Extra rounds run after the initial phase (0 if the first check passed).
    pub checks: usize,
}

/// Snapshots indexed by time step, entry 0 being the initial condition.
///
/// Entries are independent copies; the driver never touches an entry after
/// pushing it.  A `History` always holds at least one snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct History<S: Opinions> {
    snapshots:   Vec<S>,
    convergence: Option<ConvergenceReport>,
}

impl<S: Opinions> History<S> {
    pub(crate) fn new(initial: S, capacity: usize) -> Self {
        let mut snapshots = Vec::with_capacity(capacity.max(1));
        snapshots.push(initial);
        Self { snapshots, convergence: None }
    }

    pub(crate) fn push(&mut self, snapshot: S) {
        self.snapshots.push(snapshot);
    }

    pub(crate) fn set_convergence(&mut self, report: ConvergenceReport) {
        self.convergence = Some(report);
    }

    /// Number of recorded time steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&S> {
        self.snapshots.get(step)
    }

    /// The initial condition.
    pub fn first(&self) -> &S {
        &self.snapshots[0]
    }

    /// The most recent snapshot.
    pub fn last(&self) -> &S {
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[S] {
        &self.snapshots
    }

    /// `None` if the run had convergence checking disabled.
    pub fn convergence(&self) -> Option<ConvergenceReport> {
        self.convergence
    }
}

impl<S: Opinions> Index<usize> for History<S> {
    type Output = S;
    fn index(&self, step: usize) -> &S {
        &self.snapshots[step]
    }
}

impl<'a, S: Opinions> IntoIterator for &'a History<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
