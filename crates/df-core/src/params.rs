//! Model parameters and run configuration.
//!
//! Typically built by the application crate (from CLI flags or a JSON file)
//! and passed to the simulation driver.

use crate::{DfError, DfResult};

/// Elementary interactions per recorded time step unless overridden.
pub const DEFAULT_BATCH_SIZE: usize = 100;

// ── DeffuantParams ────────────────────────────────────────────────────────────

/// Parameters of the bounded-confidence interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeffuantParams {
    /// Confidence threshold `d`: agents compromise only if their opinions
    /// differ by strictly less than this.  Meaningful range [0, 1].
    pub threshold: f64,

    /// Adaptation rate `mu`: fraction of the gap each agent closes.
    /// Must not exceed 0.5 or the pair overshoots each other.
    pub rate: f64,

    /// Elementary interactions per recorded time step (`nbu`).
    pub batch_size: usize,
}

impl DeffuantParams {
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate, batch_size: DEFAULT_BATCH_SIZE }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Copy of `self` with a different threshold (used by threshold sweeps).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check `threshold ∈ [0, 1]` and `rate ∈ [0, 0.5]`.
    ///
    /// The engine never calls this; out-of-range parameters are accepted and
    /// may push opinions outside [0, 1].  Callers that take parameters from
    /// users should validate before running.
    pub fn validate(&self) -> DfResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(DfError::Parameter(format!(
                "threshold {} not in [0, 1]",
                self.threshold
            )));
        }
        if !(0.0..=0.5).contains(&self.rate) {
            return Err(DfError::Parameter(format!("rate {} not in [0, 0.5]", self.rate)));
        }
        Ok(())
    }
}

// ── ConvergencePolicy ─────────────────────────────────────────────────────────

/// Early-stopping controls for the simulation driver.
///
/// After the initial run the driver compares the newest snapshot with the one
/// `interval` steps earlier.  While they differ it runs up to `max_checks`
/// further rounds of `interval` steps, re-checking after each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePolicy {
    /// Time steps between two convergence checks.  Default: 1000.
    pub interval: usize,
    /// Extra rounds allowed before giving up.  Default: 5.
    pub max_checks: usize,
    /// Decimal digits kept when comparing snapshots.  Default: 2.
    pub ndigits: u32,
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self { interval: 1_000, max_checks: 5, ndigits: 2 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Per-run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Recorded time steps `t`, including the initial condition.  The
    /// returned history is never shorter than this.
    pub steps: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// `None` disables early stopping; the history is exactly `steps` long.
    pub convergence: Option<ConvergencePolicy>,
}

impl SimConfig {
    pub fn new(steps: usize, seed: u64) -> Self {
        Self { steps, seed, convergence: None }
    }

    pub fn with_convergence(mut self, policy: ConvergencePolicy) -> Self {
        self.convergence = Some(policy);
        self
    }
}
