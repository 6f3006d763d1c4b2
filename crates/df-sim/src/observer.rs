//! Observer trait for progress reporting.

use crate::StepStats;

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points of a run.  Purely informational; they cannot affect control flow.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: usize }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: usize, stats: &StepStats) {
///         if step % self.interval == 0 {
///             println!("step {step}: {} updates", stats.updated);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first step.  `steps` is the length of the
    /// initial phase, including the initial condition.
    fn on_run_start(&mut self, _steps: usize) {}

    /// Called after each recorded step with that step's index.
    fn on_step_end(&mut self, _step: usize, _stats: &StepStats) {}

    /// Called before each convergence-retry round of `extra_steps` steps.
    fn on_extend(&mut self, _extra_steps: usize) {}

    /// Called after each convergence check.  `check` is 0 for the check that
    /// follows the initial phase.
    fn on_convergence_check(&mut self, _check: usize, _converged: bool) {}

    /// Called once with the final history length.
    fn on_run_end(&mut self, _len: usize) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
