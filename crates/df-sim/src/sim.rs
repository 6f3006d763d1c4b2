//! The `Simulator` struct and its run loop.

use df_core::{ConvergencePolicy, DeffuantParams, SimConfig, SimRng};
use tracing::{debug, info, warn};

use crate::{
    ConvergenceReport, History, NoopObserver, SimError, SimObserver, SimResult, Topology,
    compare,
};

/// Drives a [`Topology`]'s step engine across the time axis and records
/// every snapshot.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Simulator::new`].
pub struct Simulator<T: Topology> {
    pub topology: T,
    pub params:   DeffuantParams,
    pub config:   SimConfig,
}

impl<T: Topology> Simulator<T> {
    pub fn new(topology: T, params: DeffuantParams, config: SimConfig) -> Self {
        Self { topology, params, config }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run with a fresh RNG seeded from `config.seed`.
    pub fn run<O: SimObserver>(&self, observer: &mut O) -> SimResult<History<T::State>> {
        self.run_with(&mut SimRng::new(self.config.seed), observer)
    }

    /// Run drawing all randomness from `rng`.
    ///
    /// The returned history holds at least `max(config.steps, 1)` snapshots;
    /// more when the convergence loop extends it.  Any step failure aborts
    /// the run and the partial history is dropped.  A convergence policy with
    /// a zero interval is rejected with `SimError::Config` before any draw.
    pub fn run_with<O: SimObserver>(
        &self,
        rng:      &mut SimRng,
        observer: &mut O,
    ) -> SimResult<History<T::State>> {
        if let Some(policy) = self.config.convergence {
            check_policy(policy)?;
        }
        let steps = self.config.steps.max(1);
        let mut history = History::new(self.topology.initial_state(rng), steps);

        observer.on_run_start(steps);
        for step in 1..steps {
            self.advance(&mut history, rng, observer, step)?;
        }

        if let Some(policy) = self.config.convergence {
            let report = self.converge(&mut history, policy, rng, observer)?;
            history.set_convergence(report);
        }

        info!(
            topology = self.topology.name(),
            agents = self.topology.agent_count(),
            threshold = self.params.threshold,
            rate = self.params.rate,
            steps = history.len(),
            "run complete"
        );
        observer.on_run_end(history.len());
        Ok(history)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Copy the latest snapshot, step the copy, append it.
    fn advance<O: SimObserver>(
        &self,
        history:  &mut History<T::State>,
        rng:      &mut SimRng,
        observer: &mut O,
        step:     usize,
    ) -> SimResult<()> {
        let mut next = history.last().clone();
        let stats = self.topology.step(&mut next, &self.params, rng)?;
        history.push(next);
        observer.on_step_end(step, &stats);
        Ok(())
    }

    /// Extend `history` in rounds of `policy.interval` steps until the
    /// newest snapshot matches the one `interval` steps before it, or until
    /// `policy.max_checks` rounds have run.
    fn converge<O: SimObserver>(
        &self,
        history:  &mut History<T::State>,
        policy:   ConvergencePolicy,
        rng:      &mut SimRng,
        observer: &mut O,
    ) -> SimResult<ConvergenceReport> {
        let mut converged = is_settled(history, policy)?;
        debug!(check = 0, converged, len = history.len(), "convergence check");
        observer.on_convergence_check(0, converged);

        let mut checks = 0;
        while !converged && checks < policy.max_checks {
            observer.on_extend(policy.interval);
            for _ in 0..policy.interval {
                let step = history.len();
                self.advance(history, rng, observer, step)?;
            }
            checks += 1;
            converged = is_settled(history, policy)?;
            debug!(check = checks, converged, len = history.len(), "convergence check");
            observer.on_convergence_check(checks, converged);
        }

        if !converged {
            warn!(
                topology = self.topology.name(),
                threshold = self.params.threshold,
                checks,
                "no convergence within the check budget"
            );
        }
        Ok(ConvergenceReport { converged, checks })
    }
}

/// A zero interval would compare a snapshot with itself.
pub(crate) fn check_policy(policy: ConvergencePolicy) -> SimResult<()> {
    if policy.interval == 0 {
        return Err(SimError::Config("convergence interval must be at least 1".into()));
    }
    Ok(())
}

/// Compare the newest snapshot with the one `policy.interval` steps earlier
/// (or with the initial condition if the history is shorter than that).
fn is_settled<S: df_core::Opinions>(history: &History<S>, policy: ConvergencePolicy) -> SimResult<bool> {
    let latest = history.len() - 1;
    let earlier = latest.saturating_sub(policy.interval);
    compare(&history[latest], &history[earlier], policy.ndigits)
}

/// Run `topology` once with the given parameters and configuration, without
/// progress reporting.
pub fn simulate<T: Topology>(
    topology: T,
    params:   DeffuantParams,
    config:   SimConfig,
) -> SimResult<History<T::State>> {
    Simulator::new(topology, params, config).run(&mut NoopObserver)
}
