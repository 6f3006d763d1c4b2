//! The interface shared by the three step engines.

use df_core::{DeffuantParams, Opinions, SimRng};

use crate::SimResult;

/// Outcome of one [`Topology::step`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Pairwise interactions actually drawn.  Equals `batch_size` unless a
    /// lattice batch was truncated at the grid boundary.
    pub attempted: usize,
    /// Interactions whose pair was within the threshold and moved.
    pub updated: usize,
}

impl StepStats {
    /// `true` if fewer interactions ran than the batch asked for.
    #[inline]
    pub fn truncated(&self, batch_size: usize) -> bool {
        self.attempted < batch_size
    }
}

/// A contact structure plus the rule for picking interaction partners.
///
/// Implementations are immutable for the duration of a run and may be
/// shared between threads; all mutable state is the opinion state passed to
/// [`step`](Self::step) and the caller's RNG.
pub trait Topology: Send + Sync {
    /// Opinion container this topology evolves.
    type State: Opinions;

    /// Number of agents.
    fn agent_count(&self) -> usize;

    /// Fresh state with one uniform [0, 1) draw per agent.
    fn initial_state(&self, rng: &mut SimRng) -> Self::State;

    /// Run `params.batch_size` elementary interactions on `state` in place.
    ///
    /// Fails with [`SimError::IsolatedAgent`][crate::SimError::IsolatedAgent]
    /// if a drawn agent has no partner, and with `ShapeMismatch` if `state`
    /// does not belong to this topology.  A failed call may leave `state`
    /// partially updated.
    fn step(
        &self,
        state:  &mut Self::State,
        params: &DeffuantParams,
        rng:    &mut SimRng,
    ) -> SimResult<StepStats>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

/// `Err(ShapeMismatch)` unless `state` holds exactly `expected` agents.
pub(crate) fn ensure_len<S: Opinions>(state: &S, expected: usize) -> SimResult<()> {
    if state.len() != expected {
        return Err(df_core::DfError::ShapeMismatch { expected, got: state.len() }.into());
    }
    Ok(())
}

/// Borrowed topologies step like owned ones, so one network can back many
/// simulators (threshold sweeps, repeated studies) without cloning.
impl<T: Topology + ?Sized> Topology for &T {
    type State = T::State;

    #[inline]
    fn agent_count(&self) -> usize {
        (**self).agent_count()
    }

    #[inline]
    fn initial_state(&self, rng: &mut SimRng) -> Self::State {
        (**self).initial_state(rng)
    }

    #[inline]
    fn step(
        &self,
        state:  &mut Self::State,
        params: &DeffuantParams,
        rng:    &mut SimRng,
    ) -> SimResult<StepStats> {
        (**self).step(state, params, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
