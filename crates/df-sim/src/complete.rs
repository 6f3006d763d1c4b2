//! Step engine for a fully mixed population.

use df_core::{DeffuantParams, OpinionVec, Opinions, SimRng, interact};

use crate::topology::ensure_len;
use crate::{SimError, SimResult, StepStats, Topology};

/// Whether the two agents of an interaction may be the same agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelfPairing {
    /// Draw both indices independently from `0..n`.  A coincident pair is a
    /// no-op that still uses up a slot in the batch.
    #[default]
    Allow,
    /// Draw the partner from the other `n - 1` agents.  Needs `n >= 2`.
    Exclude,
}

/// Every agent may interact with every other; no explicit network.
#[derive(Clone, Copy, Debug)]
pub struct CompleteTopology {
    agents:       usize,
    self_pairing: SelfPairing,
}

impl CompleteTopology {
    pub fn new(agents: usize) -> Self {
        Self { agents, self_pairing: SelfPairing::Allow }
    }

    pub fn with_self_pairing(mut self, self_pairing: SelfPairing) -> Self {
        self.self_pairing = self_pairing;
        self
    }

    pub fn self_pairing(&self) -> SelfPairing {
        self.self_pairing
    }
}

impl Topology for CompleteTopology {
    type State = OpinionVec;

    fn agent_count(&self) -> usize {
        self.agents
    }

    fn initial_state(&self, rng: &mut SimRng) -> OpinionVec {
        OpinionVec::uniform(self.agents, rng)
    }

    fn step(
        &self,
        state:  &mut OpinionVec,
        params: &DeffuantParams,
        rng:    &mut SimRng,
    ) -> SimResult<StepStats> {
        let n = self.agents;
        ensure_len(state, n)?;
        if params.batch_size == 0 {
            return Ok(StepStats::default());
        }
        match (n, self.self_pairing) {
            (0, _) => return Err(SimError::EmptyPopulation),
            (1, SelfPairing::Exclude) => return Err(SimError::IsolatedAgent { agent: 0 }),
            _ => {}
        }

        let opinions = state.as_mut_slice();
        let mut updated = 0;
        for _ in 0..params.batch_size {
            let i = rng.index(n);
            let j = match self.self_pairing {
                SelfPairing::Allow => rng.index(n),
                SelfPairing::Exclude => {
                    let j = rng.index(n - 1);
                    if j >= i { j + 1 } else { j }
                }
            };
            if interact(opinions, i, j, params.threshold, params.rate) {
                updated += 1;
            }
        }
        Ok(StepStats { attempted: params.batch_size, updated })
    }

    fn name(&self) -> &'static str {
        "complete"
    }
}
