//! Step engine over an arbitrary undirected contact network.

use df_core::{DeffuantParams, OpinionVec, Opinions, SimRng, interact};
use df_network::ContactNetwork;

use crate::topology::ensure_len;
use crate::{SimError, SimResult, StepStats, Topology};

/// Agents interact only with their neighbours in a [`ContactNetwork`].
///
/// Each elementary interaction draws an agent uniformly from `0..order`,
/// then a partner uniformly from that agent's neighbour list.  Every agent
/// the draw can hit must have a neighbour; an isolated agent makes the step
/// fail with [`SimError::IsolatedAgent`] once it is drawn.
#[derive(Clone, Debug)]
pub struct GraphTopology {
    network: ContactNetwork,
}

impl GraphTopology {
    pub fn new(network: ContactNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &ContactNetwork {
        &self.network
    }
}

impl Topology for GraphTopology {
    type State = OpinionVec;

    fn agent_count(&self) -> usize {
        self.network.order()
    }

    fn initial_state(&self, rng: &mut SimRng) -> OpinionVec {
        OpinionVec::uniform(self.network.order(), rng)
    }

    fn step(
        &self,
        state:  &mut OpinionVec,
        params: &DeffuantParams,
        rng:    &mut SimRng,
    ) -> SimResult<StepStats> {
        let n = self.network.order();
        ensure_len(state, n)?;
        if params.batch_size == 0 {
            return Ok(StepStats::default());
        }
        if n == 0 {
            return Err(SimError::EmptyPopulation);
        }

        let opinions = state.as_mut_slice();
        let mut updated = 0;
        for _ in 0..params.batch_size {
            let i = rng.index(n);
            let Some(&j) = rng.choose(self.network.neighbors(i)) else {
                return Err(SimError::IsolatedAgent { agent: i });
            };
            if interact(opinions, i, j as usize, params.threshold, params.rate) {
                updated += 1;
            }
        }
        Ok(StepStats { attempted: params.batch_size, updated })
    }

    fn name(&self) -> &'static str {
        "graph"
    }
}
