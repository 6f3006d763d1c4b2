//! Fluent builder for constructing a [`Simulator`].

use df_core::{ConvergencePolicy, DeffuantParams, SimConfig};

use crate::sim::check_policy;
use crate::{SimResult, Simulator, Topology};

/// Fluent builder for [`Simulator<T>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default          |
/// |---------------------|------------------|
/// | `.steps(t)`         | 1 (initial only) |
/// | `.seed(s)`          | 0                |
/// | `.convergence(p)`   | disabled         |
///
/// # Example
///
/// ```rust
/// use df_core::{ConvergencePolicy, DeffuantParams};
/// use df_sim::{LatticeTopology, SimBuilder};
///
/// let sim = SimBuilder::new(LatticeTopology::new(10), DeffuantParams::new(0.5, 0.3))
///     .steps(100)
///     .seed(7)
///     .convergence(ConvergencePolicy { interval: 50, max_checks: 3, ndigits: 2 })
///     .build()
///     .unwrap();
/// assert_eq!(sim.config.steps, 100);
/// ```
pub struct SimBuilder<T: Topology> {
    topology:    T,
    params:      DeffuantParams,
    steps:       usize,
    seed:        u64,
    convergence: Option<ConvergencePolicy>,
}

impl<T: Topology> SimBuilder<T> {
    pub fn new(topology: T, params: DeffuantParams) -> Self {
        Self {
            topology,
            params,
            steps:       1,
            seed:        0,
            convergence: None,
        }
    }

    /// Recorded time steps, including the initial condition.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable early stopping.
    pub fn convergence(mut self, policy: ConvergencePolicy) -> Self {
        self.convergence = Some(policy);
        self
    }

    /// Validate the run configuration and return a ready-to-run [`Simulator`].
    ///
    /// Only structural settings are checked.  `threshold` and `rate` are
    /// passed through as given; see `DeffuantParams::validate`.
    pub fn build(self) -> SimResult<Simulator<T>> {
        if let Some(policy) = self.convergence {
            check_policy(policy)?;
        }
        let config = SimConfig { steps: self.steps, seed: self.seed, convergence: self.convergence };
        Ok(Simulator::new(self.topology, self.params, config))
    }
}
