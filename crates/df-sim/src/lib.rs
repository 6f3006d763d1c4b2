//! `df-sim` — step engines and the simulation driver.
//!
//! # Run loop
//!
//! ```text
//! history = [initial uniform opinions]
//! for step in 1..config.steps:
//!     next = copy(history.last)
//!     topology.step(next)            ← batch_size pairwise interactions
//!     history.push(next)
//! if convergence enabled:
//!     while latest != latest[-interval] (rounded) and checks < max_checks:
//!         run `interval` more steps
//! ```
//!
//! # Topologies
//!
//! | Type                | State         | Partner of agent `i`                       |
//! |---------------------|---------------|--------------------------------------------|
//! | [`GraphTopology`]   | `OpinionVec`  | uniform over `i`'s network neighbours      |
//! | [`LatticeTopology`] | `OpinionGrid` | uniform over N/S/E/W, see [`LatticeEdgePolicy`] |
//! | [`CompleteTopology`]| `OpinionVec`  | uniform over all agents, see [`SelfPairing`] |
//!
//! # Quick-start
//!
//! ```rust
//! use df_core::{DeffuantParams, Opinions};
//! use df_sim::{CompleteTopology, NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(CompleteTopology::new(50), DeffuantParams::new(0.3, 0.5))
//!     .steps(20)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let history = sim.run(&mut NoopObserver).unwrap();
//! assert_eq!(history.len(), 20);
//! assert_eq!(history.last().len(), 50);
//! ```

pub mod builder;
pub mod complete;
pub mod convergence;
pub mod error;
pub mod graph;
pub mod history;
pub mod lattice;
pub mod observer;
pub mod sim;
pub mod topology;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use complete::{CompleteTopology, SelfPairing};
pub use convergence::compare;
pub use error::{SimError, SimResult};
pub use graph::GraphTopology;
pub use history::{ConvergenceReport, History};
pub use lattice::{Direction, LatticeEdgePolicy, LatticeTopology};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulator, simulate};
pub use topology::{StepStats, Topology};
