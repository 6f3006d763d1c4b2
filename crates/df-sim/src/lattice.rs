//! Step engine for a square lattice with 4-neighbour adjacency.
//!
//! # Boundary handling
//!
//! Each interaction draws a cell uniformly, then one of the four directions
//! uniformly.  Near the boundary the drawn direction can point off the grid.
//! [`LatticeEdgePolicy`] decides what happens then:
//!
//! - `Truncate` abandons the rest of the batch.  Boundary-heavy draws
//!   therefore shorten the effective batch; [`StepStats::attempted`] reports
//!   how many interactions actually ran.
//! - `Redraw` picks uniformly among the in-bounds neighbours instead, so
//!   every batch runs in full.  For a cell with `k` in-bounds neighbours the
//!   partner distribution is uniform over those `k`.

use df_core::{DeffuantParams, OpinionGrid, Opinions, SimRng, interact};
use tracing::trace;

use crate::{SimError, SimResult, StepStats, Topology};

/// What to do when a drawn direction leaves the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LatticeEdgePolicy {
    /// Stop the current batch at the first off-grid draw.
    #[default]
    Truncate,
    /// Re-draw among the cell's in-bounds neighbours.
    Redraw,
}

/// Grid direction, no wraparound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Neighbour of `(row, col)` in this direction, or `None` if it would
    /// fall outside a `side × side` grid.
    #[inline]
    pub fn step(self, row: usize, col: usize, side: usize) -> Option<(usize, usize)> {
        match self {
            Direction::Up    => row.checked_sub(1).map(|r| (r, col)),
            Direction::Down  => (row + 1 < side).then_some((row + 1, col)),
            Direction::Left  => col.checked_sub(1).map(|c| (row, c)),
            Direction::Right => (col + 1 < side).then_some((row, col + 1)),
        }
    }
}

/// `side × side` lattice; agent `(row, col)` talks to its N/S/E/W neighbours.
#[derive(Clone, Copy, Debug)]
pub struct LatticeTopology {
    side:        usize,
    edge_policy: LatticeEdgePolicy,
}

impl LatticeTopology {
    pub fn new(side: usize) -> Self {
        Self { side, edge_policy: LatticeEdgePolicy::Truncate }
    }

    pub fn with_edge_policy(mut self, edge_policy: LatticeEdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn edge_policy(&self) -> LatticeEdgePolicy {
        self.edge_policy
    }

    fn redraw(&self, row: usize, col: usize, rng: &mut SimRng) -> Option<(usize, usize)> {
        let mut valid = [(0, 0); 4];
        let mut k = 0;
        for dir in Direction::ALL {
            if let Some(cell) = dir.step(row, col, self.side) {
                valid[k] = cell;
                k += 1;
            }
        }
        rng.choose(&valid[..k]).copied()
    }
}

impl Topology for LatticeTopology {
    type State = OpinionGrid;

    fn agent_count(&self) -> usize {
        self.side * self.side
    }

    fn initial_state(&self, rng: &mut SimRng) -> OpinionGrid {
        OpinionGrid::uniform(self.side, rng)
    }

    fn step(
        &self,
        state:  &mut OpinionGrid,
        params: &DeffuantParams,
        rng:    &mut SimRng,
    ) -> SimResult<StepStats> {
        let side = self.side;
        if state.side() != side {
            return Err(df_core::DfError::ShapeMismatch {
                expected: side * side,
                got:      state.len(),
            }
            .into());
        }
        if params.batch_size == 0 {
            return Ok(StepStats::default());
        }
        if side == 0 {
            return Err(SimError::EmptyPopulation);
        }

        let cells = state.as_mut_slice();
        let mut stats = StepStats::default();
        for _ in 0..params.batch_size {
            let (row, col) = (rng.index(side), rng.index(side));
            let dir = Direction::ALL[rng.index(4)];
            let (row2, col2) = match (dir.step(row, col, side), self.edge_policy) {
                (Some(cell), _) => cell,
                (None, LatticeEdgePolicy::Truncate) => {
                    trace!(
                        attempted = stats.attempted,
                        batch = params.batch_size,
                        "lattice batch truncated at grid boundary"
                    );
                    break;
                }
                (None, LatticeEdgePolicy::Redraw) => match self.redraw(row, col, rng) {
                    Some(cell) => cell,
                    None => return Err(SimError::IsolatedAgent { agent: row * side + col }),
                },
            };
            stats.attempted += 1;
            if interact(cells, row * side + col, row2 * side + col2, params.threshold, params.rate) {
                stats.updated += 1;
            }
        }
        Ok(stats)
    }

    fn name(&self) -> &'static str {
        "lattice"
    }
}
