//! Contact network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format.  Given an agent
//! `a`, its neighbours occupy the slice:
//!
//! ```text
//! adjacency[ offsets[a] .. offsets[a+1] ]
//! ```
//!
//! Every undirected edge is stored once in each direction, so the slice for
//! `a` is exactly the set of agents `a` may interact with.  Partner selection
//! in the step loop is one slice lookup plus one uniform index draw, with no
//! allocation.

use crate::{NetworkError, NetworkResult};

// ── ContactNetwork ────────────────────────────────────────────────────────────

/// Immutable undirected contact graph over agents `0..order`.
///
/// Do not construct directly; use [`ContactNetworkBuilder`] or one of the
/// [`generators`](crate::generators).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactNetwork {
    /// CSR row pointer.  Length = `order + 1`.
    offsets: Vec<u32>,

    /// Concatenated, per-agent sorted neighbour lists.
    adjacency: Vec<u32>,
}

impl ContactNetwork {
    /// Number of agents (vertices).
    #[inline]
    pub fn order(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of undirected edges.  A self-loop counts once.
    pub fn edge_count(&self) -> usize {
        let loops = (0..self.order())
            .filter(|&a| self.neighbors(a).binary_search(&(a as u32)).is_ok())
            .count();
        (self.adjacency.len() - loops) / 2 + loops
    }

    /// Neighbours of `agent`, ascending.
    ///
    /// # Panics
    /// Panics if `agent >= order()`.
    #[inline]
    pub fn neighbors(&self, agent: usize) -> &[u32] {
        let start = self.offsets[agent] as usize;
        let end   = self.offsets[agent + 1] as usize;
        &self.adjacency[start..end]
    }

    #[inline]
    pub fn degree(&self, agent: usize) -> usize {
        (self.offsets[agent + 1] - self.offsets[agent]) as usize
    }

    /// Agents with no neighbour at all.  Picking one of these in the graph
    /// step engine is a precondition violation.
    pub fn isolated(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.order()).filter(|&a| self.degree(a) == 0)
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        a < self.order() && self.neighbors(a).binary_search(&(b as u32)).is_ok()
    }
}

// ── ContactNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`ContactNetwork`] incrementally, then call [`build`](Self::build).
///
/// Edges may be added in any order; duplicates are collapsed.  `build()`
/// sorts the directed half-edges by source and constructs the CSR arrays.
///
/// # Example
///
/// ```
/// use df_network::ContactNetworkBuilder;
///
/// let mut b = ContactNetworkBuilder::new(3);
/// b.add_edge(0, 1).unwrap();
/// b.add_edge(1, 2).unwrap();
/// let net = b.build();
/// assert_eq!(net.order(), 3);
/// assert_eq!(net.neighbors(1), &[0, 2]);
/// ```
pub struct ContactNetworkBuilder {
    order:      usize,
    half_edges: Vec<(u32, u32)>,
}

impl ContactNetworkBuilder {
    /// Builder for a network over agents `0..order`, initially edgeless.
    pub fn new(order: usize) -> Self {
        Self { order, half_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of undirected edges.
    pub fn with_capacity(order: usize, edges: usize) -> Self {
        Self { order, half_edges: Vec::with_capacity(edges * 2) }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Add an undirected edge between `a` and `b`.
    pub fn add_edge(&mut self, a: usize, b: usize) -> NetworkResult<()> {
        for agent in [a, b] {
            if agent >= self.order {
                return Err(NetworkError::AgentOutOfRange { agent, order: self.order });
            }
            if agent > u32::MAX as usize {
                return Err(NetworkError::TooLarge(self.order));
            }
        }
        let (a, b) = (a as u32, b as u32);
        self.half_edges.push((a, b));
        if a != b {
            self.half_edges.push((b, a));
        }
        Ok(())
    }

    /// Consume the builder and produce a [`ContactNetwork`].
    ///
    /// Time complexity: O(E log E) for the half-edge sort.
    pub fn build(self) -> ContactNetwork {
        let mut raw = self.half_edges;
        raw.sort_unstable();
        raw.dedup();

        let mut offsets = vec![0u32; self.order + 1];
        for &(from, _) in &raw {
            offsets[from as usize + 1] += 1;
        }
        for i in 1..=self.order {
            offsets[i] += offsets[i - 1];
        }
        debug_assert_eq!(offsets[self.order] as usize, raw.len());

        let adjacency = raw.into_iter().map(|(_, to)| to).collect();
        ContactNetwork { offsets, adjacency }
    }
}
