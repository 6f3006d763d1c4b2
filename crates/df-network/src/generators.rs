//! Standard contact networks.
//!
//! These cover the usual experimental set-ups: a ring lattice for local
//! contact, a 4-neighbour square lattice (the graph form of the lattice
//! topology), the complete graph, and the Erdős–Rényi random graph G(n, p).

use df_core::SimRng;
use tracing::debug;

use crate::{ContactNetwork, ContactNetworkBuilder, NetworkError, NetworkResult};

/// Ring of `n` agents, each linked to its `k` nearest neighbours on either
/// side (`k = 1` gives a plain cycle).
pub fn ring(n: usize, k: usize) -> NetworkResult<ContactNetwork> {
    let mut b = ContactNetworkBuilder::with_capacity(n, n * k);
    if n > 1 {
        for a in 0..n {
            for step in 1..=k.min(n / 2) {
                b.add_edge(a, (a + step) % n)?;
            }
        }
    }
    Ok(b.build())
}

/// `side × side` square lattice with N/S/E/W adjacency and no wraparound.
///
/// Agent `row * side + col` sits at `(row, col)`, matching the row-major
/// layout of `OpinionGrid`.
pub fn lattice(side: usize) -> NetworkResult<ContactNetwork> {
    let n = side * side;
    let mut b = ContactNetworkBuilder::with_capacity(n, 2 * n);
    for row in 0..side {
        for col in 0..side {
            let a = row * side + col;
            if col + 1 < side {
                b.add_edge(a, a + 1)?;
            }
            if row + 1 < side {
                b.add_edge(a, a + side)?;
            }
        }
    }
    Ok(b.build())
}

/// Complete graph on `n` agents (no self-loops).
pub fn complete(n: usize) -> NetworkResult<ContactNetwork> {
    let mut b = ContactNetworkBuilder::with_capacity(n, n * n.saturating_sub(1) / 2);
    for a in 0..n {
        for c in a + 1..n {
            b.add_edge(a, c)?;
        }
    }
    Ok(b.build())
}

/// Erdős–Rényi G(n, p): each of the `n(n-1)/2` possible edges is present
/// independently with probability `p`.
///
/// The result may contain isolated agents; check
/// [`ContactNetwork::isolated`] before running the graph step engine on it.
pub fn erdos_renyi(n: usize, p: f64, rng: &mut SimRng) -> NetworkResult<ContactNetwork> {
    if !(0.0..=1.0).contains(&p) {
        return Err(NetworkError::InvalidProbability(p));
    }
    let mut b = ContactNetworkBuilder::new(n);
    for a in 0..n {
        for c in a + 1..n {
            if rng.gen_bool(p) {
                b.add_edge(a, c)?;
            }
        }
    }
    let net = b.build();
    debug!(order = n, p, edges = net.edge_count(), "generated Erdős–Rényi network");
    Ok(net)
}
