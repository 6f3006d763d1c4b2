//! `df-network` — the contact structure agents interact over.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`network`]    | `ContactNetwork` (CSR adjacency), `ContactNetworkBuilder` |
//! | [`generators`] | Ring, lattice, complete and Erdős–Rényi networks      |
//! | [`error`]      | `NetworkError`, `NetworkResult`                       |
//!
//! Vertex ids are exactly `0..order`, one per agent, so a vertex id doubles
//! as an index into the opinion vector.

pub mod error;
pub mod generators;
pub mod network;


pub use error::{NetworkError, NetworkResult};
pub use generators::{complete, erdos_renyi, lattice, ring};
pub use network::{ContactNetwork, ContactNetworkBuilder};
