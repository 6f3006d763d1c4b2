//! `df-core` — foundational types for the Deffuant bounded-confidence simulator.
//!
//! This crate is a dependency of every other `df-*` crate.  It has no `df-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`opinion`]  | `Opinions` trait, `OpinionVec`, `OpinionGrid`              |
//! | [`params`]   | `DeffuantParams`, `SimConfig`, `ConvergencePolicy`         |
//! | [`rule`]     | `compromise` — the linear bounded-confidence update        |
//! | [`round`]    | Decimal rounding shared by convergence and peak detection  |
//! | [`rng`]      | `SimRng`                                                   |
//! | [`error`]    | `DfError`, `DfResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to parameter/config types.  |

pub mod error;
pub mod opinion;
pub mod params;
pub mod rng;
pub mod round;
pub mod rule;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DfError, DfResult};
pub use opinion::{OpinionGrid, OpinionVec, Opinions};
pub use params::{ConvergencePolicy, DeffuantParams, SimConfig};
pub use rng::SimRng;
pub use round::{round_to, rounded_eq};
pub use rule::{compromise, interact};
