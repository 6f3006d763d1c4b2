//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `DfError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `df-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum DfError {
    /// Two opinion states that must share a shape do not.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// An opinion value is NaN, infinite, or outside [0, 1].
    #[error("opinion {value} at index {index} is outside [0, 1]")]
    OpinionOutOfRange { index: usize, value: f64 },

    /// Raised only by the opt-in [`DeffuantParams::validate`][crate::DeffuantParams::validate].
    #[error("parameter out of range: {0}")]
    Parameter(String),
}

/// Shorthand result type for all `df-*` crates.
pub type DfResult<T> = Result<T, DfError>;
