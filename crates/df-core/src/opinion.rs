//! Typed opinion containers.
//!
//! # Layout
//!
//! Both containers store one `f64` per agent in a single contiguous `Vec`.
//! `OpinionGrid` is row-major: cell `(row, col)` lives at `row * side + col`.
//! A flat view of either is available through [`Opinions::as_slice`], which
//! is what convergence checks, peak detection and statistics consume.
//!
//! Values are checked against [0, 1] only at construction.  The update rule
//! preserves the range for `rate <= 0.5` and nothing re-validates it.

use std::ops::{Index, IndexMut};

use crate::{DfError, DfResult, SimRng};

// ── Opinions trait ────────────────────────────────────────────────────────────

/// Shape-aware opinion state shared by every topology.
pub trait Opinions: Clone + Send + Sync + 'static {
    /// Flat, read-only view of every agent's opinion.
    fn as_slice(&self) -> &[f64];

    /// Flat, mutable view of every agent's opinion.
    fn as_mut_slice(&mut self) -> &mut [f64];

    /// Number of agents.
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// `Err(ShapeMismatch)` unless `self` and `other` have the same shape.
    fn ensure_same_shape(&self, other: &Self) -> DfResult<()> {
        if self.len() != other.len() {
            return Err(DfError::ShapeMismatch {
                expected: self.len(),
                got:      other.len(),
            });
        }
        Ok(())
    }
}

fn check_range(values: &[f64]) -> DfResult<()> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        Some((index, &value)) => Err(DfError::OpinionOutOfRange { index, value }),
        None => Ok(()),
    }
}

// ── OpinionVec ────────────────────────────────────────────────────────────────

/// One opinion per agent, indexed by agent id.  Used by the arbitrary-graph
/// and complete-population topologies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpinionVec(Vec<f64>);

impl OpinionVec {
    /// Wrap `values`, rejecting anything outside [0, 1] (including NaN).
    pub fn new(values: Vec<f64>) -> DfResult<Self> {
        check_range(&values)?;
        Ok(Self(values))
    }

    /// `n` independent uniform draws over [0, 1).
    pub fn uniform(n: usize, rng: &mut SimRng) -> Self {
        Self((0..n).map(|_| rng.unit()).collect())
    }
}

impl Opinions for OpinionVec {
    #[inline]
    fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl Index<usize> for OpinionVec {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl IndexMut<usize> for OpinionVec {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

// ── OpinionGrid ───────────────────────────────────────────────────────────────

/// Square `side × side` opinion lattice, row-major.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpinionGrid {
    side:  usize,
    cells: Vec<f64>,
}

impl OpinionGrid {
    /// Wrap row-major `cells`; their count must be exactly `side²`.
    pub fn new(side: usize, cells: Vec<f64>) -> DfResult<Self> {
        if cells.len() != side * side {
            return Err(DfError::ShapeMismatch {
                expected: side * side,
                got:      cells.len(),
            });
        }
        check_range(&cells)?;
        Ok(Self { side, cells })
    }

    /// `side²` independent uniform draws over [0, 1).
    pub fn uniform(side: usize, rng: &mut SimRng) -> Self {
        let cells = (0..side * side).map(|_| rng.unit()).collect();
        Self { side, cells }
    }

    /// Length of one grid edge.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Flat index of `(row, col)`.
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.side && col < self.side);
        row * self.side + col
    }

    /// Iterator over the grid's rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.cells.chunks(self.side.max(1))
    }
}

impl Opinions for OpinionGrid {
    #[inline]
    fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    fn ensure_same_shape(&self, other: &Self) -> DfResult<()> {
        if self.side != other.side {
            return Err(DfError::ShapeMismatch {
                expected: self.cells.len(),
                got:      other.cells.len(),
            });
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for OpinionGrid {
    type Output = f64;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.cells[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for OpinionGrid {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        let i = self.offset(row, col);
        &mut self.cells[i]
    }
}
