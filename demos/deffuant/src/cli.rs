//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use df_core::{ConvergencePolicy, DeffuantParams};
use df_sim::LatticeEdgePolicy;

#[derive(Parser, Debug)]
#[command(name = "deffuant", version, about = "Deffuant bounded-confidence opinion dynamics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one simulation and report the final opinion clusters.
    Run(RunArgs),
    /// Repeat simulations over a list of thresholds and summarize peak counts.
    Sweep(SweepArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TopologyKind {
    /// Everyone may meet everyone.
    Complete,
    /// Square grid with N/S/E/W neighbours; `--agents` is the side length.
    Lattice,
    /// Ring where each agent sees `--ring-k` neighbours per side.
    Ring,
    /// Erdős–Rényi random graph with edge probability `--edge-prob`.
    ErdosRenyi,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EdgeMode {
    Truncate,
    Redraw,
}

impl From<EdgeMode> for LatticeEdgePolicy {
    fn from(mode: EdgeMode) -> Self {
        match mode {
            EdgeMode::Truncate => LatticeEdgePolicy::Truncate,
            EdgeMode::Redraw => LatticeEdgePolicy::Redraw,
        }
    }
}

/// Options shared by `run` and `sweep`.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    #[arg(long, value_enum, default_value_t = TopologyKind::Complete)]
    pub topology: TopologyKind,

    /// Agent count (grid side length for `lattice`).
    #[arg(long, short = 'n', default_value_t = 500, env = "DF_AGENTS")]
    pub agents: usize,

    /// Adaptation rate mu, in [0, 0.5].
    #[arg(long, default_value_t = 0.5, env = "DF_RATE")]
    pub rate: f64,

    /// Interactions per recorded step.
    #[arg(long, default_value_t = df_core::params::DEFAULT_BATCH_SIZE, env = "DF_BATCH")]
    pub batch: usize,

    /// Recorded steps, including the initial condition.
    #[arg(long, short = 't', default_value_t = 1_000, env = "DF_STEPS")]
    pub steps: usize,

    #[arg(long, default_value_t = 42, env = "DF_SEED")]
    pub seed: u64,

    /// Keep stepping until snapshots `--interval` apart agree.
    #[arg(long)]
    pub converge: bool,

    #[arg(long, default_value_t = 1_000)]
    pub interval: usize,

    #[arg(long, default_value_t = 5)]
    pub max_checks: usize,

    /// Decimal digits for convergence checks and peak detection.
    #[arg(long, default_value_t = 2)]
    pub ndigits: u32,

    #[arg(long, value_enum, default_value_t = EdgeMode::Truncate)]
    pub edge_mode: EdgeMode,

    /// Never pair an agent with itself (complete topology).
    #[arg(long)]
    pub exclude_self: bool,

    #[arg(long, default_value_t = 2)]
    pub ring_k: usize,

    #[arg(long, default_value_t = 0.05)]
    pub edge_prob: f64,
}

impl ModelArgs {
    pub fn params(&self, threshold: f64) -> DeffuantParams {
        DeffuantParams::new(threshold, self.rate).with_batch_size(self.batch)
    }

    pub fn convergence(&self) -> Option<ConvergencePolicy> {
        self.converge.then_some(ConvergencePolicy {
            interval:   self.interval,
            max_checks: self.max_checks,
            ndigits:    self.ndigits,
        })
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Confidence threshold d, in [0, 1].
    #[arg(long, short = 'd', default_value_t = 0.3, env = "DF_THRESHOLD")]
    pub threshold: f64,

    /// Hide the progress bar.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Thresholds to test, comma-separated.
    #[arg(long, value_delimiter = ',', default_values_t = [0.1, 0.2, 0.3, 0.4, 0.5])]
    pub thresholds: Vec<f64>,

    /// Independent runs per threshold.
    #[arg(long, default_value_t = df_analysis::study::DEFAULT_RUNS)]
    pub runs: usize,

    /// JSON file overriding thresholds, study and convergence settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
