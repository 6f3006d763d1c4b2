//! Repeated-run peak studies.
//!
//! A study runs the simulator `runs` times with identical parameters and
//! records the peak count of each run's final snapshot.  A sweep repeats the
//! study once per candidate threshold.
//!
//! # Determinism
//!
//! Each run gets its own `SimRng`, derived in run order from a root seeded
//! with `StudyConfig::seed`.  A sweep derives one root per threshold the same
//! way.  With the `parallel` feature the runs execute on Rayon but the seeds
//! are fixed beforehand, so both builds return identical samples.

use df_core::{DeffuantParams, SimConfig, SimRng};
use df_sim::{NoopObserver, Simulator, Topology};
use tracing::{debug, info};

use crate::{AnalysisError, AnalysisResult, peak_count};

/// Number of independent runs per study unless overridden.
pub const DEFAULT_RUNS: usize = 50;

// ── StudyConfig ───────────────────────────────────────────────────────────────

/// Controls for [`peak_study`] and [`peak_sweep`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudyConfig {
    /// Independent runs per threshold (`nb`).  Default: 50.
    pub runs: usize,
    /// Peak-detection precision.  Default: 2.
    pub ndigits: u32,
    /// Root seed for the per-run RNG streams.
    pub seed: u64,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self { runs: DEFAULT_RUNS, ndigits: 2, seed: 0 }
    }
}

// ── Studies ───────────────────────────────────────────────────────────────────

/// Peak count of the final snapshot of each of `study.runs` independent runs.
///
/// `config.seed` is ignored; run seeds come from `study.seed`.  Fails on the
/// first run that fails.
pub fn peak_study<T: Topology>(
    topology: &T,
    params:   DeffuantParams,
    config:   &SimConfig,
    study:    &StudyConfig,
) -> AnalysisResult<Vec<usize>> {
    let mut root = SimRng::new(study.seed);
    run_study(topology, params, config, study, &mut root)
}

/// One [`peak_study`] per threshold in `thresholds`, all other parameters
/// equal.  Returns one sample per threshold, in order.
pub fn peak_sweep<T: Topology>(
    topology:   &T,
    params:     DeffuantParams,
    thresholds: &[f64],
    config:     &SimConfig,
    study:      &StudyConfig,
) -> AnalysisResult<Vec<Vec<usize>>> {
    let mut root = SimRng::new(study.seed);
    thresholds
        .iter()
        .enumerate()
        .map(|(k, &d)| {
            let mut rng = root.child(k as u64);
            run_study(topology, params.with_threshold(d), config, study, &mut rng)
        })
        .collect()
}

fn run_study<T: Topology>(
    topology: &T,
    params:   DeffuantParams,
    config:   &SimConfig,
    study:    &StudyConfig,
    root:     &mut SimRng,
) -> AnalysisResult<Vec<usize>> {
    info!(
        topology = topology.name(),
        threshold = params.threshold,
        rate = params.rate,
        runs = study.runs,
        "peak study started"
    );
    let sim = Simulator::new(topology, params, config.clone());
    let rngs: Vec<SimRng> = (0..study.runs).map(|i| root.child(i as u64)).collect();

    let run_one = |(run, mut rng): (usize, SimRng)| -> AnalysisResult<usize> {
        let history = sim.run_with(&mut rng, &mut NoopObserver)?;
        let peaks = peak_count(history.last(), study.ndigits);
        debug!(run, peaks, steps = history.len(), "study run finished");
        Ok(peaks)
    };

    #[cfg(not(feature = "parallel"))]
    let counts: AnalysisResult<Vec<usize>> = rngs.into_iter().enumerate().map(run_one).collect();

    #[cfg(feature = "parallel")]
    let counts: AnalysisResult<Vec<usize>> = {
        use rayon::prelude::*;
        rngs.into_par_iter().enumerate().map(run_one).collect()
    };

    let counts = counts?;
    if let Ok(summary) = summarize(&counts) {
        info!(
            threshold = params.threshold,
            mean_peaks = summary.mean,
            min = summary.min,
            max = summary.max,
            "peak study finished"
        );
    }
    Ok(counts)
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Summary of a sample of peak counts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakSummary {
    pub mean:     f64,
    /// Population variance (divisor `n`).
    pub variance: f64,
    pub min:      usize,
    pub max:      usize,
}

/// Mean, variance and range of `counts`.
pub fn summarize(counts: &[usize]) -> AnalysisResult<PeakSummary> {
    let (Some(&min), Some(&max)) = (counts.iter().min(), counts.iter().max()) else {
        return Err(AnalysisError::EmptySample);
    };
    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
    let variance = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / n;
    Ok(PeakSummary { mean, variance, min, max })
}

/// One [`PeakSummary`] per sample of a [`peak_sweep`].
pub fn summarize_sweep(samples: &[Vec<usize>]) -> AnalysisResult<Vec<PeakSummary>> {
    samples.iter().map(|s| summarize(s)).collect()
}
