//! deffuant — command-line front end for the Deffuant simulator.
//!
//! ```text
//! deffuant run   --topology lattice -n 30 -d 0.25 -t 2000 --converge
//! deffuant sweep --topology ring -n 400 --thresholds 0.1,0.2,0.3 --runs 20
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG` (default `info`).

mod cli;
mod progress;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use df_analysis::{
    StudyConfig, detect_peaks, peak_sweep, snapshot_mean, snapshot_variance, summarize_sweep,
};
use df_core::{ConvergencePolicy, DeffuantParams, SimConfig, SimRng};
use df_network::{ContactNetwork, erdos_renyi, ring};
use df_sim::{
    CompleteTopology, GraphTopology, LatticeTopology, SelfPairing, SimBuilder, Topology,
};

use cli::{Cli, Commands, ModelArgs, RunArgs, SweepArgs, TopologyKind};
use progress::ProgressObserver;

/// Offset applied to the run seed when generating a random network, so the
/// network and the opinion draws use unrelated streams.
const NETWORK_SEED_OFFSET: u64 = 0x6e65_7477_6f72_6b;

// ── Topology dispatch ─────────────────────────────────────────────────────────

/// Build the topology selected on the command line, bind it to `$topo` and
/// evaluate `$body`.  Each arm has a different `Topology` type, hence a macro.
macro_rules! with_topology {
    ($model:expr, $topo:ident => $body:expr) => {{
        let model: &ModelArgs = $model;
        match model.topology {
            TopologyKind::Complete => {
                let pairing = if model.exclude_self { SelfPairing::Exclude } else { SelfPairing::Allow };
                let $topo = CompleteTopology::new(model.agents).with_self_pairing(pairing);
                $body
            }
            TopologyKind::Lattice => {
                let $topo = LatticeTopology::new(model.agents).with_edge_policy(model.edge_mode.into());
                $body
            }
            TopologyKind::Ring | TopologyKind::ErdosRenyi => {
                let $topo = GraphTopology::new(build_network(model)?);
                $body
            }
        }
    }};
}

fn build_network(model: &ModelArgs) -> Result<ContactNetwork> {
    let net = match model.topology {
        TopologyKind::Ring => ring(model.agents, model.ring_k)?,
        _ => {
            let mut rng = SimRng::new(model.seed).child(NETWORK_SEED_OFFSET);
            erdos_renyi(model.agents, model.edge_prob, &mut rng)?
        }
    };
    let isolated = net.isolated().count();
    if isolated > 0 {
        warn!(isolated, "network has isolated agents; the run fails if one is drawn");
    }
    info!(order = net.order(), edges = net.edge_count(), "contact network ready");
    Ok(net)
}

// ── run ───────────────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> Result<()> {
    let params = args.model.params(args.threshold);
    params.validate()?;
    with_topology!(&args.model, topo => run_on(topo, &args, params))
}

fn run_on<T: Topology>(topology: T, args: &RunArgs, params: DeffuantParams) -> Result<()> {
    let model = &args.model;
    let mut builder = SimBuilder::new(topology, params).steps(model.steps).seed(model.seed);
    if let Some(policy) = model.convergence() {
        builder = builder.convergence(policy);
    }
    let sim = builder.build()?;

    println!(
        "{} topology, {} agents, d = {}, mu = {}, {} interactions/step",
        sim.topology.name(),
        sim.topology.agent_count(),
        params.threshold,
        params.rate,
        params.batch_size,
    );

    let t0 = Instant::now();
    let history = sim.run(&mut ProgressObserver::new(args.quiet))?;
    let elapsed = t0.elapsed();

    println!("Simulation complete in {:.3} s, {} snapshots", elapsed.as_secs_f64(), history.len());
    if let Some(report) = history.convergence() {
        println!(
            "  convergence : {} after {} extra round(s)",
            if report.converged { "reached" } else { "NOT reached" },
            report.checks,
        );
    }

    let (first, last) = (history.first(), history.last());
    println!();
    println!("{:<10} {:>10} {:>12}", "", "mean", "variance");
    println!("{}", "-".repeat(34));
    for (label, snap) in [("initial", first), ("final", last)] {
        println!(
            "{:<10} {:>10.4} {:>12.6}",
            label,
            snapshot_mean(snap).unwrap_or(f64::NAN),
            snapshot_variance(snap).unwrap_or(f64::NAN),
        );
    }

    let mut peaks = detect_peaks(last, model.ndigits);
    peaks.sort_by(f64::total_cmp);
    println!();
    println!("{} peak(s) at {} digits:", peaks.len(), model.ndigits);
    for p in peaks.iter().take(20) {
        println!("  {p}");
    }
    if peaks.len() > 20 {
        println!("  … {} more", peaks.len() - 20);
    }
    Ok(())
}

// ── sweep ─────────────────────────────────────────────────────────────────────

/// Optional JSON overrides for `sweep`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SweepFile {
    thresholds:  Option<Vec<f64>>,
    study:       Option<StudyConfig>,
    convergence: Option<ConvergencePolicy>,
}

fn load_sweep_file(path: &Path) -> Result<SweepFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn sweep(args: SweepArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => load_sweep_file(path)?,
        None => SweepFile::default(),
    };
    let thresholds = file.thresholds.unwrap_or_else(|| args.thresholds.clone());
    if thresholds.is_empty() {
        bail!("no thresholds to sweep");
    }
    for &d in &thresholds {
        args.model.params(d).validate()?;
    }
    let study = file.study.unwrap_or(StudyConfig {
        runs:    args.runs,
        ndigits: args.model.ndigits,
        seed:    args.model.seed,
    });
    let mut config = SimConfig::new(args.model.steps, args.model.seed);
    config.convergence = file.convergence.or_else(|| args.model.convergence());

    with_topology!(&args.model, topo => sweep_on(topo, &args.model, &thresholds, &config, &study))
}

fn sweep_on<T: Topology>(
    topology:   T,
    model:      &ModelArgs,
    thresholds: &[f64],
    config:     &SimConfig,
    study:      &StudyConfig,
) -> Result<()> {
    println!(
        "{} topology, {} agents, mu = {}, {} runs per threshold, {} steps",
        topology.name(),
        topology.agent_count(),
        model.rate,
        study.runs,
        config.steps,
    );

    let t0 = Instant::now();
    let samples = peak_sweep(&topology, model.params(0.0), thresholds, config, study)?;
    let summaries = summarize_sweep(&samples)?;
    println!("Sweep complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!();

    println!("{:<10} {:>10} {:>10} {:>6} {:>6}", "d", "mean", "variance", "min", "max");
    println!("{}", "-".repeat(46));
    for (d, s) in thresholds.iter().zip(&summaries) {
        println!(
            "{:<10} {:>10.3} {:>10.3} {:>6} {:>6}",
            d, s.mean, s.variance, s.min, s.max
        );
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Sweep(args) => sweep(args),
    }
}
