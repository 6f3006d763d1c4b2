//! Tests for the step engines and the simulation driver.

use df_core::{ConvergencePolicy, DeffuantParams, OpinionGrid, OpinionVec, Opinions, SimRng};
use df_network::{ContactNetworkBuilder, ring};

use crate::{
    CompleteTopology, GraphTopology, LatticeEdgePolicy, LatticeTopology, NoopObserver,
    SelfPairing, SimBuilder, SimError, SimObserver, StepStats, Topology,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pair_network() -> GraphTopology {
    let mut b = ContactNetworkBuilder::new(2);
    b.add_edge(0, 1).unwrap();
    GraphTopology::new(b.build())
}

fn spread(state: &impl Opinions) -> f64 {
    let s = state.as_slice();
    let max = s.iter().cloned().fold(f64::MIN, f64::max);
    let min = s.iter().cloned().fold(f64::MAX, f64::min);
    max - min
}

// ── Step engines ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph_tests {
    use super::*;

    #[test]
    fn two_agents_meet_in_the_middle() {
        let topo = pair_network();
        let mut state = OpinionVec::new(vec![0.2, 0.8]).unwrap();
        let params = DeffuantParams::new(1.0, 0.5).with_batch_size(1);
        let stats = topo.step(&mut state, &params, &mut SimRng::new(1)).unwrap();
        assert_eq!(state.as_slice(), &[0.5, 0.5]);
        assert_eq!(stats, StepStats { attempted: 1, updated: 1 });
    }

    #[test]
    fn isolated_agent_is_a_precondition_violation() {
        // Agent 2 has no neighbours; with enough draws it is picked.
        let mut b = ContactNetworkBuilder::new(3);
        b.add_edge(0, 1).unwrap();
        let topo = GraphTopology::new(b.build());
        let mut state = OpinionVec::new(vec![0.1, 0.2, 0.3]).unwrap();
        let params = DeffuantParams::new(0.5, 0.5).with_batch_size(1_000);
        let err = topo.step(&mut state, &params, &mut SimRng::new(5)).unwrap_err();
        assert_eq!(err, SimError::IsolatedAgent { agent: 2 });
    }

    #[test]
    fn wrong_state_length_rejected() {
        let topo = pair_network();
        let mut state = OpinionVec::new(vec![0.2, 0.8, 0.5]).unwrap();
        let err = topo
            .step(&mut state, &DeffuantParams::new(1.0, 0.5), &mut SimRng::new(1))
            .unwrap_err();
        assert!(matches!(err, SimError::Core(df_core::DfError::ShapeMismatch { .. })));
    }

    #[test]
    fn ring_keeps_opinions_in_range() {
        let topo = GraphTopology::new(ring(50, 2).unwrap());
        let mut rng = SimRng::new(11);
        let mut state = topo.initial_state(&mut rng);
        let params = DeffuantParams::new(0.4, 0.5).with_batch_size(10_000);
        topo.step(&mut state, &params, &mut rng).unwrap();
        assert!(state.as_slice().iter().all(|x| (0.0..=1.0).contains(x)));
    }
}

#[cfg(test)]
mod lattice_tests {
    use super::*;
    use crate::Direction;

    #[test]
    fn directions_respect_bounds() {
        assert_eq!(Direction::Up.step(0, 1, 3), None);
        assert_eq!(Direction::Up.step(1, 1, 3), Some((0, 1)));
        assert_eq!(Direction::Down.step(2, 0, 3), None);
        assert_eq!(Direction::Down.step(1, 0, 3), Some((2, 0)));
        assert_eq!(Direction::Left.step(1, 0, 3), None);
        assert_eq!(Direction::Right.step(1, 2, 3), None);
        assert_eq!(Direction::Right.step(1, 1, 3), Some((1, 2)));
    }

    #[test]
    fn single_cell_truncates_immediately() {
        let topo = LatticeTopology::new(1);
        let mut state = OpinionGrid::new(1, vec![0.4]).unwrap();
        let params = DeffuantParams::new(1.0, 0.5);
        let stats = topo.step(&mut state, &params, &mut SimRng::new(0)).unwrap();
        assert_eq!(stats.attempted, 0);
        assert!(stats.truncated(params.batch_size));
        assert_eq!(state[(0, 0)], 0.4);
    }

    #[test]
    fn single_cell_redraw_has_no_partner() {
        let topo = LatticeTopology::new(1).with_edge_policy(LatticeEdgePolicy::Redraw);
        let mut state = OpinionGrid::new(1, vec![0.4]).unwrap();
        let err = topo
            .step(&mut state, &DeffuantParams::new(1.0, 0.5), &mut SimRng::new(0))
            .unwrap_err();
        assert_eq!(err, SimError::IsolatedAgent { agent: 0 });
    }

    #[test]
    fn redraw_runs_full_batch() {
        let topo = LatticeTopology::new(3).with_edge_policy(LatticeEdgePolicy::Redraw);
        let mut rng = SimRng::new(2);
        let mut state = topo.initial_state(&mut rng);
        let params = DeffuantParams::new(0.3, 0.5).with_batch_size(5_000);
        let stats = topo.step(&mut state, &params, &mut rng).unwrap();
        assert_eq!(stats.attempted, 5_000);
    }

    #[test]
    fn truncate_stops_early_on_small_grid() {
        // On a 2×2 grid every cell has two off-grid directions, so a batch of
        // 5 000 is all but certain to hit one.
        let topo = LatticeTopology::new(2);
        let mut rng = SimRng::new(2);
        let mut state = topo.initial_state(&mut rng);
        let params = DeffuantParams::new(0.3, 0.5).with_batch_size(5_000);
        let stats = topo.step(&mut state, &params, &mut rng).unwrap();
        assert!(stats.attempted < 5_000);
    }

    #[test]
    fn grid_side_mismatch_rejected() {
        let topo = LatticeTopology::new(3);
        let mut state = OpinionGrid::new(2, vec![0.5; 4]).unwrap();
        assert!(topo
            .step(&mut state, &DeffuantParams::new(1.0, 0.5), &mut SimRng::new(0))
            .is_err());
    }

    #[test]
    fn grid_mixes_to_consensus() {
        // The two column-0 cells are exactly 1 apart and never talk directly;
        // they converge through the 0.5 cells in column 1.
        let topo = LatticeTopology::new(2).with_edge_policy(LatticeEdgePolicy::Redraw);
        let mut state = OpinionGrid::new(2, vec![0.0, 0.5, 1.0, 0.5]).unwrap();
        let params = DeffuantParams::new(1.0, 0.5).with_batch_size(2_000);
        topo.step(&mut state, &params, &mut SimRng::new(4)).unwrap();
        assert!(spread(&state) < 1e-6);
        assert!(state.as_slice().iter().all(|x| (0.0..=1.0).contains(x)));
    }
}

#[cfg(test)]
mod complete_tests {
    use super::*;

    #[test]
    fn excluded_self_pairs_always_pick_another_agent() {
        let topo = CompleteTopology::new(2).with_self_pairing(SelfPairing::Exclude);
        let mut state = OpinionVec::new(vec![0.2, 0.8]).unwrap();
        let params = DeffuantParams::new(1.0, 0.5).with_batch_size(1);
        let stats = topo.step(&mut state, &params, &mut SimRng::new(9)).unwrap();
        assert_eq!(stats.updated, 1);
        assert_eq!(state.as_slice(), &[0.5, 0.5]);
    }

    #[test]
    fn single_agent_cannot_exclude_itself() {
        let topo = CompleteTopology::new(1).with_self_pairing(SelfPairing::Exclude);
        let mut state = OpinionVec::new(vec![0.2]).unwrap();
        let err = topo
            .step(&mut state, &DeffuantParams::new(1.0, 0.5), &mut SimRng::new(0))
            .unwrap_err();
        assert_eq!(err, SimError::IsolatedAgent { agent: 0 });
    }

    #[test]
    fn single_agent_self_pairs_are_noops() {
        let topo = CompleteTopology::new(1);
        let mut state = OpinionVec::new(vec![0.2]).unwrap();
        let stats = topo
            .step(&mut state, &DeffuantParams::new(1.0, 0.5), &mut SimRng::new(0))
            .unwrap();
        assert_eq!(stats, StepStats { attempted: 100, updated: 0 });
        assert_eq!(state[0], 0.2);
    }

    #[test]
    fn empty_population_errors() {
        let topo = CompleteTopology::new(0);
        let mut state = OpinionVec::new(vec![]).unwrap();
        assert_eq!(
            topo.step(&mut state, &DeffuantParams::new(1.0, 0.5), &mut SimRng::new(0)),
            Err(SimError::EmptyPopulation)
        );
    }

    #[test]
    fn full_confidence_reaches_consensus() {
        let topo = CompleteTopology::new(10);
        let mut rng = SimRng::new(21);
        let mut state = topo.initial_state(&mut rng);
        let params = DeffuantParams::new(1.0, 0.5).with_batch_size(10_000);
        topo.step(&mut state, &params, &mut rng).unwrap();
        assert!(spread(&state) < 1e-6);
    }
}

// ── Convergence test ──────────────────────────────────────────────────────────

#[cfg(test)]
mod compare_tests {
    use super::*;
    use crate::compare;

    #[test]
    fn reflexive() {
        let state = CompleteTopology::new(100).initial_state(&mut SimRng::new(3));
        for k in 0..6 {
            assert!(compare(&state, &state, k).unwrap());
        }
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let a = OpinionVec::new(vec![0.1, 0.2]).unwrap();
        let b = OpinionVec::new(vec![0.1]).unwrap();
        assert!(compare(&a, &b, 2).is_err());
    }

    #[test]
    fn grids_compare_elementwise() {
        let a = OpinionGrid::new(2, vec![0.111, 0.2, 0.3, 0.4]).unwrap();
        let b = OpinionGrid::new(2, vec![0.112, 0.2, 0.3, 0.4]).unwrap();
        assert!(compare(&a, &b, 2).unwrap());
        assert!(!compare(&a, &b, 3).unwrap());
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use super::*;
    use crate::simulate;
    use df_core::SimConfig;

    #[test]
    fn history_has_requested_length() {
        let sim = SimBuilder::new(CompleteTopology::new(20), DeffuantParams::new(0.3, 0.5))
            .steps(15)
            .seed(1)
            .build()
            .unwrap();
        let history = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(history.len(), 15);
        assert!(history.convergence().is_none());
    }

    #[test]
    fn zero_steps_still_records_initial_condition() {
        let history =
            simulate(CompleteTopology::new(5), DeffuantParams::new(0.3, 0.5), SimConfig::new(0, 1))
                .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn zero_threshold_freezes_every_topology() {
        let params = DeffuantParams::new(0.0, 0.5);
        let h = simulate(CompleteTopology::new(30), params, SimConfig::new(20, 4)).unwrap();
        assert_eq!(h.first(), h.last());

        let h = simulate(LatticeTopology::new(5), params, SimConfig::new(20, 4)).unwrap();
        assert_eq!(h.first(), h.last());

        let h = simulate(GraphTopology::new(ring(30, 1).unwrap()), params, SimConfig::new(20, 4))
            .unwrap();
        assert_eq!(h.first(), h.last());
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let h = simulate(CompleteTopology::new(30), DeffuantParams::new(1.0, 0.5), SimConfig::new(3, 8))
            .unwrap();
        assert_ne!(h[0], h[1]);
        assert_ne!(h[1], h[2]);
        assert!(spread(&h[0]) > spread(&h[2]));
    }

    #[test]
    fn same_seed_same_history() {
        let run = || {
            simulate(LatticeTopology::new(6), DeffuantParams::new(0.4, 0.3), SimConfig::new(10, 77))
                .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn step_failure_aborts_run() {
        let mut b = ContactNetworkBuilder::new(3);
        b.add_edge(0, 1).unwrap();
        let result = simulate(
            GraphTopology::new(b.build()),
            DeffuantParams::new(0.3, 0.5),
            SimConfig::new(50, 2),
        );
        assert_eq!(result, Err(SimError::IsolatedAgent { agent: 2 }));
    }

    #[test]
    fn frozen_run_converges_on_first_check() {
        let sim = SimBuilder::new(CompleteTopology::new(10), DeffuantParams::new(0.0, 0.5))
            .steps(5)
            .convergence(ConvergencePolicy { interval: 3, max_checks: 4, ndigits: 2 })
            .build()
            .unwrap();
        let h = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(h.len(), 5);
        let report = h.convergence().unwrap();
        assert!(report.converged);
        assert_eq!(report.checks, 0);
    }

    #[test]
    fn unsettled_run_exhausts_check_budget() {
        // One interaction per step between two distinct, far-apart agents:
        // the newest snapshot always differs at 12 digits from the previous.
        let topo = CompleteTopology::new(100).with_self_pairing(SelfPairing::Exclude);
        let sim = SimBuilder::new(topo, DeffuantParams::new(1.0, 0.5).with_batch_size(1))
            .steps(4)
            .seed(3)
            .convergence(ConvergencePolicy { interval: 1, max_checks: 3, ndigits: 12 })
            .build()
            .unwrap();
        let h = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(h.len(), 4 + 3);
        let report = h.convergence().unwrap();
        assert!(!report.converged);
        assert_eq!(report.checks, 3);
    }

    #[test]
    fn consensus_run_converges_after_retries() {
        let sim = SimBuilder::new(CompleteTopology::new(10), DeffuantParams::new(1.0, 0.5))
            .steps(2)
            .seed(5)
            .convergence(ConvergencePolicy { interval: 20, max_checks: 10, ndigits: 2 })
            .build()
            .unwrap();
        let h = sim.run(&mut NoopObserver).unwrap();
        let report = h.convergence().unwrap();
        assert!(report.converged);
        assert!(report.checks >= 1);
        assert_eq!(h.len(), 2 + report.checks * 20);
    }

    #[test]
    fn zero_interval_rejected() {
        let result = SimBuilder::new(CompleteTopology::new(10), DeffuantParams::new(1.0, 0.5))
            .convergence(ConvergencePolicy { interval: 0, max_checks: 1, ndigits: 2 })
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_interval_rejected_without_builder() {
        let topo = CompleteTopology::new(100).with_self_pairing(SelfPairing::Exclude);
        let params = DeffuantParams::new(1.0, 0.5).with_batch_size(1);
        let config = SimConfig::new(3, 1).with_convergence(ConvergencePolicy {
            interval:   0,
            max_checks: 5,
            ndigits:    12,
        });

        let result = simulate(&topo, params, config.clone());
        assert!(matches!(result, Err(SimError::Config(_))));

        let sim = crate::Simulator::new(&topo, params, config);
        let result = sim.run_with(&mut SimRng::new(1), &mut NoopObserver);
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    /// Observer that counts hooks.
    #[derive(Default)]
    struct Counter {
        start:   Option<usize>,
        steps:   usize,
        extends: usize,
        checks:  usize,
        end:     Option<usize>,
    }
    impl SimObserver for Counter {
        fn on_run_start(&mut self, steps: usize) { self.start = Some(steps); }
        fn on_step_end(&mut self, _s: usize, _st: &StepStats) { self.steps += 1; }
        fn on_extend(&mut self, _n: usize) { self.extends += 1; }
        fn on_convergence_check(&mut self, _c: usize, _ok: bool) { self.checks += 1; }
        fn on_run_end(&mut self, len: usize) { self.end = Some(len); }
    }

    #[test]
    fn observer_sees_every_step() {
        let topo = CompleteTopology::new(100).with_self_pairing(SelfPairing::Exclude);
        let sim = SimBuilder::new(topo, DeffuantParams::new(1.0, 0.5).with_batch_size(1))
            .steps(6)
            .convergence(ConvergencePolicy { interval: 2, max_checks: 2, ndigits: 12 })
            .build()
            .unwrap();
        let mut obs = Counter::default();
        let h = sim.run(&mut obs).unwrap();
        assert_eq!(obs.start, Some(6));
        assert_eq!(obs.steps, h.len() - 1);
        assert_eq!(obs.extends, 2);
        assert_eq!(obs.checks, 3);
        assert_eq!(obs.end, Some(h.len()));
    }
}
