//! Determinism verification tests
//!
//! Tests to ensure the road produces identical results given the same seed.

use road_core::{estimate_max_profit, RandomSource, SimRng, Simulation};

/// Places autonomous stores and returns the cells they picked.
fn autonomous_cells(seed: u64) -> Vec<usize> {
    let mut sim = Simulation::new(100).with_seed(seed);
    for _ in 0..5 {
        sim.place_site("autonomous", 0, 10).unwrap();
    }
    sim.sites().into_iter().map(|(cell, _)| cell).collect()
}

/// Test that autonomous stores land on the same cells under a seed
#[test]
fn test_autonomous_placement_determinism() {
    let first = autonomous_cells(42);
    assert_eq!(first.len(), 5, "each store needs its own cell");
    assert_eq!(first, autonomous_cells(42), "Placements should repeat with same seed");
}

/// Test that different seeds produce different sequences
#[test]
fn test_rng_different_seeds() {
    let mut rng1 = SimRng::seeded(42);
    let mut rng2 = SimRng::seeded(43);

    let values1: Vec<usize> = (0..20).map(|_| rng1.below(1000)).collect();
    let values2: Vec<usize> = (0..20).map(|_| rng2.below(1000)).collect();

    assert_ne!(values1, values2, "Different seeds should produce different sequences");
}

/// Runs a casino-heavy session and returns every store balance and the profit.
fn casino_session(seed: u64) -> (Vec<(usize, i64)>, i64) {
    let mut sim = Simulation::new(40).with_seed(seed);
    for position in [0, 10, 20, 30] {
        sim.place_agent("normal", position).unwrap();
    }
    for position in [5, 15, 25, 35] {
        sim.place_site("casino", position, 100).unwrap();
    }
    sim.place_site("autonomous", 0, 60).unwrap();
    sim.optimize_all().unwrap();
    (sim.sites(), sim.profit())
}

/// Test that casino payouts and autonomous placement repeat under a seed
#[test]
fn test_casino_session_determinism() {
    let first = casino_session(7);
    let second = casino_session(7);
    assert_eq!(first, second, "Seeded sessions should be identical");
}

/// Test that casino payouts stay within 50% to 150% of the request
#[test]
fn test_casino_payout_range() {
    for seed in 0..50 {
        let mut sim = Simulation::new(10).with_seed(seed);
        sim.place_agent("normal", 0).unwrap();
        sim.place_site("casino", 1, 100).unwrap();

        let gain = sim.move_agent(0, 1).unwrap();
        let paid = gain + 1;
        assert!((50..=150).contains(&paid), "seed {seed} paid {paid}");
        assert_eq!(sim.site_balance(1), Some(100 - paid));
    }
}

/// Test that the greedy estimate is a pure function of its input
#[test]
fn test_estimate_determinism() {
    let agents = [0, 4, 9, 17, 30];
    let sites = [(2, 15), (8, 40), (12, 3), (21, 90), (28, 60), (33, 7)];

    let first = estimate_max_profit(&agents, &sites);
    for _ in 0..100 {
        assert_eq!(estimate_max_profit(&agents, &sites), first);
    }
}
