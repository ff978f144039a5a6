//! Contest Solver
//!
//! Best achievable profit per day of a schedule, and an end-to-end replay
//! of a schedule through a live simulation.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use road_events::{RoadSnapshot, Schedule, ScheduleEvent};
use tracing::{debug, info};

use super::optimizer::estimate_max_profit;
use crate::engine::Simulation;
use crate::error::RoadError;

/// What a replay produced before the simulation was finished
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Profit after optimizing with every scheduled object placed
    pub profit: i64,
    /// Road state right after the optimization
    pub snapshot: RoadSnapshot,
}

pub struct ContestSolver;

impl ContestSolver {
    /// Greedy profit for each prefix of the schedule, smoothed so the
    /// sequence never drops below its best and stays flat from the first
    /// day that reached it.
    pub fn solve(schedule: &Schedule) -> Vec<i64> {
        if schedule.is_empty() {
            return Vec::new();
        }

        let days = schedule.declared_events;
        // Past the last row every prefix is the whole schedule
        let solved = days.min(schedule.len());
        let mut profits = Vec::with_capacity(solved);
        let mut best_so_far = 0;
        let mut best_limit = 1;

        for limit in 1..=solved {
            let profit = prefix_profit(schedule.prefix(limit));
            if profit > best_so_far {
                best_so_far = profit;
                best_limit = limit;
                profits.push(profit);
            } else if profit < best_so_far {
                profits.push(best_so_far);
            } else {
                profits.push(profit);
            }
            debug!(limit, profit, best_so_far, "prefix solved");
        }

        for entry in profits.iter_mut().skip(best_limit) {
            *entry = best_so_far;
        }
        profits.resize(days, best_so_far);
        profits
    }

    /// Replays the schedule in a fresh simulation and returns the optimized
    /// profit. `slow` walks robots during the optimization.
    pub fn simulate(schedule: &Schedule, slow: bool) -> Result<i64, RoadError> {
        let mut simulation = Simulation::from_schedule(schedule.clone());
        simulation.set_fast_movement(!slow);
        Ok(Self::replay(simulation)?.profit)
    }

    /// Runs a prepared day-driven simulation: one day per declared event,
    /// then an optimization at the simulation's movement speed, then one
    /// more day, which finishes it.
    pub fn replay(mut simulation: Simulation) -> Result<ReplayOutcome, RoadError> {
        let days = simulation.schedule().map_or(0, |s| s.declared_events);
        info!(days, fast = simulation.is_fast_movement(), "replaying schedule");

        for _ in 0..days {
            if simulation.is_finished() {
                break;
            }
            simulation.advance_day()?;
        }

        let mut profit = 0;
        let mut snapshot = simulation.snapshot();
        if !simulation.is_finished() {
            simulation.optimize_all()?;
            profit = simulation.profit();
            snapshot = simulation.snapshot();
            simulation.advance_day()?;
        }

        info!(profit, "replay finished");
        Ok(ReplayOutcome { profit, snapshot })
    }
}

/// Greedy estimate for a fresh road holding only the given events.
/// A repeated robot cell holds one robot; a repeated store cell keeps the
/// last balance.
fn prefix_profit(events: &[ScheduleEvent]) -> i64 {
    let mut agents = BTreeSet::new();
    let mut sites = BTreeMap::new();
    for event in events {
        match *event {
            ScheduleEvent::Agent { position } => {
                agents.insert(position);
            }
            ScheduleEvent::Site { position, balance } => {
                sites.insert(position, balance);
            }
        }
    }

    let agents: Vec<usize> = agents.into_iter().collect();
    let sites: Vec<(usize, i64)> = sites.into_iter().filter(|&(_, b)| b > 0).collect();
    estimate_max_profit(&agents, &sites)
}
