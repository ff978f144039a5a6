//! Robot movement: single moves, bulk optimization and returning home.

use road_events::{EntityRef, MessageLevel, RoadNotice};
use tracing::{debug, info, warn};

use super::Simulation;
use crate::components::AgentCapability;
use crate::error::RoadError;
use crate::systems::movement::{validate_move, MovePlan};
use crate::systems::optimizer::{estimate_max_profit, GreedyAssignment};
use crate::systems::transfer::{mediate, TransferOutcome};

impl Simulation {
    /// Moves the robot at `position` by `meters` cells and collects from a
    /// store at the destination. Returns the net gain of the move.
    pub fn move_agent(&mut self, position: i64, meters: i64) -> Result<i64, RoadError> {
        let result = self.try_move_agent(position, meters);
        self.record(result)
    }

    /// Sends robots to stores following the greedy assignment and returns
    /// the profit it added. Moves that fail are logged and skipped.
    pub fn optimize_all(&mut self) -> Result<i64, RoadError> {
        let result = self.try_optimize_all();
        self.record(result)
    }

    /// Sends every robot back to the cell it was placed on, keeping its
    /// tenges. Returns how many robots moved.
    pub fn return_agents(&mut self) -> Result<usize, RoadError> {
        let result = self.try_return_agents();
        self.record(result)
    }

    fn try_move_agent(&mut self, position: i64, meters: i64) -> Result<i64, RoadError> {
        self.ensure_running()?;
        let plan = validate_move(&mut self.grid, position, meters)?;
        self.execute_move(plan)
    }

    fn execute_move(&mut self, plan: MovePlan) -> Result<i64, RoadError> {
        let agent = self
            .grid
            .take_agent(plan.from)
            .ok_or(RoadError::NoAgentAtSource {
                position: plan.from,
            })?;
        self.grid.put_agent(agent, plan.to);

        let outcome = match self.grid.pair_mut(plan.to) {
            Some((agent, site)) => mediate(
                &agent.variant,
                plan.balance,
                &site.variant,
                &mut site.tenges,
                self.rng.as_mut(),
            ),
            None => TransferOutcome::Nothing,
        };
        let collected = outcome.collected();

        let Some(agent) = self.grid.agent_mut(plan.to) else {
            return Err(RoadError::NoAgentAtSource { position: plan.to });
        };
        let gain = agent.variant.net_gain(collected, plan.distance());
        agent.tenges = plan.balance.saturating_add(gain);
        agent.variant.reset_state();
        agent.variant.lock_direction(plan.meters);
        let entity = EntityRef::agent(agent.id.0.clone());

        self.profit = self.profit.saturating_add(gain);
        self.cell_gains[plan.to] = self.cell_gains[plan.to].saturating_add(gain);
        debug!(
            from = plan.from,
            to = plan.to,
            collected,
            gain,
            profit = self.profit,
            "robot moved"
        );

        let notice = if self.fast_movement {
            RoadNotice::Reposition {
                entity,
                cell: plan.to,
            }
        } else {
            RoadNotice::Walk {
                entity,
                from: plan.from,
                to: plan.to,
            }
        };
        self.notify(notice);

        if !self.bulk_moving {
            self.refresh_ceiling();
        }
        self.report_progress();
        Ok(gain)
    }

    fn try_optimize_all(&mut self) -> Result<i64, RoadError> {
        self.ensure_running()?;
        let agents = self.grid.agent_positions();
        let sites = self.grid.active_sites();

        if agents.is_empty() || sites.is_empty() {
            self.profit_ceiling = 0;
            self.report_progress();
            self.message(
                MessageLevel::Info,
                "No moves possible",
                "There are no stores or robots available to move.",
            );
            return Ok(0);
        }

        let estimate = estimate_max_profit(&agents, &sites);
        self.profit_ceiling = estimate;
        self.report_progress();
        info!(
            agents = agents.len(),
            sites = sites.len(),
            estimate,
            "optimizing robot moves"
        );

        let start = self.profit;
        let mut greedy = GreedyAssignment::new(&agents);
        self.bulk_moving = true;
        for (site, _) in sites {
            let balance = self.site_balance(site).unwrap_or(0);
            let Some(assignment) = greedy.assign(site, balance) else {
                continue;
            };
            if let Err(err) = self.move_agent(assignment.from as i64, assignment.meters()) {
                warn!(
                    from = assignment.from,
                    site,
                    error = %err,
                    "optimal move skipped"
                );
            }
        }
        self.bulk_moving = false;

        let gained = self.profit.saturating_sub(start);
        self.report_progress();
        info!(gained, profit = self.profit, "optimization finished");
        Ok(gained)
    }

    fn try_return_agents(&mut self) -> Result<usize, RoadError> {
        self.ensure_running()?;
        let moved = self.return_home();
        let stranded = self.grid.agents().any(|a| !a.is_home());
        if !stranded && moved == 0 {
            self.message(
                MessageLevel::Info,
                "Nothing to return",
                "Every robot is already at its starting cell.",
            );
        } else if !stranded {
            self.message(
                MessageLevel::Info,
                "Robots returned",
                format!("{} robot(s) went back to their starting cells.", moved),
            );
        }
        self.refresh_ceiling();
        self.report_progress();
        Ok(moved)
    }

    /// Moves robots to their origins, clearing variant state on every robot.
    /// A robot whose origin is taken waits for the others; if it is still
    /// blocked once nobody else can move it stays where it is.
    pub(super) fn return_home(&mut self) -> usize {
        for agent in self.grid.agents_mut() {
            agent.variant.reset_state();
        }

        let mut pending: Vec<usize> = self
            .grid
            .agents()
            .filter(|a| !a.is_home())
            .map(|a| a.position)
            .collect();
        let mut moved = 0;

        while !pending.is_empty() {
            let attempted = pending.len();
            let mut blocked = Vec::new();
            for position in std::mem::take(&mut pending) {
                let Some(home) = self.grid.agent(position).map(|a| a.home()) else {
                    continue;
                };
                if self.grid.agent(home).is_some() {
                    blocked.push(position);
                    continue;
                }
                if let Some(agent) = self.grid.take_agent(position) {
                    let entity = EntityRef::agent(agent.id.0.clone());
                    self.grid.put_agent(agent, home);
                    self.notify(RoadNotice::Reposition { entity, cell: home });
                    moved += 1;
                }
            }
            if blocked.len() == attempted {
                pending = blocked;
                break;
            }
            pending = blocked;
        }

        for position in pending {
            let Some(agent) = self.grid.agent(position) else {
                continue;
            };
            let body = format!(
                "Robot {} could not return to cell {}: another robot is there.",
                agent.id,
                agent.home()
            );
            warn!(agent = %agent.id, position, "robot could not return home");
            self.message(MessageLevel::Warning, "Return blocked", body);
        }
        moved
    }
}
