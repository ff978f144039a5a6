//! Simulation Engine
//!
//! Owns the road, the profit ledger and the optional day schedule, and
//! exposes every command. Commands either complete or fail with a
//! [`RoadError`] and leave the road as it was.

mod day;
mod motion;
mod placement;
mod reports;
mod visibility;

pub use reports::EMPTY_SITE_COLOR;

use road_events::{EntityRef, MessageLevel, RoadNotice, Schedule};
use tracing::{debug, warn};

use crate::components::{Agent, Grid, Site};
use crate::config::{RoadConfig, DEFAULT_SEED};
use crate::error::RoadError;
use crate::events::{NullSink, RenderSink};
use crate::rng::{RandomSource, SimRng};

/// A silk road and everything on it
pub struct Simulation {
    grid: Grid,
    profit: i64,
    profit_ceiling: i64,
    /// Cumulative gain per cell
    cell_gains: Vec<i64>,
    schedule: Option<Schedule>,
    /// Days applied from the schedule
    day: usize,
    visible: bool,
    fast_movement: bool,
    finished: bool,
    /// Set while `optimize_all` runs so single moves keep its ceiling
    bulk_moving: bool,
    last_ok: bool,
    last_message: Option<String>,
    rng: Box<dyn RandomSource>,
    sink: Box<dyn RenderSink>,
    next_agent: u64,
    next_site: u64,
    next_snapshot: u64,
}

impl Simulation {
    /// An empty road with cells `0..=length`, visible, slow movement.
    pub fn new(length: usize) -> Self {
        Self {
            grid: Grid::new(length),
            profit: 0,
            profit_ceiling: 0,
            cell_gains: vec![0; length + 1],
            schedule: None,
            day: 0,
            visible: true,
            fast_movement: false,
            finished: false,
            bulk_moving: false,
            last_ok: true,
            last_message: None,
            rng: Box::new(SimRng::seeded(DEFAULT_SEED)),
            sink: Box::new(NullSink),
            next_agent: 0,
            next_site: 0,
            next_snapshot: 0,
        }
    }

    /// A day-driven road long enough for every scheduled event.
    /// Nothing is placed until the first [`Simulation::advance_day`].
    pub fn from_schedule(schedule: Schedule) -> Self {
        let mut simulation = Self::new(schedule.road_length());
        simulation.schedule = Some(schedule);
        simulation
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(SimRng::seeded(seed))
    }

    pub fn with_sink(mut self, sink: impl RenderSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Applies seed, visibility and movement speed from a config.
    pub fn with_config(mut self, config: &RoadConfig) -> Self {
        self.visible = config.simulation.visible;
        self.fast_movement = config.simulation.fast_movement;
        self.with_seed(config.simulation.seed)
    }

    // --- Queries ---

    pub fn profit(&self) -> i64 {
        self.profit
    }

    pub fn profit_ceiling(&self) -> i64 {
        self.profit_ceiling
    }

    /// Highest valid cell index.
    pub fn length(&self) -> usize {
        self.grid.length()
    }

    pub fn last_operation_ok(&self) -> bool {
        self.last_ok
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn agent_at(&self, position: usize) -> Option<&Agent> {
        self.grid.agent(position)
    }

    pub fn site_at(&self, position: usize) -> Option<&Site> {
        self.grid.site(position)
    }

    pub fn site_balance(&self, position: usize) -> Option<i64> {
        self.grid.site(position).map(|s| s.tenges)
    }

    /// `(cell, tenges)` of every robot, ascending.
    pub fn agents(&self) -> Vec<(usize, i64)> {
        self.grid.agents().map(|a| (a.position, a.tenges)).collect()
    }

    /// `(cell, tenges)` of every store, ascending.
    pub fn sites(&self) -> Vec<(usize, i64)> {
        self.grid.sites().map(|s| (s.position, s.tenges)).collect()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_fast_movement(&self) -> bool {
        self.fast_movement
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Days applied so far, `None` outside day-driven mode.
    pub fn day(&self) -> Option<usize> {
        self.schedule.as_ref().map(|_| self.day)
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn set_fast_movement(&mut self, fast: bool) {
        self.fast_movement = fast;
    }

    // --- Internals shared by the command modules ---

    fn ensure_running(&self) -> Result<(), RoadError> {
        if self.finished {
            Err(RoadError::Finished)
        } else {
            Ok(())
        }
    }

    /// Records the outcome of a public command.
    fn record<T>(&mut self, result: Result<T, RoadError>) -> Result<T, RoadError> {
        match &result {
            Ok(_) => self.last_ok = true,
            Err(err) => {
                warn!(error = %err, "command rejected");
                self.last_ok = false;
                self.message(MessageLevel::Error, err.title(), err.to_string());
            }
        }
        result
    }

    /// Sends a notice unless the road is invisible.
    fn notify(&mut self, notice: RoadNotice) {
        if self.visible {
            self.sink.emit(notice);
        }
    }

    fn message(&mut self, level: MessageLevel, title: &str, body: impl Into<String>) {
        let body = body.into();
        self.last_message = Some(body.clone());
        self.notify(RoadNotice::Message {
            level,
            title: title.to_string(),
            body,
        });
    }

    fn report_progress(&mut self) {
        let notice = RoadNotice::Progress {
            profit: self.profit,
            ceiling: self.profit_ceiling.max(1),
        };
        self.notify(notice);
    }

    /// Ceiling from what is still on the road plus what was already earned.
    fn refresh_ceiling(&mut self) {
        let on_road = self
            .grid
            .sites()
            .fold(0i64, |sum, s| sum.saturating_add(s.tenges));
        let travelled = self
            .grid
            .agents()
            .fold(0i64, |sum, a| sum.saturating_add(a.displacement() as i64));
        self.profit_ceiling = on_road
            .saturating_sub(travelled)
            .saturating_add(self.profit)
            .max(1);
        debug!(ceiling = self.profit_ceiling, "profit ceiling refreshed");
    }

    /// Instant placement notices for a robot or store.
    fn show_at(&mut self, entity: EntityRef, cell: usize) {
        self.notify(RoadNotice::Reposition {
            entity: entity.clone(),
            cell,
        });
        self.notify(RoadNotice::Show { entity });
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("length", &self.grid.length())
            .field("profit", &self.profit)
            .field("profit_ceiling", &self.profit_ceiling)
            .field("agents", &self.grid.agent_count())
            .field("sites", &self.grid.site_count())
            .field("day", &self.day())
            .field("visible", &self.visible)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use road_events::fixtures;

    #[test]
    fn test_new_simulation() {
        let sim = Simulation::new(20);
        assert_eq!(sim.length(), 20);
        assert_eq!(sim.profit(), 0);
        assert!(sim.is_visible());
        assert!(!sim.is_fast_movement());
        assert!(!sim.is_finished());
        assert!(sim.last_operation_ok());
        assert_eq!(sim.day(), None);
    }

    #[test]
    fn test_from_schedule_sizes_road() {
        let sim = Simulation::from_schedule(fixtures::complex_schedule());
        assert_eq!(sim.length(), 20);
        assert_eq!(sim.day(), Some(0));
        assert!(sim.agents().is_empty());

        let sim = Simulation::from_schedule(Schedule::default());
        assert_eq!(sim.length(), 1);
    }

    #[test]
    fn test_with_config() {
        let mut config = RoadConfig::default();
        config.simulation.visible = false;
        config.simulation.fast_movement = true;
        let sim = Simulation::new(5).with_config(&config);
        assert!(!sim.is_visible());
        assert!(sim.is_fast_movement());
    }

    #[test]
    fn test_errors_become_messages() {
        let sink = RecordingSink::new();
        let mut sim = Simulation::new(10).with_sink(sink.clone());
        assert!(sim.place_agent("normal", 11).is_err());
        assert!(!sim.last_operation_ok());
        assert!(sim.last_message().unwrap().contains("invalid cell index 11"));
        assert_eq!(sink.messages().len(), 1);

        sim.place_agent("normal", 3).unwrap();
        assert!(sim.last_operation_ok());
    }
}
