//! Day advance, reboot and the terminal finish.

use road_events::{EntityRef, MessageLevel, RoadNotice, ScheduleEvent};
use tracing::{info, warn};

use super::Simulation;
use crate::components::AgentCapability;
use crate::error::RoadError;

impl Simulation {
    /// Restores every store, returns every robot with zero tenges and
    /// clears the profit. In day-driven mode the next scheduled event is
    /// then applied and returned; once the schedule is exhausted the
    /// simulation finishes instead.
    pub fn advance_day(&mut self) -> Result<Option<ScheduleEvent>, RoadError> {
        let result = self.try_advance_day();
        self.record(result)
    }

    /// Hides and clears everything. Every later command fails with
    /// [`RoadError::Finished`].
    pub fn finish(&mut self) -> Result<(), RoadError> {
        let result = self.ensure_running().map(|_| self.shut_down());
        self.record(result)
    }

    fn try_advance_day(&mut self) -> Result<Option<ScheduleEvent>, RoadError> {
        self.ensure_running()?;
        self.reboot();

        if self.schedule.is_none() {
            self.message(
                MessageLevel::Info,
                "Reboot complete",
                "Stores were restored, robots returned and tenges reset.",
            );
            self.refresh_ceiling();
            self.report_progress();
            return Ok(None);
        }

        let next_day = self.day + 1;
        let next_event = self
            .schedule
            .as_ref()
            .and_then(|s| s.event_for_day(next_day).copied());
        let Some(event) = next_event else {
            info!(days = self.day, "schedule exhausted");
            self.message(
                MessageLevel::Info,
                "End of schedule",
                "Every scheduled object has been placed. The simulation is over.",
            );
            self.shut_down();
            return Ok(None);
        };
        self.day = next_day;

        let placed = match event {
            ScheduleEvent::Agent { position } => self
                .try_place_agent("normal", position as i64)
                .map(|_| format!("Day {}: a robot was placed at cell {}", next_day, position)),
            ScheduleEvent::Site { position, balance } => self
                .try_place_site("normal", position as i64, balance)
                .map(|_| {
                    format!(
                        "Day {}: a store with {} tenges was placed at cell {}",
                        next_day, balance, position
                    )
                }),
        };
        match placed {
            Ok(body) => {
                info!(day = next_day, ?event, "day advanced");
                self.message(MessageLevel::Info, "Daily event", body);
            }
            Err(err) => {
                warn!(day = next_day, ?event, error = %err, "scheduled event not applied");
                self.message(MessageLevel::Warning, err.title(), err.to_string());
            }
        }

        self.refresh_ceiling();
        self.report_progress();
        Ok(Some(event))
    }

    /// Stores back to their original balance, robots home with nothing.
    fn reboot(&mut self) {
        for site in self.grid.sites_mut() {
            site.restore();
        }
        self.return_home();
        for agent in self.grid.agents_mut() {
            agent.tenges = 0;
            agent.variant.reset_state();
        }
        self.profit = 0;
    }

    fn shut_down(&mut self) {
        if self.visible {
            self.hide_all();
        }
        self.grid.clear();
        self.profit = 0;
        self.profit_ceiling = 0;
        self.cell_gains.iter_mut().for_each(|g| *g = 0);
        self.day = 0;
        self.fast_movement = false;
        self.finished = true;
        info!("simulation finished");
    }

    /// Hide notices for every object on the road.
    pub(super) fn hide_all(&mut self) {
        let mut entities: Vec<EntityRef> = self
            .grid
            .sites()
            .map(|s| EntityRef::site(s.id.0.clone()))
            .collect();
        entities.extend(self.grid.agents().map(|a| EntityRef::agent(a.id.0.clone())));
        entities.push(EntityRef::Road);
        entities.push(EntityRef::ProgressBar);
        for entity in entities {
            self.notify(RoadNotice::Hide { entity });
        }
    }
}
