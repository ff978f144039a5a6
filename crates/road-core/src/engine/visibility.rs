//! Showing and hiding the road.

use road_events::{EntityRef, MessageLevel, RoadNotice};
use tracing::debug;

use super::Simulation;
use crate::error::RoadError;

impl Simulation {
    /// Hides every object and stops sending notices.
    pub fn make_invisible(&mut self) -> Result<(), RoadError> {
        let result = self.ensure_running().map(|_| {
            if !self.visible {
                self.message(MessageLevel::Info, "Already invisible", "The road is already hidden.");
                return;
            }
            self.hide_all();
            self.visible = false;
            debug!("road hidden");
        });
        self.record(result)
    }

    /// Resumes notices and redraws every object on its cell.
    pub fn make_visible(&mut self) -> Result<(), RoadError> {
        let result = self.ensure_running().map(|_| {
            if self.visible {
                self.message(MessageLevel::Info, "Already visible", "The road is already shown.");
                return;
            }
            self.visible = true;
            self.notify(RoadNotice::Show {
                entity: EntityRef::Road,
            });

            let mut placed: Vec<(EntityRef, usize)> = self
                .grid
                .sites()
                .map(|s| (EntityRef::site(s.id.0.clone()), s.position))
                .collect();
            placed.extend(
                self.grid
                    .agents()
                    .map(|a| (EntityRef::agent(a.id.0.clone()), a.position)),
            );
            for (entity, cell) in placed {
                self.show_at(entity, cell);
            }

            self.notify(RoadNotice::Show {
                entity: EntityRef::ProgressBar,
            });
            self.report_progress();
            debug!("road shown");
        });
        self.record(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;

    #[test]
    fn test_invisible_is_silent() {
        let sink = RecordingSink::new();
        let mut sim = Simulation::new(10).with_sink(sink.clone());
        sim.place_agent("normal", 1).unwrap();
        sim.place_site("normal", 4, 20).unwrap();
        sink.drain();

        sim.make_invisible().unwrap();
        let hidden = sink.drain();
        assert_eq!(hidden.len(), 4);
        assert!(hidden.iter().all(|n| matches!(n, RoadNotice::Hide { .. })));
        assert!(!sim.is_visible());

        sim.move_agent(1, 3).unwrap();
        sim.make_invisible().unwrap();
        assert!(sink.is_empty());
        assert_eq!(sim.last_message(), Some("The road is already hidden."));
    }

    #[test]
    fn test_visible_redraws_everything() {
        let sink = RecordingSink::new();
        let mut sim = Simulation::new(10).with_sink(sink.clone());
        sim.place_agent("normal", 1).unwrap();
        sim.make_invisible().unwrap();
        sim.move_agent(1, 5).unwrap();
        sink.drain();

        sim.make_visible().unwrap();
        let notices = sink.drain();
        assert!(notices.contains(&RoadNotice::Reposition {
            entity: EntityRef::agent("robot_0001"),
            cell: 6,
        }));
        assert!(matches!(notices.last(), Some(RoadNotice::Progress { .. })));

        sim.make_visible().unwrap();
        assert_eq!(sim.last_message(), Some("The road is already shown."));
    }
}
