//! Placement and removal of robots and stores.

use road_events::{EntityRef, MessageLevel, RoadNotice};
use tracing::debug;

use super::Simulation;
use crate::components::{Agent, AgentId, AgentVariant, Site, SiteCapability, SiteId, SiteVariant};
use crate::error::RoadError;
use crate::systems::transfer::{mediate, TransferOutcome};

impl Simulation {
    /// Places a robot of the named variant on an empty cell.
    pub fn place_agent(&mut self, variant: &str, position: i64) -> Result<AgentId, RoadError> {
        let result = self.try_place_agent(variant, position);
        self.record(result)
    }

    /// Places a store of the named variant. Autonomous stores ignore
    /// `position` and pick a random cell without a store.
    pub fn place_site(
        &mut self,
        variant: &str,
        position: i64,
        balance: i64,
    ) -> Result<SiteId, RoadError> {
        let result = self.try_place_site(variant, position, balance);
        self.record(result)
    }

    /// Takes the robot off a cell. An empty cell is not an error.
    pub fn remove_agent(&mut self, position: i64) -> Result<Option<Agent>, RoadError> {
        let result = self.try_remove_agent(position);
        self.record(result)
    }

    /// Takes the store off a cell. An empty cell is not an error.
    pub fn remove_site(&mut self, position: i64) -> Result<Option<Site>, RoadError> {
        let result = self.try_remove_site(position);
        self.record(result)
    }

    pub(super) fn try_place_agent(
        &mut self,
        variant: &str,
        position: i64,
    ) -> Result<AgentId, RoadError> {
        self.ensure_running()?;
        let variant: AgentVariant = variant.parse()?;
        let position = self.grid.index(position)?;
        if self.grid.agent(position).is_some() {
            return Err(RoadError::CellOccupied {
                position,
                occupant: "robot",
            });
        }

        self.next_agent += 1;
        let id = AgentId::from_sequence(self.next_agent);
        debug!(agent = %id, variant = variant.name(), position, "placing robot");
        self.grid
            .put_agent(Agent::new(id.clone(), variant, position), position);
        self.show_at(EntityRef::agent(id.0.clone()), position);
        self.settle_placement(position);
        Ok(id)
    }

    pub(super) fn try_place_site(
        &mut self,
        variant: &str,
        position: i64,
        balance: i64,
    ) -> Result<SiteId, RoadError> {
        self.ensure_running()?;
        let variant: SiteVariant = variant.parse()?;
        let position = if variant.needs_random_position() {
            let free = self.grid.free_site_cells();
            if free.is_empty() {
                return Err(RoadError::NoCapacity);
            }
            free[self.rng.below(free.len())]
        } else {
            let position = self.grid.index(position)?;
            if self.grid.site(position).is_some() {
                return Err(RoadError::CellOccupied {
                    position,
                    occupant: "store",
                });
            }
            position
        };

        self.next_site += 1;
        let id = SiteId::from_sequence(self.next_site);
        debug!(site = %id, variant = variant.name(), position, balance, "placing store");
        self.grid
            .put_site(Site::new(id.clone(), variant, position, balance), position);
        self.profit_ceiling = self.profit_ceiling.saturating_add(balance);
        self.show_at(EntityRef::site(id.0.clone()), position);
        self.report_progress();
        self.settle_placement(position);
        Ok(id)
    }

    fn try_remove_agent(&mut self, position: i64) -> Result<Option<Agent>, RoadError> {
        self.ensure_running()?;
        let position = self.grid.index(position)?;
        let removed = self.grid.take_agent(position);
        if let Some(agent) = &removed {
            debug!(agent = %agent.id, position, "robot removed");
            self.notify(RoadNotice::Hide {
                entity: EntityRef::agent(agent.id.0.clone()),
            });
        }
        Ok(removed)
    }

    fn try_remove_site(&mut self, position: i64) -> Result<Option<Site>, RoadError> {
        self.ensure_running()?;
        let position = self.grid.index(position)?;
        let removed = self.grid.take_site(position);
        if let Some(site) = &removed {
            debug!(site = %site.id, position, "store removed");
            self.profit_ceiling = self.profit_ceiling.saturating_sub(site.tenges);
            self.notify(RoadNotice::Hide {
                entity: EntityRef::site(site.id.0.clone()),
            });
            self.report_progress();
        }
        Ok(removed)
    }

    /// A robot and a store that meet through placement settle at once.
    /// The store is drained but neither the robot nor the ledger is credited.
    fn settle_placement(&mut self, position: usize) {
        let Some((agent, site)) = self.grid.pair_mut(position) else {
            return;
        };
        let outcome = mediate(
            &agent.variant,
            0,
            &site.variant,
            &mut site.tenges,
            self.rng.as_mut(),
        );
        match outcome {
            TransferOutcome::Collected(amount) => {
                debug!(position, amount, "store drained on placement");
            }
            TransferOutcome::Rejected(reason) => {
                self.message(MessageLevel::Warning, "Robot rejected", reason);
            }
            TransferOutcome::Nothing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_query() {
        let mut sim = Simulation::new(20);
        let agent = sim.place_agent("normal", 0).unwrap();
        let site = sim.place_site("normal", 10, 100).unwrap();

        assert_eq!(agent.to_string(), "robot_0001");
        assert_eq!(site.to_string(), "store_0001");
        assert_eq!(sim.agents(), vec![(0, 0)]);
        assert_eq!(sim.site_balance(10), Some(100));
        assert_eq!(sim.profit_ceiling(), 100);
    }

    #[test]
    fn test_placement_errors() {
        let mut sim = Simulation::new(20);
        sim.place_agent("normal", 4).unwrap();
        sim.place_site("normal", 4, 10).unwrap();

        assert!(matches!(
            sim.place_agent("normal", -1),
            Err(RoadError::InvalidIndex { position: -1, .. })
        ));
        assert!(matches!(
            sim.place_agent("tender", 4),
            Err(RoadError::CellOccupied { occupant: "robot", .. })
        ));
        assert!(matches!(
            sim.place_site("casino", 4, 10),
            Err(RoadError::CellOccupied { occupant: "store", .. })
        ));
        assert!(matches!(
            sim.place_agent("flying", 5),
            Err(RoadError::UnknownVariant { .. })
        ));
        assert!(matches!(
            sim.place_site("bank", 5, 10),
            Err(RoadError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_placement_transfer_drains_without_credit() {
        let mut sim = Simulation::new(10);
        sim.place_site("normal", 3, 80).unwrap();
        sim.place_agent("normal", 3).unwrap();

        assert_eq!(sim.site_balance(3), Some(0));
        assert_eq!(sim.agent_at(3).unwrap().tenges, 0);
        assert_eq!(sim.profit(), 0);
    }

    #[test]
    fn test_site_on_robot_cell_drains() {
        let mut sim = Simulation::new(10);
        sim.place_agent("tender", 6).unwrap();
        sim.place_site("normal", 6, 90).unwrap();
        assert_eq!(sim.site_balance(6), Some(45));
    }

    #[test]
    fn test_fighter_placement_rejection_is_only_a_message() {
        let mut sim = Simulation::new(10);
        sim.place_agent("normal", 2).unwrap();
        sim.place_site("fighter", 2, 50).unwrap();

        assert!(sim.last_operation_ok());
        assert_eq!(sim.site_balance(2), Some(50));
        assert!(sim.last_message().unwrap().contains("fighter"));
    }

    #[test]
    fn test_remove() {
        let mut sim = Simulation::new(10);
        sim.place_agent("normal", 1).unwrap();
        sim.place_site("normal", 8, 60).unwrap();

        assert!(sim.remove_agent(1).unwrap().is_some());
        assert!(sim.remove_agent(1).unwrap().is_none());
        assert!(sim.last_operation_ok());

        let removed = sim.remove_site(8).unwrap().unwrap();
        assert_eq!(removed.original, 60);
        assert_eq!(sim.profit_ceiling(), 0);

        assert!(matches!(
            sim.remove_site(11),
            Err(RoadError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn test_autonomous_picks_free_cell() {
        let mut sim = Simulation::new(2).with_seed(9);
        sim.place_site("normal", 0, 10).unwrap();
        sim.place_site("normal", 2, 10).unwrap();

        // Only cell 1 is free, whatever was requested
        sim.place_site("autonomous", 0, 30).unwrap();
        assert_eq!(sim.site_balance(1), Some(30));

        assert!(matches!(
            sim.place_site("autonomous", 0, 30),
            Err(RoadError::NoCapacity)
        ));
    }
}
