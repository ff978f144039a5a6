//! Profit reports, store upkeep and statistics.

use road_events::{
    generate_snapshot_id, AgentSnapshot, CellProfit, EntityRef, MessageLevel, RoadNotice,
    RoadSnapshot, SiteSnapshot,
};
use tracing::debug;

use super::Simulation;
use crate::error::RoadError;
use crate::output::stats::{render_emptied_sites, render_profit_by_cell, render_statistics};

/// Color given to drained stores.
pub const EMPTY_SITE_COLOR: &str = "black";

impl Simulation {
    /// Cells with a positive cumulative gain.
    pub fn profit_per_cell(&mut self) -> Vec<CellProfit> {
        let cells = self.cells_with_profit();
        self.message(
            MessageLevel::Info,
            "Profit per cell",
            render_profit_by_cell(&cells),
        );
        cells
    }

    /// Cells of stores drained to exactly zero. Each is recolored and the
    /// list is shown as a message.
    pub fn emptied_sites(&mut self) -> Vec<usize> {
        let emptied: Vec<(usize, EntityRef)> = self
            .grid
            .sites()
            .filter(|s| s.tenges == 0)
            .map(|s| (s.position, EntityRef::site(s.id.0.clone())))
            .collect();

        let mut cells = Vec::with_capacity(emptied.len());
        for (cell, entity) in emptied {
            self.notify(RoadNotice::Recolor {
                entity,
                color: EMPTY_SITE_COLOR.to_string(),
            });
            cells.push(cell);
        }
        let title = if cells.is_empty() {
            "No empty stores"
        } else {
            "Empty stores"
        };
        self.message(MessageLevel::Info, title, render_emptied_sites(&cells));
        cells
    }

    /// Raises each store to the gain recorded on its cell when that is
    /// higher than what it holds. Returns the total added.
    pub fn resupply_sites(&mut self) -> Result<i64, RoadError> {
        let result = self.ensure_running().map(|_| {
            let mut added = 0;
            for site in self.grid.sites_mut() {
                let recorded = self.cell_gains[site.position];
                let target = if recorded > 0 { recorded } else { site.tenges };
                if target > site.tenges {
                    added = target.saturating_sub(site.tenges).saturating_add(added);
                    site.tenges = target;
                }
            }
            self.profit_ceiling = self.profit_ceiling.saturating_add(added);
            debug!(added, "stores resupplied");
            self.report_progress();
            self.message(
                MessageLevel::Info,
                "Stores resupplied",
                "Every store was topped up to the tenges collected on its cell.",
            );
            added
        });
        self.record(result)
    }

    /// Serializable picture of the road. Also shown as a text message.
    pub fn consult_statistics(&mut self) -> RoadSnapshot {
        let snapshot = self.snapshot();
        self.message(
            MessageLevel::Info,
            "Road statistics",
            render_statistics(&snapshot),
        );
        snapshot
    }

    /// Snapshot without any notice.
    pub fn snapshot(&mut self) -> RoadSnapshot {
        self.next_snapshot += 1;
        let mut snapshot = RoadSnapshot::new(generate_snapshot_id(self.next_snapshot), self.length());
        snapshot.profit = self.profit;
        snapshot.profit_ceiling = self.profit_ceiling;
        snapshot.day = self.day();
        snapshot.agents = self
            .grid
            .agents()
            .map(|a| AgentSnapshot {
                agent_id: a.id.0.clone(),
                variant: a.variant.name().to_string(),
                cell: a.position,
                tenges: a.tenges,
                origin: a.origin,
            })
            .collect();
        snapshot.sites = self
            .grid
            .sites()
            .map(|s| SiteSnapshot {
                site_id: s.id.0.clone(),
                variant: s.variant.name().to_string(),
                cell: s.position,
                tenges: s.tenges,
                original_tenges: s.original,
            })
            .collect();
        snapshot.profit_by_cell = self.cells_with_profit();
        snapshot
    }

    fn cells_with_profit(&self) -> Vec<CellProfit> {
        self.cell_gains
            .iter()
            .enumerate()
            .filter(|(_, &gain)| gain > 0)
            .map(|(cell, &tenges)| CellProfit { cell, tenges })
            .collect()
    }
}
