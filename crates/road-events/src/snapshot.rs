//! Snapshot Types
//!
//! Serialization structs for road snapshots and statistics output.
//!
//! A snapshot captures the robots, stores and ledger at a point in time,
//! used for reports, analysis and debugging.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Robot snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: String,
    /// Variant name ("normal", "tender", "neverback")
    pub variant: String,
    pub cell: usize,
    pub tenges: i64,
    #[serde(default)]
    pub origin: Option<usize>,
}

impl AgentSnapshot {
    pub fn new(agent_id: impl Into<String>, variant: impl Into<String>, cell: usize) -> Self {
        Self {
            agent_id: agent_id.into(),
            variant: variant.into(),
            cell,
            tenges: 0,
            origin: Some(cell),
        }
    }

    /// Cells between the robot and the place it started from.
    pub fn displacement(&self) -> usize {
        self.origin.map_or(0, |o| o.abs_diff(self.cell))
    }
}

/// Store snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub site_id: String,
    /// Variant name ("normal", "fighter", "casino", "autonomous")
    pub variant: String,
    pub cell: usize,
    pub tenges: i64,
    pub original_tenges: i64,
}

impl SiteSnapshot {
    pub fn is_empty(&self) -> bool {
        self.tenges == 0
    }
}

/// Cumulative gain recorded at one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellProfit {
    pub cell: usize,
    pub tenges: i64,
}

/// Complete road state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadSnapshot {
    pub snapshot_id: String,
    /// Last valid cell index
    pub length: usize,
    pub profit: i64,
    pub profit_ceiling: i64,
    /// Day counter in day-driven mode
    #[serde(default)]
    pub day: Option<usize>,
    #[serde(default)]
    pub agents: Vec<AgentSnapshot>,
    #[serde(default)]
    pub sites: Vec<SiteSnapshot>,
    /// Cells with a positive cumulative gain
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profit_by_cell: Vec<CellProfit>,
}

impl RoadSnapshot {
    /// Creates an empty snapshot for a road of the given length.
    pub fn new(snapshot_id: impl Into<String>, length: usize) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            length,
            profit: 0,
            profit_ceiling: 0,
            day: None,
            agents: Vec::new(),
            sites: Vec::new(),
            profit_by_cell: Vec::new(),
        }
    }

    /// Finds the robot standing on a cell.
    pub fn agent_at(&self, cell: usize) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.cell == cell)
    }

    /// Finds the store on a cell.
    pub fn site_at(&self, cell: usize) -> Option<&SiteSnapshot> {
        self.sites.iter().find(|s| s.cell == cell)
    }

    /// Sum of all store balances.
    pub fn total_site_tenges(&self) -> i64 {
        self.sites.iter().fold(0i64, |sum, s| sum.saturating_add(s.tenges))
    }

    /// Sum of all robot balances.
    pub fn total_agent_tenges(&self) -> i64 {
        self.agents.iter().fold(0i64, |sum, a| sum.saturating_add(a.tenges))
    }

    /// Cells of stores that have been drained to exactly zero.
    pub fn empty_sites(&self) -> Vec<usize> {
        self.sites
            .iter()
            .filter(|s| s.is_empty())
            .map(|s| s.cell)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoadSnapshot {
        let mut snapshot = RoadSnapshot::new(generate_snapshot_id(1), 20);
        snapshot.agents.push(AgentSnapshot {
            tenges: 90,
            origin: Some(0),
            ..AgentSnapshot::new("robot_0001", "normal", 10)
        });
        snapshot.sites.push(SiteSnapshot {
            site_id: "store_0001".to_string(),
            variant: "normal".to_string(),
            cell: 10,
            tenges: 0,
            original_tenges: 100,
        });
        snapshot.sites.push(SiteSnapshot {
            site_id: "store_0002".to_string(),
            variant: "fighter".to_string(),
            cell: 15,
            tenges: 40,
            original_tenges: 40,
        });
        snapshot
    }

    #[test]
    fn test_generate_snapshot_id() {
        assert_eq!(generate_snapshot_id(1), "snap_000001");
        assert_eq!(generate_snapshot_id(42371), "snap_042371");
    }

    #[test]
    fn test_lookups() {
        let snapshot = sample();
        assert_eq!(snapshot.agent_at(10).map(|a| a.agent_id.as_str()), Some("robot_0001"));
        assert!(snapshot.agent_at(3).is_none());
        assert_eq!(snapshot.site_at(15).map(|s| s.tenges), Some(40));
    }

    #[test]
    fn test_totals() {
        let snapshot = sample();
        assert_eq!(snapshot.total_site_tenges(), 40);
        assert_eq!(snapshot.total_agent_tenges(), 90);
        assert_eq!(snapshot.empty_sites(), vec![10]);
        assert_eq!(snapshot.agents[0].displacement(), 10);
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = sample();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("profit_by_cell"));

        let parsed: RoadSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sites, snapshot.sites);
        assert_eq!(parsed.agents, snapshot.agents);
    }
}
