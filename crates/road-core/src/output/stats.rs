//! Statistics Output
//!
//! Text renderings of road snapshots and JSON snapshot files.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use road_events::{CellProfit, RoadSnapshot};

/// Text block listing every cell with a positive gain.
pub fn render_profit_by_cell(cells: &[CellProfit]) -> String {
    if cells.is_empty() {
        return "No profit recorded yet.".to_string();
    }
    let mut text = String::from("Profit per cell:\n");
    for cell in cells {
        let _ = writeln!(text, "- cell {} -> {} tenges", cell.cell, cell.tenges);
    }
    text
}

/// Text block listing drained store cells.
pub fn render_emptied_sites(cells: &[usize]) -> String {
    if cells.is_empty() {
        return "No empty stores right now.".to_string();
    }
    let mut text = String::from("Empty stores:\n");
    for cell in cells {
        let _ = writeln!(text, "- cell {}", cell);
    }
    text
}

/// Human-readable summary of a snapshot.
pub fn render_statistics(snapshot: &RoadSnapshot) -> String {
    let mut text = String::from("SILK ROAD STATISTICS\n\n");
    let _ = writeln!(text, "Total profit: {} tenges", snapshot.profit);
    let _ = writeln!(text, "Cells: {}", snapshot.length);
    let _ = writeln!(text, "Tenges held by robots: {}", snapshot.total_agent_tenges());
    let _ = writeln!(text, "Tenges left in stores: {}", snapshot.total_site_tenges());
    if let Some(day) = snapshot.day {
        let _ = writeln!(text, "Day: {}", day);
    }

    text.push_str("\nROBOTS:\n");
    if snapshot.agents.is_empty() {
        text.push_str("  No robots on the road.\n");
    }
    for agent in &snapshot.agents {
        let origin = agent
            .origin
            .map_or_else(|| "unknown".to_string(), |o| o.to_string());
        let _ = writeln!(
            text,
            " - {} robot at cell {} | tenges: {} | origin: {}",
            agent.variant, agent.cell, agent.tenges, origin
        );
    }

    text.push_str("\nSTORES:\n");
    if snapshot.sites.is_empty() {
        text.push_str("  No stores on the road.\n");
    }
    for site in &snapshot.sites {
        let _ = writeln!(
            text,
            " - {} store at cell {} | tenges: {} of {}",
            site.variant, site.cell, site.tenges, site.original_tenges
        );
    }
    let empty = snapshot.empty_sites();
    if !empty.is_empty() {
        let _ = writeln!(text, "\n{} store(s) drained to zero.", empty.len());
    }
    text
}

/// Writes a snapshot as pretty JSON, creating parent directories.
pub fn write_snapshot(path: &Path, snapshot: &RoadSnapshot) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)
}
