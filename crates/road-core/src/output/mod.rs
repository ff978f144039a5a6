//! Report Output
//!
//! Text and JSON renderings of road snapshots.

pub mod stats;

pub use stats::{render_emptied_sites, render_profit_by_cell, render_statistics, write_snapshot};
