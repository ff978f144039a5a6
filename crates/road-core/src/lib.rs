//! Silk road simulation engine.
//!
//! Robots and stores on a one-dimensional road: placement, movement,
//! collection, greedy profit optimization and the day-by-day contest solver.

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod output;
pub mod rng;
pub mod systems;

pub use components::{Agent, AgentId, AgentVariant, Site, SiteId, SiteVariant};
pub use config::{default_config_toml, ConfigError, RoadConfig};
pub use engine::Simulation;
pub use error::RoadError;
pub use events::{NoticeLogger, NullSink, RecordingSink, RenderSink};
pub use rng::{RandomSource, ScriptedRandom, SimRng};
pub use systems::{estimate_max_profit, ContestSolver, ReplayOutcome};
