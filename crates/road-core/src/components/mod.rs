//! Road Components
//!
//! Robots, stores, their capability hooks and the grid that holds them.

pub mod agent;
pub mod capability;
pub mod grid;
pub mod site;

pub use agent::*;
pub use capability::*;
pub use grid::*;
pub use site::*;
