//! Notice Output
//!
//! Sinks that receive the engine's render notices.

pub mod logger;
pub mod sink;

pub use logger::NoticeLogger;
pub use sink::{NullSink, RecordingSink, RenderSink};
