//! Render Sinks
//!
//! Where the engine sends its notices. The engine only ever writes.

use std::cell::RefCell;
use std::rc::Rc;

use road_events::RoadNotice;

/// Outbound notice channel
pub trait RenderSink {
    fn emit(&mut self, notice: RoadNotice);
}

/// Discards every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn emit(&mut self, _notice: RoadNotice) {}
}

/// Keeps notices in memory. Clones share the same buffer, so a test can keep
/// one handle and give the other to the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notices: Rc<RefCell<Vec<RoadNotice>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn notices(&self) -> Vec<RoadNotice> {
        self.notices.borrow().clone()
    }

    pub fn drain(&self) -> Vec<RoadNotice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    /// Bodies of recorded messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter_map(|n| match n {
                RoadNotice::Message { body, .. } => Some(body.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl RenderSink for RecordingSink {
    fn emit(&mut self, notice: RoadNotice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_buffer() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();
        handle.emit(RoadNotice::info("Hello", "first"));
        handle.emit(RoadNotice::Progress {
            profit: 1,
            ceiling: 2,
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), vec!["first".to_string()]);

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        sink.emit(RoadNotice::info("ignored", "ignored"));
    }
}
