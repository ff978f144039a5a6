//! Notice Logger
//!
//! Append-only JSONL notice logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use road_events::RoadNotice;
use tracing::warn;

use super::sink::RenderSink;

/// Writes every notice as one JSON line
pub struct NoticeLogger {
    writer: BufWriter<File>,
}

impl NoticeLogger {
    /// Create a new logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Log a notice to the file
    pub fn log(&mut self, notice: &RoadNotice) -> std::io::Result<()> {
        let json = notice.to_jsonl()?;
        writeln!(self.writer, "{}", json)
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl RenderSink for NoticeLogger {
    fn emit(&mut self, notice: RoadNotice) {
        if let Err(e) = self.log(&notice) {
            warn!(error = %e, "failed to write notice");
        }
    }
}

impl Drop for NoticeLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: Failed to flush notice logger: {}", e);
        }
    }
}
