//! # Console Log Sink
//!
//! File: cli/src/common/ui/log.rs
//!
//! Prints materialization records to stdout as `[HH:MM:SS] message`, one
//! line per record, the moment they are produced. Failure records are also
//! kept so they can be repeated once the run is over.
//!
use crate::core::materializer::{LogEntry, LogSink};
use std::io::Write;

#[derive(Debug, Default)]
pub struct ConsoleSink {
    failures: Vec<LogEntry>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failure records, in the order they were printed.
    pub fn failures(&self) -> &[LogEntry] {
        &self.failures
    }
}

impl LogSink for ConsoleSink {
    fn record(&mut self, entry: LogEntry) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout must not abort the run.
        let _ = writeln!(stdout, "{}", entry);
        let _ = stdout.flush();
        if entry.event.is_failure() {
            self.failures.push(entry);
        }
    }
}
