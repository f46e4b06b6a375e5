// src/progress.rs
/// Lightweight progress reporting for lookups that touch several sources.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of sources about to be read.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One source produced its part.
    fn item_done(&mut self, _source: &str) {}

    /// One source failed; the lookup carries on without it.
    fn item_failed(&mut self, _source: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects events; handy for tests and for replaying into a log.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub events: Vec<String>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.events.push(format!("begin {total}"));
    }
    fn log(&mut self, msg: &str) {
        self.events.push(format!("log {msg}"));
    }
    fn item_done(&mut self, source: &str) {
        self.events.push(format!("done {source}"));
    }
    fn item_failed(&mut self, source: &str, reason: &str) {
        self.events.push(format!("failed {source}: {reason}"));
    }
    fn finish(&mut self) {
        self.events.push(s!("finish"));
    }
}
