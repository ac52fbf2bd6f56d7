//! Warning sink for non-fatal export and scan conditions.
//!
//! The core emits at most one warning per oversize full export and one per
//! skipped file. Implementations decide where warnings land: the default
//! forwards to `tracing`, tests collect them for assertions.

use std::sync::{Arc, Mutex};

/// Receives non-fatal warnings. Implementations must be thread-safe.
pub trait WarningSink: Send + Sync {
    /// Emit a single warning message.
    fn warn(&self, message: &str);
}

/// Default sink: forwards warnings to `tracing::warn!`.
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Discards all warnings.
pub struct NoWarnings;

impl WarningSink for NoWarnings {
    fn warn(&self, _message: &str) {}
}

/// Collects warnings in memory for inspection.
#[derive(Clone, Default)]
pub struct CollectSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings received so far, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink poisoned").clone()
    }
}

impl WarningSink for CollectSink {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .expect("sink poisoned")
            .push(message.to_string());
    }
}
