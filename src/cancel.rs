//! Cooperative cancellation for long-running operations.
//!
//! Scanning, chunk-stream export, and document concatenation all check the
//! flag at their loop boundaries (per file, per document, per emitted line)
//! and stop early with whatever output they have accumulated. JSONL output
//! is always cut at a line boundary, the other forms at a document boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared cancellation flag.
///
/// Cloning is cheap; all clones observe the same flag. The default value is
/// "not cancelled".
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a fresh, un-cancelled flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
