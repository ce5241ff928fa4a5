//! Tracks in-flight writes for the status line.
//!
//! Screens hand every [`PendingWrite`] to a [`WriteTracker`]; the app polls
//! it once per frame. Failures are logged and the most recent one is kept
//! for display. In-memory state is never rolled back.

use crate::storage::{PendingWrite, PersistenceError};

/// Pending write receipts awaiting completion.
#[derive(Debug, Default)]
pub struct WriteTracker {
    pending: Vec<PendingWrite>,
    last_failure: Option<String>,
    failed: usize,
}

impl WriteTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track one receipt.
    pub fn track(&mut self, write: PendingWrite) {
        self.pending.push(write);
    }

    /// Track several receipts.
    pub fn track_all(&mut self, writes: impl IntoIterator<Item = PendingWrite>) {
        self.pending.extend(writes);
    }

    /// Collect finished receipts without blocking and return the failures.
    pub fn poll(&mut self) -> Vec<PersistenceError> {
        let mut failures = Vec::new();

        self.pending.retain(|write| match write.poll() {
            None => true,
            Some(Ok(())) => false,
            Some(Err(e)) => {
                failures.push(e);
                false
            }
        });

        for failure in &failures {
            tracing::warn!(key = failure.key(), "Write failed: {}", failure);
            self.last_failure = Some(failure.to_string());
        }
        self.failed += failures.len();

        failures
    }

    /// Number of writes still in flight.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Number of failed writes seen so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Most recent failure message.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Hide the last failure.
    pub fn dismiss_failure(&mut self) {
        self.last_failure = None;
    }

    /// One-line summary for the status bar.
    pub fn status_text(&self) -> String {
        match (self.in_flight(), &self.last_failure) {
            (_, Some(failure)) => format!("Not saved: {}", failure),
            (0, None) => "All changes saved".to_string(),
            (n, None) => format!("Saving {} change{}...", n, if n == 1 { "" } else { "s" }),
        }
    }
}
