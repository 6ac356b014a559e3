//! Scan progress tracking
//!
//! One manager owns one `ScanTracker`: a single slot describing the scan in
//! flight, safe to poll from any task. The tracker doubles as the
//! single-flight guard: `begin` refuses to start a second scan while one is
//! active.

use aria_core::{AriaError, Result, SourceId};
use serde::Serialize;
use std::sync::Mutex;

/// Snapshot of the currently running (or last failed) scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanProgress {
    /// Source being scanned
    pub source_id: SourceId,

    /// Files observed so far, audio or not
    pub total: u64,

    /// Tracks persisted so far
    pub current: u64,

    /// Human-readable status line
    pub status: String,
}

#[derive(Default)]
struct TrackerState {
    active: bool,
    progress: Option<ScanProgress>,
}

/// Mutex-guarded scan state shared between pipeline tasks and pollers
#[derive(Default)]
pub struct ScanTracker {
    state: Mutex<TrackerState>,
}

impl ScanTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        // Counter updates cannot panic while holding the lock
        self.state.lock().expect("scan tracker mutex poisoned")
    }

    /// Claim the tracker for a new scan, zeroing the slot
    ///
    /// # Errors
    /// `ScanInProgress` if another scan is still active.
    pub fn begin(&self, source_id: SourceId) -> Result<()> {
        let mut state = self.lock();
        if state.active {
            return Err(AriaError::ScanInProgress);
        }
        state.active = true;
        state.progress = Some(ScanProgress {
            source_id,
            total: 0,
            current: 0,
            status: "Scanning...".to_string(),
        });
        Ok(())
    }

    /// Record one observed file (producer side)
    pub fn file_observed(&self) {
        if let Some(progress) = self.lock().progress.as_mut() {
            progress.total += 1;
        }
    }

    /// Record one persisted track (consumer side)
    pub fn track_saved(&self) {
        if let Some(progress) = self.lock().progress.as_mut() {
            progress.current += 1;
        }
    }

    /// Mark the scan finished and clear the slot back to "no active scan"
    pub fn complete(&self) {
        let mut state = self.lock();
        state.active = false;
        state.progress = None;
    }

    /// Mark the scan failed, leaving the error visible to pollers
    pub fn fail(&self, message: &str) {
        let mut state = self.lock();
        state.active = false;
        if let Some(progress) = state.progress.as_mut() {
            progress.status = format!("Error: {message}");
        }
    }

    /// Non-blocking snapshot; `None` means no scan has run since the last
    /// successful completion
    pub fn snapshot(&self) -> Option<ScanProgress> {
        self.lock().progress.clone()
    }
}
