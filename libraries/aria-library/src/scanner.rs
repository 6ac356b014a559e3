//! Scan pipeline
//!
//! Runs exactly one source's scan concurrently with persistence of its
//! output. A bounded track channel connects the producer (the source's walk)
//! to the consumer (storage writes); both tasks report exactly one outcome
//! into a shared channel. The orchestrator waits for both reports before
//! returning and the first error received is the terminal one; a later error
//! is dropped, not aggregated.

use crate::progress::ScanTracker;
use crate::source::{FileObserver, MediaSource};
use aria_core::{MediaStore, Result, Track};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Decouples filesystem I/O bursts from storage-write latency without
/// unbounded memory growth
const TRACK_QUEUE_CAPACITY: usize = 100;

/// Run one scan to its terminal outcome
///
/// The tracker must already be claimed via `ScanTracker::begin`; this
/// function only increments its counters. Recording the terminal status and
/// stamping `last_scanned` stay with the caller.
pub(crate) async fn run(
    store: Arc<dyn MediaStore>,
    tracker: Arc<ScanTracker>,
    source: Arc<dyn MediaSource>,
    cancel: CancellationToken,
) -> Result<()> {
    let (track_tx, mut track_rx) = mpsc::channel::<Track>(TRACK_QUEUE_CAPACITY);
    // Capacity 2 keeps both outcome sends non-blocking
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Result<()>>(2);

    // Consumer: drain the channel, persist each track, count it
    let consumer_tracker = tracker.clone();
    let consumer_outcome = outcome_tx.clone();
    tokio::spawn(async move {
        let mut outcome = Ok(());
        while let Some(track) = track_rx.recv().await {
            if let Err(e) = store.save_track(&track).await {
                outcome = Err(e);
                break;
            }
            consumer_tracker.track_saved();
        }
        let _ = consumer_outcome.send(outcome).await;
    });

    // Producer: run the source's scan; the observer feeds the total counter
    tokio::spawn(async move {
        let on_file: FileObserver = Box::new(move |_path| tracker.file_observed());
        let outcome = source.scan(cancel, track_tx, on_file).await;
        let _ = outcome_tx.send(outcome).await;
    });

    // Wait for both outcomes so neither task outlives this call: a producer
    // error closes the track channel and the consumer finishes draining it
    // before reporting. First error wins; the consumer's Ok means the channel
    // closed and drained, so everything emitted is saved.
    let mut first_error = None;
    for _ in 0..2 {
        if let Some(Err(e)) = outcome_rx.recv().await {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
