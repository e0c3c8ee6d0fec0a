//! One-shot background model loading.
//!
//! Loading is fire-and-forget: a producer closure runs on a spawned
//! thread and its result is handed back over a channel. The engine
//! polls once per frame on the main thread, so scene mutation (and the
//! camera re-fit that follows) always happens there. There is no
//! cancellation — an in-flight load either completes or its result is
//! dropped with the receiver.

use std::sync::mpsc;
use std::thread;

use super::TargetModel;
use crate::error::TwinspectError;

/// Handle to a model load in progress.
#[derive(Debug)]
pub struct PendingLoad {
    rx: mpsc::Receiver<Result<TargetModel, TwinspectError>>,
}

impl PendingLoad {
    /// Check for a completed load without blocking.
    ///
    /// Returns `Some` exactly once, when the producer has finished;
    /// `None` while it is still running (or if its thread died, in
    /// which case the load simply never completes — the model "never
    /// appears").
    pub fn poll(&mut self) -> Option<Result<TargetModel, TwinspectError>> {
        self.rx.try_recv().ok()
    }
}

/// Spawn `producer` on a background thread and return a pollable handle.
pub fn spawn_load<F>(producer: F) -> Result<PendingLoad, TwinspectError>
where
    F: FnOnce() -> Result<TargetModel, TwinspectError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let _handle = thread::Builder::new()
        .name("model-loader".into())
        .spawn(move || {
            // The receiver may have been dropped; nothing to do then.
            let _ = tx.send(producer());
        })
        .map_err(TwinspectError::ThreadSpawn)?;
    Ok(PendingLoad { rx })
}
