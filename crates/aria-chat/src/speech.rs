//! Speech output queue.
//!
//! Wraps a blocking speech backend in an async queue: `speak` submits and
//! returns immediately unless blocking delivery is requested, utterances
//! play strictly in submission order, and `stop` halts in-flight playback
//! and discards everything still queued. Discarding works by epoch: `stop`
//! bumps the epoch and the worker drops any queued utterance submitted
//! under an older one.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use aria_dispatch::{CollaboratorError, TextToSpeech};

/// Blocking speech synthesis the queue drives.
///
/// `say` speaks one utterance to completion; `halt` interrupts a `say` in
/// progress from another thread.
pub trait SpeechBackend: Send + Sync + 'static {
    fn say(&self, text: &str) -> Result<(), CollaboratorError>;
    fn halt(&self);
}

struct QueuedUtterance {
    text: String,
    epoch: u64,
    done: Option<oneshot::Sender<()>>,
}

/// Ordered, interruptible speech queue over a blocking backend.
pub struct SpeechQueue {
    tx: mpsc::UnboundedSender<QueuedUtterance>,
    backend: Arc<dyn SpeechBackend>,
    epoch: Arc<AtomicU64>,
    pending: Arc<AtomicUsize>,
    speaking: Arc<AtomicBool>,
}

impl SpeechQueue {
    /// Start the worker task and return the queue handle.
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<QueuedUtterance>();
        let epoch = Arc::new(AtomicU64::new(0));
        let pending = Arc::new(AtomicUsize::new(0));
        let speaking = Arc::new(AtomicBool::new(false));

        let worker_backend = backend.clone();
        let worker_epoch = epoch.clone();
        let worker_pending = pending.clone();
        let worker_speaking = speaking.clone();
        tokio::spawn(async move {
            while let Some(mut utterance) = rx.recv().await {
                if utterance.epoch == worker_epoch.load(Ordering::SeqCst) {
                    worker_speaking.store(true, Ordering::SeqCst);
                    let backend = worker_backend.clone();
                    let text = utterance.text.clone();
                    let result =
                        tokio::task::spawn_blocking(move || backend.say(&text)).await;
                    worker_speaking.store(false, Ordering::SeqCst);
                    match result {
                        Ok(Err(e)) => {
                            tracing::warn!(error = %e, "Speech synthesis failed")
                        }
                        Err(e) => tracing::warn!(error = %e, "Speech task panicked"),
                        Ok(Ok(())) => {}
                    }
                } else {
                    tracing::debug!(text = %utterance.text, "Discarding stale utterance");
                }
                worker_pending.fetch_sub(1, Ordering::SeqCst);
                if let Some(done) = utterance.done.take() {
                    let _ = done.send(());
                }
            }
        });

        Self {
            tx,
            backend,
            epoch,
            pending,
            speaking,
        }
    }
}

#[async_trait]
impl TextToSpeech for SpeechQueue {
    async fn speak(&self, text: &str, blocking: bool) -> Result<(), CollaboratorError> {
        let (done_tx, done_rx) = if blocking {
            let (tx, rx) = oneshot::channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        self.pending.fetch_add(1, Ordering::SeqCst);
        self.tx
            .send(QueuedUtterance {
                text: text.to_string(),
                epoch: self.epoch.load(Ordering::SeqCst),
                done: done_tx,
            })
            .map_err(|_| CollaboratorError::Unavailable("speech worker stopped".to_string()))?;

        if let Some(rx) = done_rx {
            rx.await.map_err(|_| {
                CollaboratorError::Unavailable("speech worker stopped".to_string())
            })?;
        }
        Ok(())
    }

    fn stop(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.backend.halt();
    }

    fn is_busy(&self) -> bool {
        self.speaking.load(Ordering::SeqCst) || self.pending.load(Ordering::SeqCst) > 0
    }
}
