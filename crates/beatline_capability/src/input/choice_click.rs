//! Point-and-click input.

use beatline_error::{BeatlineResult, PlaybackError, PlaybackErrorKind};
use beatline_interface::{InputCallback, InputProvider};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Buffered clicks per listener before older ones are dropped.
const CLICK_CAPACITY: usize = 16;

struct PendingClick {
    id: u64,
    callback: InputCallback,
    token: CancellationToken,
}

/// Input provider that answers with the label of a clicked choice button.
///
/// The UI publishes clicks with [`ChoiceClickProvider::click`] (or through
/// a sender from [`ChoiceClickProvider::clicks`]). Only clicks published
/// after a request starts are considered. Requests spawn a listener task,
/// so `request_input` must run inside a tokio runtime.
pub struct ChoiceClickProvider {
    name: String,
    clicks: broadcast::Sender<String>,
    next_id: AtomicU64,
    pending: Arc<Mutex<Option<PendingClick>>>,
}

impl ChoiceClickProvider {
    /// Creates an idle provider with its own click channel.
    pub fn new(name: impl Into<String>) -> Self {
        let (clicks, _) = broadcast::channel(CLICK_CAPACITY);
        Self {
            name: name.into(),
            clicks,
            next_id: AtomicU64::new(0),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Sender a UI can hold on to for publishing clicks.
    pub fn clicks(&self) -> broadcast::Sender<String> {
        self.clicks.clone()
    }

    /// Publish a click. Returns false if nobody was listening.
    #[instrument(skip(self, label), fields(provider = %self.name))]
    pub fn click(&self, label: impl Into<String>) -> bool {
        self.clicks.send(label.into()).is_ok()
    }
}

impl std::fmt::Debug for ChoiceClickProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceClickProvider")
            .field("name", &self.name)
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl InputProvider for ChoiceClickProvider {
    fn request_input(&self, on_result: InputCallback) -> BeatlineResult<()> {
        let mut pending = self.pending.lock();
        if pending.is_some() {
            return Err(PlaybackError::new(PlaybackErrorKind::InputAlreadyPending(
                self.name.clone(),
            ))
            .into());
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        let mut receiver = self.clicks.subscribe();
        *pending = Some(PendingClick {
            id,
            callback: on_result,
            token: token.clone(),
        });
        drop(pending);

        let slot = self.pending.clone();
        let name = self.name.clone();
        tokio::spawn(async move {
            loop {
                let label = tokio::select! {
                    _ = token.cancelled() => return,
                    received = receiver.recv() => match received {
                        Ok(label) => label,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(provider = %name, skipped, "Click listener lagged");
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => return,
                    },
                };

                let claimed = {
                    let mut slot = slot.lock();
                    match slot.as_ref() {
                        Some(current) if current.id == id => slot.take(),
                        _ => None,
                    }
                };
                if let Some(claimed) = claimed {
                    debug!(provider = %name, label = %label, "Choice clicked");
                    (claimed.callback)(label);
                }
                return;
            }
        });

        debug!(provider = %self.name, "Listening for choice clicks");
        Ok(())
    }

    fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.token.cancel();
            debug!(provider = %self.name, "Click listening cancelled");
        }
    }

    fn is_listening(&self) -> bool {
        self.pending.lock().is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
