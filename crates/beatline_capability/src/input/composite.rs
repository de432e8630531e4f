//! Racing several input providers.

use beatline_error::{BeatlineError, BeatlineResult, PlaybackError, PlaybackErrorKind};
use beatline_interface::{InputCallback, InputProvider};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, warn};

struct RaceSlot {
    round: u64,
    callback: Option<InputCallback>,
}

struct RaceState {
    listening: AtomicBool,
    slot: Mutex<RaceSlot>,
}

impl RaceState {
    /// Claim the win for `round`, handing back the caller's callback.
    ///
    /// Only the first claim per round succeeds.
    fn claim(&self, round: u64) -> Option<InputCallback> {
        let mut slot = self.slot.lock();
        if slot.round != round {
            return None;
        }
        self.listening
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        slot.callback.take()
    }

    fn is_live(&self, round: u64) -> bool {
        let slot = self.slot.lock();
        slot.round == round && self.listening.load(Ordering::SeqCst)
    }
}

/// Forwards one request to every child and keeps the first answer.
///
/// When a child answers, every other child is cancelled and the answer is
/// passed on. Answers that arrive after that are ignored. Cancelling the
/// composite cancels all children without calling back.
///
/// # Examples
///
/// ```
/// use beatline_capability::{CompositeInputProvider, TextEntryProvider};
/// use beatline_interface::InputProvider;
/// use std::sync::{Arc, Mutex};
///
/// let keyboard = Arc::new(TextEntryProvider::new("keyboard"));
/// let voice = Arc::new(TextEntryProvider::new("voice"));
/// let composite = CompositeInputProvider::new("any", vec![keyboard.clone(), voice.clone()]);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// composite
///     .request_input(Box::new(move |text| sink.lock().unwrap().push(text)))
///     .unwrap();
///
/// assert!(voice.submit("left"));
/// assert!(!keyboard.is_listening());
/// assert!(!keyboard.submit("right"));
/// assert_eq!(*seen.lock().unwrap(), vec!["left".to_string()]);
/// ```
pub struct CompositeInputProvider {
    name: String,
    children: Vec<Arc<dyn InputProvider>>,
    state: Arc<RaceState>,
}

impl CompositeInputProvider {
    /// Creates a composite over `children`.
    pub fn new(name: impl Into<String>, children: Vec<Arc<dyn InputProvider>>) -> Self {
        Self {
            name: name.into(),
            children,
            state: Arc::new(RaceState {
                listening: AtomicBool::new(false),
                slot: Mutex::new(RaceSlot {
                    round: 0,
                    callback: None,
                }),
            }),
        }
    }

    /// Child providers, in request order.
    pub fn children(&self) -> &[Arc<dyn InputProvider>] {
        &self.children
    }

    fn child_callback(&self, round: u64, winner: usize) -> InputCallback {
        let state = self.state.clone();
        let children = self.children.clone();
        let name = self.name.clone();
        Box::new(move |text: String| {
            let Some(callback) = state.claim(round) else {
                debug!(provider = %name, child = winner, "Late input ignored");
                return;
            };
            for (index, child) in children.iter().enumerate() {
                if index != winner {
                    child.cancel();
                }
            }
            debug!(provider = %name, child = winner, "Input race won");
            callback(text);
        })
    }
}

impl std::fmt::Debug for CompositeInputProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeInputProvider")
            .field("name", &self.name)
            .field("children", &self.children.len())
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl InputProvider for CompositeInputProvider {
    #[instrument(skip(self, on_result), fields(provider = %self.name, children = self.children.len()))]
    fn request_input(&self, on_result: InputCallback) -> BeatlineResult<()> {
        let round = {
            let mut slot = self.state.slot.lock();
            if self
                .state
                .listening
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return Err(PlaybackError::new(PlaybackErrorKind::InputAlreadyPending(
                    self.name.clone(),
                ))
                .into());
            }
            slot.round += 1;
            slot.callback = Some(on_result);
            slot.round
        };

        if self.children.is_empty() {
            warn!("Composite has no children; request will never complete");
            return Ok(());
        }

        let mut accepted = 0usize;
        let mut last_error: Option<BeatlineError> = None;
        for (index, child) in self.children.iter().enumerate() {
            if !self.state.is_live(round) {
                // A child answered synchronously; the rest are never asked.
                break;
            }
            match child.request_input(self.child_callback(round, index)) {
                Ok(()) => accepted += 1,
                Err(e) => {
                    warn!(child = %child.name(), error = %e, "Child rejected input request");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if accepted == 0 => {
                let mut slot = self.state.slot.lock();
                self.state.listening.store(false, Ordering::SeqCst);
                slot.callback.take();
                Err(e)
            }
            _ => Ok(()),
        }
    }

    fn cancel(&self) {
        {
            let mut slot = self.state.slot.lock();
            if !self.state.listening.swap(false, Ordering::SeqCst) {
                return;
            }
            slot.callback.take();
        }
        for child in &self.children {
            child.cancel();
        }
        debug!(provider = %self.name, "Composite input cancelled");
    }

    fn is_listening(&self) -> bool {
        self.state.listening.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
