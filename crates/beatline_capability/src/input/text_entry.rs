//! Typed text input.

use beatline_error::{BeatlineResult, PlaybackError, PlaybackErrorKind};
use beatline_interface::{InputCallback, InputProvider};
use parking_lot::Mutex;
use tracing::{debug, instrument};

/// Input provider fed by the host, one submitted line per request.
///
/// The host owns the text field (or stdin reader) and calls
/// [`TextEntryProvider::submit`] when the player confirms. Submissions
/// while nobody is listening are dropped.
///
/// # Examples
///
/// ```
/// use beatline_capability::TextEntryProvider;
/// use beatline_interface::InputProvider;
/// use std::sync::{Arc, Mutex};
///
/// let provider = TextEntryProvider::new("keyboard");
/// let seen = Arc::new(Mutex::new(None));
/// let sink = seen.clone();
/// provider
///     .request_input(Box::new(move |text| *sink.lock().unwrap() = Some(text)))
///     .unwrap();
/// assert!(provider.submit("open the door"));
/// assert_eq!(seen.lock().unwrap().as_deref(), Some("open the door"));
/// assert!(!provider.is_listening());
/// ```
pub struct TextEntryProvider {
    name: String,
    pending: Mutex<Option<InputCallback>>,
}

impl TextEntryProvider {
    /// Creates an idle provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending: Mutex::new(None),
        }
    }

    /// Deliver `text` to the outstanding request.
    ///
    /// Returns false if nothing was listening.
    #[instrument(skip(self, text), fields(provider = %self.name))]
    pub fn submit(&self, text: impl Into<String>) -> bool {
        let callback = self.pending.lock().take();
        match callback {
            Some(callback) => {
                callback(text.into());
                true
            }
            None => {
                debug!("Submission ignored; not listening");
                false
            }
        }
    }
}

impl std::fmt::Debug for TextEntryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEntryProvider")
            .field("name", &self.name)
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl InputProvider for TextEntryProvider {
    fn request_input(&self, on_result: InputCallback) -> BeatlineResult<()> {
        let mut pending = self.pending.lock();
        if pending.is_some() {
            return Err(PlaybackError::new(PlaybackErrorKind::InputAlreadyPending(
                self.name.clone(),
            ))
            .into());
        }
        *pending = Some(on_result);
        debug!(provider = %self.name, "Listening for text entry");
        Ok(())
    }

    fn cancel(&self) {
        if self.pending.lock().take().is_some() {
            debug!(provider = %self.name, "Text entry cancelled");
        }
    }

    fn is_listening(&self) -> bool {
        self.pending.lock().is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_request_is_rejected() {
        let provider = TextEntryProvider::new("keyboard");
        provider.request_input(Box::new(|_| {})).unwrap();
        let err = provider.request_input(Box::new(|_| {})).unwrap_err();
        assert_eq!(
            err.playback_kind(),
            Some(&PlaybackErrorKind::InputAlreadyPending("keyboard".to_string()))
        );
    }

    #[test]
    fn test_cancel_while_idle_is_noop() {
        let provider = TextEntryProvider::new("keyboard");
        provider.cancel();
        assert!(!provider.is_listening());
        assert!(!provider.submit("ignored"));
    }

    #[test]
    fn test_cancelled_request_never_fires() {
        let provider = TextEntryProvider::new("keyboard");
        provider
            .request_input(Box::new(|_| panic!("cancelled callback fired")))
            .unwrap();
        provider.cancel();
        assert!(!provider.submit("late"));
    }
}
