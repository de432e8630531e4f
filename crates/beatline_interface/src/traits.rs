//! Analyzer, input provider and character controller contracts.

use crate::InputCallback;
use async_trait::async_trait;
use beatline_core::{AnalysisContext, PerformanceData};
use beatline_error::BeatlineResult;
use std::time::Duration;

/// Maps free-text input to one of a clip's candidate answers.
///
/// `Ok(None)` means "no match" and is distinct from `Ok(Some(0))`.
/// `Err` is reserved for failures to reach a backing service; the clip
/// shows a network prompt and asks again.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Classify the context's input against its answers.
    async fn analyze(&self, context: &AnalysisContext) -> BeatlineResult<Option<usize>>;

    /// Whether this analyzer understands the given context.
    ///
    /// Called at runtime before an override is used and by the
    /// validator with an empty context for each clip.
    fn can_handle(&self, context: &AnalysisContext) -> bool;

    /// Registry name.
    fn name(&self) -> &str;
}

/// Produces one text result per request, asynchronously.
///
/// An instance holds at most one outstanding request. A second
/// `request_input` while listening is rejected with
/// `PlaybackErrorKind::InputAlreadyPending`. The callback fires exactly
/// once for a request unless `cancel` runs first, in which case it never
/// fires. `cancel` while idle does nothing.
pub trait InputProvider: Send + Sync {
    /// Begin listening; `on_result` receives the collected text.
    fn request_input(&self, on_result: InputCallback) -> BeatlineResult<()>;

    /// Abandon the outstanding request, if any.
    fn cancel(&self);

    /// True while a request is outstanding.
    fn is_listening(&self) -> bool;

    /// Name used in logs and error messages.
    fn name(&self) -> &str;
}

/// Drives one on-screen character.
pub trait CharacterController: Send + Sync {
    /// Roster name this controller answers to.
    fn name(&self) -> &str;

    /// Start a performance and report how long it will run.
    ///
    /// Speech, mood, reaction and body behavior all start here; the clip
    /// waits out the returned duration.
    fn start_performance(&self, performance: &PerformanceData) -> Duration;

    /// Cut any audio this character is playing.
    fn force_stop_audio(&self);
}
