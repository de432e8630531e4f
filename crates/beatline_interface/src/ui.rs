//! UI collaborator contracts.
//!
//! Rendering belongs to the host. Clips only need to know when a UI has
//! finished loading or animating, and to hand it text to display.

use crate::UiErrorKind;
use async_trait::async_trait;
use std::sync::Arc;

/// Lifecycle shared by every clip UI.
#[async_trait]
pub trait ClipUi: Send + Sync {
    /// True once the UI is ready to be shown.
    fn is_loaded(&self) -> bool;

    /// Reveal the UI, resolving when the reveal has started.
    async fn show(&self);

    /// Dismiss the UI, resolving when the dismissal has started.
    async fn hide(&self);

    /// True while a show, hide or feedback animation is playing.
    fn is_animating(&self) -> bool;
}

/// UI for clips that ask a question.
pub trait InteractiveUi: ClipUi {
    /// Display the question and its answers.
    fn set_choices(&self, question: &str, answers: &[String]);

    /// Display a retry prompt.
    fn show_error(&self, kind: UiErrorKind);
}

/// UI for clips that grade the answer.
pub trait QuizUi: InteractiveUi {
    /// The user picked the correct answer.
    fn show_correct_feedback(&self, index: usize, text: &str);

    /// The user picked `user_index`; `correct_index` is what the author expected.
    fn show_incorrect_feedback(&self, user_index: usize, correct_index: Option<usize>, text: &str);
}

/// Looks up UIs by the name a clip asks for.
pub trait UiFactory: Send + Sync {
    /// UI for a choice clip.
    fn interactive_ui(&self, name: &str) -> Option<Arc<dyn InteractiveUi>>;

    /// UI for a quiz clip.
    fn quiz_ui(&self, name: &str) -> Option<Arc<dyn QuizUi>>;
}
