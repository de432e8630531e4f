//! Terminal host: characters print their lines, the UI prints questions,
//! and typed lines become player input.

use async_trait::async_trait;
use beatline_capability::{ChoiceClickProvider, CompositeInputProvider, TextEntryProvider};
use beatline_core::PerformanceData;
use beatline_interface::{
    CharacterController, ClipUi, InputProvider, InteractiveUi, QuizUi, UiErrorKind, UiFactory,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Reading pace used to size a printed line.
const DEFAULT_SECONDS_PER_WORD: f32 = 0.3;

/// Character that prints its dialogue instead of animating.
///
/// A performance "lasts" as long as it would take to read the line aloud.
#[derive(Debug, Clone)]
pub struct ConsoleCharacter {
    name: String,
    seconds_per_word: f32,
}

impl ConsoleCharacter {
    /// Create a console character.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seconds_per_word: DEFAULT_SECONDS_PER_WORD,
        }
    }

    /// Builder method to change the reading pace. Zero makes every line instant.
    pub fn with_seconds_per_word(mut self, seconds: f32) -> Self {
        self.seconds_per_word = seconds;
        self
    }

    /// How long `performance` holds the stage.
    pub fn reading_time(&self, performance: &PerformanceData) -> Duration {
        if !performance.is_talking() {
            return Duration::ZERO;
        }
        let words = performance.text().split_whitespace().count() as f32;
        Duration::try_from_secs_f32(words * self.seconds_per_word).unwrap_or(Duration::ZERO)
    }
}

impl CharacterController for ConsoleCharacter {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_performance(&self, performance: &PerformanceData) -> Duration {
        let mut direction = Vec::new();
        direction.extend(performance.mood().as_deref());
        direction.extend(performance.reaction().as_deref());
        direction.extend(performance.body_behavior().as_deref());

        if performance.is_talking() && !performance.text().is_empty() {
            if direction.is_empty() {
                println!("{}: {}", self.name, performance.text());
            } else {
                println!("{} ({}): {}", self.name, direction.join(", "), performance.text());
            }
        } else if !direction.is_empty() {
            println!("{} ({})", self.name, direction.join(", "));
        }

        self.reading_time(performance)
    }

    fn force_stop_audio(&self) {
        tracing::debug!(character = %self.name, "Audio stopped");
    }
}

/// Question UI rendered as numbered lines on stdout.
///
/// Always loaded and never animating.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    question: Mutex<String>,
    answers: Mutex<Vec<String>>,
}

impl ConsoleUi {
    /// Create an empty UI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers currently on screen; empty while hidden.
    pub fn answers(&self) -> Vec<String> {
        self.answers.lock().clone()
    }

    /// The answer shown as option `number`, counting from 1.
    pub fn answer_for(&self, number: usize) -> Option<String> {
        number
            .checked_sub(1)
            .and_then(|index| self.answers.lock().get(index).cloned())
    }
}

#[async_trait]
impl ClipUi for ConsoleUi {
    fn is_loaded(&self) -> bool {
        true
    }

    async fn show(&self) {
        println!();
        println!("{}", self.question.lock());
        for (index, answer) in self.answers.lock().iter().enumerate() {
            println!("  {}) {}", index + 1, answer);
        }
    }

    async fn hide(&self) {
        self.answers.lock().clear();
    }

    fn is_animating(&self) -> bool {
        false
    }
}

impl InteractiveUi for ConsoleUi {
    fn set_choices(&self, question: &str, answers: &[String]) {
        *self.question.lock() = question.to_string();
        *self.answers.lock() = answers.to_vec();
    }

    fn show_error(&self, kind: UiErrorKind) {
        println!("! {}", kind);
    }
}

impl QuizUi for ConsoleUi {
    fn show_correct_feedback(&self, _index: usize, text: &str) {
        println!("Correct! {}", text);
    }

    fn show_incorrect_feedback(&self, _user_index: usize, correct_index: Option<usize>, text: &str) {
        match correct_index.and_then(|index| self.answers.lock().get(index).cloned()) {
            Some(answer) => println!("Not quite, it was \"{}\". {}", answer, text),
            None => println!("Not quite. {}", text),
        }
    }
}

/// Serves the same [`ConsoleUi`] for every UI name.
#[derive(Debug, Clone)]
pub struct ConsoleUiFactory {
    ui: Arc<ConsoleUi>,
}

impl ConsoleUiFactory {
    /// Wrap a console UI.
    pub fn new(ui: Arc<ConsoleUi>) -> Self {
        Self { ui }
    }
}

impl UiFactory for ConsoleUiFactory {
    fn interactive_ui(&self, name: &str) -> Option<Arc<dyn InteractiveUi>> {
        tracing::trace!(ui = name, "Serving console UI");
        Some(self.ui.clone())
    }

    fn quiz_ui(&self, name: &str) -> Option<Arc<dyn QuizUi>> {
        tracing::trace!(ui = name, "Serving console UI");
        Some(self.ui.clone())
    }
}

/// Keyboard and "button" input raced behind one provider.
///
/// A line holding just an option number clicks that option; anything else
/// is typed text for the analyzer.
pub struct ConsoleInput {
    keyboard: Arc<TextEntryProvider>,
    buttons: Arc<ChoiceClickProvider>,
    provider: Arc<CompositeInputProvider>,
    ui: Arc<ConsoleUi>,
}

impl ConsoleInput {
    /// Input bound to the answers shown on `ui`.
    pub fn new(ui: Arc<ConsoleUi>) -> Self {
        let keyboard = Arc::new(TextEntryProvider::new("keyboard"));
        let buttons = Arc::new(ChoiceClickProvider::new("buttons"));
        let children: Vec<Arc<dyn InputProvider>> = vec![keyboard.clone(), buttons.clone()];
        let provider = Arc::new(CompositeInputProvider::new("console", children));
        Self {
            keyboard,
            buttons,
            provider,
            ui,
        }
    }

    /// The provider to hand to a conductor.
    pub fn provider(&self) -> Arc<dyn InputProvider> {
        self.provider.clone()
    }

    /// Route one line of player input. Returns false if nothing was waiting for it.
    pub fn feed(&self, line: &str) -> bool {
        let line = line.trim();
        match line.parse::<usize>().ok().and_then(|n| self.ui.answer_for(n)) {
            Some(answer) => {
                tracing::debug!(%answer, "Option picked by number");
                self.buttons.click(answer)
            }
            None => self.keyboard.submit(line),
        }
    }
}
