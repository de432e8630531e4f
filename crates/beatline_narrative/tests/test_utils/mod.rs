//! Test doubles for clip and conductor tests.

#![allow(dead_code)]

use async_trait::async_trait;
use beatline_core::{AnalysisContext, AnalysisContextKind, PerformanceData};
use beatline_error::{BeatlineResult, HttpError};
use beatline_interface::{
    Analyzer, CharacterController, ClipUi, InputCallback, InputProvider, InteractiveUi, QuizUi,
    UiErrorKind, UiFactory,
};
use beatline_narrative::{CharacterRegistry, ConductorEvent, PlaybackSettings, RuntimeContext};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

/// What an analyzer double should do on one call.
#[derive(Debug, Clone)]
pub enum Verdict {
    Match(usize),
    NoMatch,
    Fail,
    /// Wait this long, then match.
    Stall(Duration, usize),
}

/// Analyzer that replays a script of verdicts, then repeats `fallback`.
pub struct ScriptedAnalyzer {
    name: String,
    verdicts: Mutex<VecDeque<Verdict>>,
    fallback: Verdict,
    handles: Option<AnalysisContextKind>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl ScriptedAnalyzer {
    pub fn new(name: &str, verdicts: Vec<Verdict>, fallback: Verdict) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            verdicts: Mutex::new(verdicts.into()),
            fallback,
            handles: None,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        })
    }

    /// Analyzer that only accepts one context kind.
    pub fn only(name: &str, kind: AnalysisContextKind, fallback: Verdict) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            verdicts: Mutex::new(VecDeque::new()),
            fallback,
            handles: Some(kind),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn analyze(&self, context: &AnalysisContext) -> BeatlineResult<Option<usize>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs
            .lock()
            .unwrap()
            .push(context.user_input().to_string());
        let verdict = self
            .verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match verdict {
            Verdict::Match(index) => Ok(Some(index)),
            Verdict::NoMatch => Ok(None),
            Verdict::Fail => Err(HttpError::new("scorer unreachable").into()),
            Verdict::Stall(delay, index) => {
                tokio::time::sleep(delay).await;
                Ok(Some(index))
            }
        }
    }

    fn can_handle(&self, context: &AnalysisContext) -> bool {
        self.handles.is_none_or(|kind| kind == context.kind())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Analyzer that always picks the answer whose text equals `answer`.
pub struct FixedAnswerAnalyzer {
    pub answer: String,
}

#[async_trait]
impl Analyzer for FixedAnswerAnalyzer {
    async fn analyze(&self, context: &AnalysisContext) -> BeatlineResult<Option<usize>> {
        Ok(context.answers().iter().position(|a| *a == self.answer))
    }

    fn can_handle(&self, _context: &AnalysisContext) -> bool {
        true
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Input provider that answers immediately from a reply list.
///
/// Once the list is exhausted it repeats `fallback`, or holds the request
/// open forever when there is none.
pub struct ScriptedInput {
    replies: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    pending: Mutex<Option<InputCallback>>,
    requests: AtomicUsize,
    cancels: AtomicUsize,
}

impl ScriptedInput {
    pub fn replying(replies: &[&str]) -> Arc<Self> {
        Self::build(replies, None)
    }

    pub fn always(reply: &str) -> Arc<Self> {
        Self::build(&[], Some(reply))
    }

    pub fn silent() -> Arc<Self> {
        Self::build(&[], None)
    }

    fn build(replies: &[&str], fallback: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            fallback: fallback.map(str::to_string),
            pending: Mutex::new(None),
            requests: AtomicUsize::new(0),
            cancels: AtomicUsize::new(0),
        })
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl InputProvider for ScriptedInput {
    fn request_input(&self, on_result: InputCallback) -> BeatlineResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone());
        match reply {
            Some(text) => on_result(text),
            None => *self.pending.lock().unwrap() = Some(on_result),
        }
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.pending.lock().unwrap().take();
    }

    fn is_listening(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Everything a UI double was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Choices(String, Vec<String>),
    Shown,
    Hidden,
    Error(UiErrorKind),
    Correct(usize, String),
    Incorrect(usize, Option<usize>, String),
}

/// UI that is always loaded, never animating, and records every call.
#[derive(Default)]
pub struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
}

impl RecordingUi {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<UiErrorKind> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Error(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: UiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ClipUi for RecordingUi {
    fn is_loaded(&self) -> bool {
        true
    }

    async fn show(&self) {
        self.record(UiCall::Shown);
    }

    async fn hide(&self) {
        self.record(UiCall::Hidden);
    }

    fn is_animating(&self) -> bool {
        false
    }
}

impl InteractiveUi for RecordingUi {
    fn set_choices(&self, question: &str, answers: &[String]) {
        self.record(UiCall::Choices(question.to_string(), answers.to_vec()));
    }

    fn show_error(&self, kind: UiErrorKind) {
        self.record(UiCall::Error(kind));
    }
}

impl QuizUi for RecordingUi {
    fn show_correct_feedback(&self, index: usize, text: &str) {
        self.record(UiCall::Correct(index, text.to_string()));
    }

    fn show_incorrect_feedback(&self, user_index: usize, correct_index: Option<usize>, text: &str) {
        self.record(UiCall::Incorrect(user_index, correct_index, text.to_string()));
    }
}

/// Hands out the same [`RecordingUi`] for every name, or nothing at all.
pub struct SingleUiFactory {
    pub ui: Option<Arc<RecordingUi>>,
}

impl SingleUiFactory {
    pub fn new(ui: Arc<RecordingUi>) -> Arc<Self> {
        Arc::new(Self { ui: Some(ui) })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self { ui: None })
    }
}

impl UiFactory for SingleUiFactory {
    fn interactive_ui(&self, _name: &str) -> Option<Arc<dyn InteractiveUi>> {
        self.ui.clone().map(|ui| ui as Arc<dyn InteractiveUi>)
    }

    fn quiz_ui(&self, _name: &str) -> Option<Arc<dyn QuizUi>> {
        self.ui.clone().map(|ui| ui as Arc<dyn QuizUi>)
    }
}

/// Character that reports a fixed performance length.
pub struct RecordingCharacter {
    name: String,
    length: Duration,
    performances: AtomicUsize,
    audio_stops: AtomicUsize,
}

impl RecordingCharacter {
    pub fn new(name: &str, length: Duration) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            length,
            performances: AtomicUsize::new(0),
            audio_stops: AtomicUsize::new(0),
        })
    }

    pub fn performances(&self) -> usize {
        self.performances.load(Ordering::SeqCst)
    }

    pub fn audio_stops(&self) -> usize {
        self.audio_stops.load(Ordering::SeqCst)
    }
}

impl CharacterController for RecordingCharacter {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_performance(&self, _performance: &PerformanceData) -> Duration {
        self.performances.fetch_add(1, Ordering::SeqCst);
        self.length
    }

    fn force_stop_audio(&self) {
        self.audio_stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Collaborators for running single clips.
pub struct Harness {
    pub characters: CharacterRegistry,
    pub analyzer: Option<Arc<dyn Analyzer>>,
    pub input: Arc<dyn InputProvider>,
    pub ui: Arc<dyn UiFactory>,
    pub settings: PlaybackSettings,
    pub events: broadcast::Sender<ConductorEvent>,
}

impl Harness {
    pub fn new(input: Arc<dyn InputProvider>, ui: Arc<dyn UiFactory>) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            characters: CharacterRegistry::new(),
            analyzer: None,
            input,
            ui,
            settings: PlaybackSettings::default(),
            events,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_character(mut self, character: Arc<dyn CharacterController>) -> Self {
        self.characters.register(character);
        self
    }

    pub fn with_settings(mut self, settings: PlaybackSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn context(&self, clip_index: usize) -> RuntimeContext {
        RuntimeContext::new(
            clip_index,
            Arc::new(self.characters.clone()),
            self.analyzer.clone(),
            Arc::clone(&self.input),
            Arc::clone(&self.ui),
            Arc::new(self.settings.clone()),
            self.events.clone(),
        )
    }
}
