//! The serial playback loop.

use crate::{
    AnalyzerRegistry, CharacterRegistry, ClipOutcome, ConductorEvent, PlaybackSettings,
    RuntimeContext, ScriptValidator, StopSignal, run_clip,
};
use beatline_core::{Clip, ENTRY_CLIP, END_OF_SCRIPT, ScriptGraph, ValidationResult};
use beatline_error::{BeatlineResult, PlaybackError, PlaybackErrorKind};
use beatline_interface::{Analyzer, InputProvider, UiFactory};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The script reached its terminal sentinel or ran off the end
    Finished,
    /// A stop request interrupted the clip at `index`
    Stopped {
        /// Interrupted clip
        index: usize,
    },
}

/// Record of one playback run.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PlaybackSummary {
    /// Clip indices in the order they were executed
    visited: Vec<usize>,
    /// How the run ended
    outcome: PlaybackOutcome,
}

struct ActiveRun {
    stop: StopSignal,
    finished: watch::Receiver<bool>,
}

impl ActiveRun {
    /// Resolves once the run's task is gone, however it ended.
    async fn finished(mut self) {
        let _ = self.finished.wait_for(|done| *done).await;
    }
}

/// Drives a script one clip at a time.
///
/// A conductor owns its event channel and its collaborators; there is no
/// global instance. At most one run is active at a time: [`start`] stops
/// whatever is playing before beginning again at clip 0.
///
/// [`start`]: Conductor::start
pub struct Conductor {
    runner: Runner,
    active: Mutex<Option<ActiveRun>>,
}

#[derive(Clone)]
struct Runner {
    script: Arc<ScriptGraph>,
    input: Arc<dyn InputProvider>,
    ui: Arc<dyn UiFactory>,
    characters: Arc<CharacterRegistry>,
    analyzers: Arc<AnalyzerRegistry>,
    default_analyzer: Option<Arc<dyn Analyzer>>,
    settings: Arc<PlaybackSettings>,
    events: broadcast::Sender<ConductorEvent>,
    current: Arc<Mutex<Option<usize>>>,
}

impl Conductor {
    /// Create a conductor for `script`.
    pub fn new(
        script: ScriptGraph,
        input: Arc<dyn InputProvider>,
        ui: Arc<dyn UiFactory>,
    ) -> Self {
        let settings = PlaybackSettings::default();
        let (events, _) = broadcast::channel(*settings.event_capacity());
        Self {
            runner: Runner {
                script: Arc::new(script),
                input,
                ui,
                characters: Arc::new(CharacterRegistry::new()),
                analyzers: Arc::new(AnalyzerRegistry::new()),
                default_analyzer: None,
                settings: Arc::new(settings),
                events,
                current: Arc::new(Mutex::new(None)),
            },
            active: Mutex::new(None),
        }
    }

    /// Builder method to set the character controllers.
    pub fn with_characters(mut self, characters: CharacterRegistry) -> Self {
        self.runner.characters = Arc::new(characters);
        self
    }

    /// Builder method to set the analyzers clips may name as overrides.
    ///
    /// If the playback settings name a default analyzer and none was set
    /// explicitly, it is looked up here.
    pub fn with_analyzers(mut self, analyzers: AnalyzerRegistry) -> Self {
        self.runner.analyzers = Arc::new(analyzers);
        self.resolve_configured_default();
        self
    }

    /// Builder method to set the analyzer used when a clip names none.
    pub fn with_default_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.runner.default_analyzer = Some(analyzer);
        self
    }

    /// Builder method to replace the playback settings.
    ///
    /// Recreates the event channel; call before [`subscribe`](Self::subscribe).
    pub fn with_settings(mut self, settings: PlaybackSettings) -> Self {
        let (events, _) = broadcast::channel((*settings.event_capacity()).max(1));
        self.runner.events = events;
        self.runner.settings = Arc::new(settings);
        self.resolve_configured_default();
        self
    }

    fn resolve_configured_default(&mut self) {
        if self.runner.default_analyzer.is_some() {
            return;
        }
        if let Some(name) = self.runner.settings.default_analyzer() {
            match self.runner.analyzers.get(name) {
                Some(analyzer) => {
                    tracing::debug!(analyzer = %name, "Using configured default analyzer");
                    self.runner.default_analyzer = Some(analyzer);
                }
                None => {
                    tracing::debug!(analyzer = %name, "Configured default analyzer not registered yet");
                }
            }
        }
    }

    /// The script being played.
    pub fn script(&self) -> &ScriptGraph {
        &self.runner.script
    }

    /// Receive lifecycle events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ConductorEvent> {
        self.runner.events.subscribe()
    }

    /// Index of the clip currently executing, if any.
    pub fn current_clip(&self) -> Option<usize> {
        *self.runner.current.lock()
    }

    /// Validate the script against this conductor's registries.
    pub fn validate(&self) -> Vec<ValidationResult> {
        let mut validator = ScriptValidator::new()
            .with_characters(self.runner.characters.names())
            .with_analyzers(&self.runner.analyzers);
        if let Some(analyzer) = &self.runner.default_analyzer {
            validator = validator.with_default_analyzer(analyzer.as_ref());
        }
        validator.validate(Some(&self.runner.script))
    }

    /// Begin playback at the entry clip, stopping any run in flight.
    ///
    /// Waits for the previous run to wind down before the new one starts,
    /// so two runs never drive clips at once. The returned handle resolves
    /// when the new run ends.
    #[tracing::instrument(skip(self), fields(clips = self.runner.script.len()))]
    pub async fn start(&self) -> JoinHandle<BeatlineResult<PlaybackSummary>> {
        let previous = self.active.lock().take();
        if let Some(previous) = previous {
            tracing::info!("Restarting playback, stopping previous run");
            previous.stop.stop();
            previous.finished().await;
        }

        let stop = StopSignal::new();
        let (done, finished) = watch::channel(false);
        let runner = self.runner.clone();
        let run_stop = stop.clone();
        let handle = tokio::spawn(async move {
            let result = runner.run(run_stop).await;
            let _ = done.send(true);
            result
        });

        let replaced = self.active.lock().replace(ActiveRun { stop, finished });
        if let Some(replaced) = replaced {
            replaced.stop.stop();
        }
        handle
    }

    /// Start playback and wait for it to end.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the run, or
    /// [`PlaybackErrorKind::RunAborted`] if the playback task panicked.
    pub async fn play(&self) -> BeatlineResult<PlaybackSummary> {
        match self.start().await.await {
            Ok(result) => result,
            Err(error) => {
                Err(PlaybackError::new(PlaybackErrorKind::RunAborted(error.to_string())).into())
            }
        }
    }

    /// Ask the active clip to stop at its next suspension point.
    ///
    /// The run then ends with [`PlaybackOutcome::Stopped`]. Does nothing
    /// when idle.
    pub fn stop(&self) {
        match self.active.lock().as_ref() {
            Some(active) => {
                tracing::info!(clip = ?self.current_clip(), "Stopping playback");
                active.stop.stop();
            }
            None => tracing::debug!("Stop requested while idle"),
        }
    }
}

impl Runner {
    #[tracing::instrument(name = "playback", skip_all)]
    async fn run(self, stop: StopSignal) -> BeatlineResult<PlaybackSummary> {
        let mut visited = Vec::new();
        let mut target = ENTRY_CLIP as i32;

        let outcome = loop {
            let Some(index) = self.script.resolve(target) else {
                if target != END_OF_SCRIPT {
                    tracing::warn!(target, "Branch target outside the script, ending playback");
                }
                break PlaybackOutcome::Finished;
            };

            let clip = match self.script.clip(index) {
                Some(clip) => clip,
                None => {
                    *self.current.lock() = None;
                    return Err(PlaybackError::new(PlaybackErrorKind::MissingClip(index)).into());
                }
            };

            *self.current.lock() = Some(index);
            visited.push(index);
            tracing::info!(index, clip = clip.name(), "Clip started");
            self.emit(ConductorEvent::ClipStarted {
                index,
                name: clip.name().to_string(),
            });

            let context = self.context_for(index, clip);
            let outcome = match run_clip(clip, &context, &stop).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    *self.current.lock() = None;
                    return Err(error);
                }
            };

            match outcome {
                ClipOutcome::Advance(next) => target = next,
                ClipOutcome::Stopped => {
                    self.emit(ConductorEvent::PlaybackStopped { index });
                    break PlaybackOutcome::Stopped { index };
                }
            }
        };

        *self.current.lock() = None;
        if outcome == PlaybackOutcome::Finished {
            tracing::info!(clips = visited.len(), "Clips finished");
            self.emit(ConductorEvent::ClipsFinished);
        }
        Ok(PlaybackSummary { visited, outcome })
    }

    fn context_for(&self, index: usize, clip: &Clip) -> RuntimeContext {
        RuntimeContext::new(
            index,
            Arc::clone(&self.characters),
            self.analyzer_for(clip),
            Arc::clone(&self.input),
            Arc::clone(&self.ui),
            Arc::clone(&self.settings),
            self.events.clone(),
        )
    }

    /// A clip's override wins when it is registered and can handle the
    /// clip's context; otherwise the default applies.
    fn analyzer_for(&self, clip: &Clip) -> Option<Arc<dyn Analyzer>> {
        let Some(name) = clip.header().analyzer() else {
            return self.default_analyzer.clone();
        };

        match self.analyzers.get(name) {
            Some(analyzer) if analyzer.can_handle(&clip.validation_context()) => {
                tracing::debug!(analyzer = %name, "Using analyzer override");
                Some(analyzer)
            }
            Some(_) => {
                tracing::warn!(
                    analyzer = %name,
                    context = %clip.validation_context().kind(),
                    "Analyzer override cannot handle this clip, using default"
                );
                self.default_analyzer.clone()
            }
            None => {
                tracing::warn!(analyzer = %name, "Analyzer override not registered, using default");
                self.default_analyzer.clone()
            }
        }
    }

    fn emit(&self, event: ConductorEvent) {
        let _ = self.events.send(event);
    }
}
