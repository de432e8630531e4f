//! Per-clip runtime context.

use crate::{CharacterRegistry, ConductorEvent, PlaybackSettings};
use beatline_interface::{Analyzer, InputProvider, UiFactory};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything a clip may touch while it runs.
///
/// Built fresh by the conductor for each clip execution and never mutated
/// afterwards. Collaborators are shared handles; the context owns none of
/// them.
#[derive(Clone, derive_getters::Getters)]
pub struct RuntimeContext {
    /// Index of the clip being executed
    clip_index: usize,
    /// Controllers for the script's characters
    characters: Arc<CharacterRegistry>,
    /// Effective analyzer after override resolution
    analyzer: Option<Arc<dyn Analyzer>>,
    /// Active input provider
    input: Arc<dyn InputProvider>,
    /// Source of interactive UIs
    ui: Arc<dyn UiFactory>,
    /// Playback tuning
    settings: Arc<PlaybackSettings>,
    #[getter(skip)]
    events: broadcast::Sender<ConductorEvent>,
}

impl RuntimeContext {
    /// Assemble a context for the clip at `clip_index`.
    pub fn new(
        clip_index: usize,
        characters: Arc<CharacterRegistry>,
        analyzer: Option<Arc<dyn Analyzer>>,
        input: Arc<dyn InputProvider>,
        ui: Arc<dyn UiFactory>,
        settings: Arc<PlaybackSettings>,
        events: broadcast::Sender<ConductorEvent>,
    ) -> Self {
        Self {
            clip_index,
            characters,
            analyzer,
            input,
            ui,
            settings,
            events,
        }
    }

    /// Publish an event. Having no subscribers is fine.
    pub fn emit(&self, event: ConductorEvent) {
        tracing::trace!(%event, "Publishing conductor event");
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("clip_index", &self.clip_index)
            .field("characters", &self.characters)
            .field("analyzer", &self.analyzer.as_ref().map(|a| a.name().to_string()))
            .field("input", &self.input.name())
            .field("settings", &self.settings)
            .finish()
    }
}
