//! JSON script documents and the clip factory registry.
//!
//! A document looks like:
//!
//! ```json
//! {
//!   "Characters": [{ "name": "Ada" }],
//!   "Clips": [
//!     {
//!       "metadata": { "type": "LinearClip", "name": "intro", "duration": 2.0, "nextClip": -1 },
//!       "characters": [{ "name": "Ada", "isTalking": true, "text": "Hello." }]
//!     }
//!   ]
//! }
//! ```
//!
//! The `type` discriminator selects a constructor from a
//! [`ClipFactoryRegistry`]. Unknown discriminators abort the load; entries
//! with no discriminator become empty slots so later indices stay put.

use beatline_core::{
    CharacterInfo, ChoiceClip, Clip, ClipHeader, ClipTarget, DEFAULT_CHOICE_UI, END_OF_SCRIPT,
    LinearClip, PerformanceData, QuizClip, ScriptGraph,
};
use beatline_error::{BeatlineResult, ScriptError, ScriptErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Top-level script document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct ScriptDocument {
    /// Character roster
    #[serde(rename = "Characters", default)]
    characters: Vec<CharacterInfo>,
    /// Clip entries in node order
    #[serde(rename = "Clips", default)]
    clips: Vec<ClipEntry>,
}

/// One clip entry: metadata plus per-character performances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct ClipEntry {
    /// Discriminator, shared fields and variant fields
    #[serde(default)]
    metadata: ClipMetadata,
    /// Performances in playback order
    #[serde(default)]
    characters: Vec<PerformanceData>,
}

/// Everything a clip entry's `metadata` object may carry.
///
/// Variant fields are optional here; each constructor decides which it
/// needs and what their defaults are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase", default)]
pub struct ClipMetadata {
    /// Variant discriminator, e.g. `"LinearClip"`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    clip_type: Option<String>,
    /// Clip name
    name: String,
    /// Camera index
    camera: i32,
    /// Nominal duration in seconds
    duration: f32,
    /// Pause after the clip, in seconds
    end_delay: f32,
    /// Analyzer override
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzer: Option<String>,
    /// Linear successor
    #[serde(skip_serializing_if = "Option::is_none")]
    next_clip: Option<ClipTarget>,
    /// Interactive UI name
    #[serde(skip_serializing_if = "Option::is_none")]
    ui_name: Option<String>,
    /// Question shown by choice and quiz clips
    #[serde(skip_serializing_if = "Option::is_none")]
    question_text: Option<String>,
    /// Candidate answers
    #[serde(skip_serializing_if = "Option::is_none")]
    answers: Option<Vec<String>>,
    /// Successor per answer
    #[serde(skip_serializing_if = "Option::is_none")]
    next_clips: Option<Vec<ClipTarget>>,
    /// Correct quiz answer; negative means none
    #[serde(skip_serializing_if = "Option::is_none")]
    correct_answer_index: Option<i64>,
    /// Quiz feedback per answer
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<Vec<String>>,
}

impl Default for ClipMetadata {
    fn default() -> Self {
        Self {
            clip_type: None,
            name: String::new(),
            camera: -1,
            duration: 0.0,
            end_delay: 0.0,
            analyzer: None,
            next_clip: None,
            ui_name: None,
            question_text: None,
            answers: None,
            next_clips: None,
            correct_answer_index: None,
            feedback: None,
        }
    }
}

impl ClipMetadata {
    fn header(&self, performances: &[PerformanceData]) -> ClipHeader {
        let header = ClipHeader::new(self.name.clone())
            .with_camera(self.camera)
            .with_duration_secs(self.duration)
            .with_end_delay_secs(self.end_delay)
            .with_performances(performances.to_vec());
        match self.analyzer.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => header.with_analyzer(name),
            _ => header,
        }
    }

    fn from_header(clip_type: &str, header: &ClipHeader) -> Self {
        Self {
            clip_type: Some(clip_type.to_string()),
            name: header.name().clone(),
            camera: *header.camera(),
            duration: *header.duration_secs(),
            end_delay: *header.end_delay_secs(),
            analyzer: header.analyzer().clone(),
            ..Self::default()
        }
    }
}

/// Builds a clip from the entry at a given index.
pub type ClipFactory = Arc<dyn Fn(usize, &ClipEntry) -> Result<Clip, ScriptError> + Send + Sync>;

/// Maps clip discriminators to constructors.
///
/// # Examples
///
/// ```
/// use beatline_narrative::ClipFactoryRegistry;
///
/// let registry = ClipFactoryRegistry::with_builtin().unwrap();
/// assert!(registry.contains("QuizClip"));
/// assert!(!registry.contains("FadeClip"));
/// ```
#[derive(Clone, Default)]
pub struct ClipFactoryRegistry {
    factories: HashMap<String, ClipFactory>,
}

impl ClipFactoryRegistry {
    /// Discriminator for [`LinearClip`].
    pub const LINEAR: &'static str = "LinearClip";
    /// Discriminator for [`ChoiceClip`].
    pub const CHOICE: &'static str = "ChoiceClip";
    /// Discriminator for [`QuizClip`].
    pub const QUIZ: &'static str = "QuizClip";

    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the three built-in clip types.
    ///
    /// # Errors
    ///
    /// Never fails in practice; registration errors only arise from
    /// duplicate names.
    pub fn with_builtin() -> BeatlineResult<Self> {
        let mut registry = Self::new();
        registry.register(Self::LINEAR, Arc::new(build_linear))?;
        registry.register(Self::CHOICE, Arc::new(build_choice_clip))?;
        registry.register(Self::QUIZ, Arc::new(build_quiz))?;
        Ok(registry)
    }

    /// Register a constructor for `clip_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptErrorKind::DuplicateClipType`] if the name is taken.
    pub fn register(
        &mut self,
        clip_type: impl Into<String>,
        factory: ClipFactory,
    ) -> Result<(), ScriptError> {
        let clip_type = clip_type.into();
        if self.factories.contains_key(&clip_type) {
            return Err(ScriptError::new(ScriptErrorKind::DuplicateClipType(clip_type)));
        }
        tracing::debug!(clip_type = %clip_type, "Registering clip type");
        self.factories.insert(clip_type, factory);
        Ok(())
    }

    /// True if `clip_type` has a constructor.
    pub fn contains(&self, clip_type: &str) -> bool {
        self.factories.contains_key(clip_type)
    }

    /// Build the clip for one entry.
    ///
    /// Returns `Ok(None)` for an entry without a discriminator.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptErrorKind::UnknownClipType`] for an unregistered
    /// discriminator, or whatever the constructor rejects.
    pub fn build(&self, index: usize, entry: &ClipEntry) -> Result<Option<Clip>, ScriptError> {
        let clip_type = match entry.metadata.clip_type.as_deref().map(str::trim) {
            Some(clip_type) if !clip_type.is_empty() => clip_type,
            _ => {
                tracing::warn!(
                    index,
                    name = %entry.metadata.name,
                    "Clip entry has no type, leaving slot empty"
                );
                return Ok(None);
            }
        };

        let factory = self.factories.get(clip_type).ok_or_else(|| {
            ScriptError::new(ScriptErrorKind::UnknownClipType(clip_type.to_string()))
        })?;
        factory(index, entry).map(Some)
    }
}

impl std::fmt::Debug for ClipFactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ClipFactoryRegistry")
            .field("clip_types", &names)
            .finish()
    }
}

fn build_linear(_index: usize, entry: &ClipEntry) -> Result<Clip, ScriptError> {
    let metadata = &entry.metadata;
    Ok(LinearClip::new(
        metadata.header(&entry.characters),
        metadata.next_clip.unwrap_or(END_OF_SCRIPT),
    )
    .into())
}

fn build_choice(entry: &ClipEntry) -> Result<ChoiceClip, ScriptError> {
    let metadata = &entry.metadata;
    let choice = ChoiceClip::new(
        metadata.header(&entry.characters),
        metadata.question_text.clone().unwrap_or_default(),
        metadata.answers.clone().unwrap_or_default(),
        metadata.next_clips.clone().unwrap_or_default(),
    )?;
    Ok(choice.with_ui_name(
        metadata
            .ui_name
            .clone()
            .unwrap_or_else(|| DEFAULT_CHOICE_UI.to_string()),
    ))
}

fn build_choice_clip(_index: usize, entry: &ClipEntry) -> Result<Clip, ScriptError> {
    build_choice(entry).map(Clip::from)
}

fn build_quiz(index: usize, entry: &ClipEntry) -> Result<Clip, ScriptError> {
    let choice = build_choice(entry)?;
    let answers = choice.answers().len();
    let correct = match entry.metadata.correct_answer_index {
        Some(raw) if raw >= 0 => match usize::try_from(raw) {
            Ok(answer) if answer < answers => Some(answer),
            _ => {
                tracing::warn!(
                    index,
                    clip = %entry.metadata.name,
                    correct_answer_index = raw,
                    answers,
                    "Correct answer is outside the answer list; quiz has no correct answer"
                );
                None
            }
        },
        _ => None,
    };
    let feedback = entry.metadata.feedback.clone().unwrap_or_default();
    QuizClip::new(choice, feedback, correct).map(Clip::from)
}

impl ScriptDocument {
    /// Describe `script` as a document. Empty slots become untyped entries.
    pub fn from_graph(script: &ScriptGraph) -> Self {
        let clips = script
            .slots()
            .iter()
            .map(|slot| slot.as_ref().map(ClipEntry::from_clip).unwrap_or_default())
            .collect();
        Self {
            characters: script.characters().clone(),
            clips,
        }
    }

    /// Build a script graph with the constructors in `registry`.
    ///
    /// # Errors
    ///
    /// Fails on the first entry a constructor rejects or whose type is unknown.
    pub fn to_graph(&self, registry: &ClipFactoryRegistry) -> Result<ScriptGraph, ScriptError> {
        let slots = self
            .clips
            .iter()
            .enumerate()
            .map(|(index, entry)| registry.build(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScriptGraph::new(slots, self.characters.clone()))
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptErrorKind::Serialize`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ScriptError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScriptError::new(ScriptErrorKind::Serialize(e.to_string())))
    }
}

impl ClipEntry {
    fn from_clip(clip: &Clip) -> Self {
        let header = clip.header();
        let metadata = match clip {
            Clip::Linear(linear) => ClipMetadata {
                next_clip: Some(*linear.next_clip()),
                ..ClipMetadata::from_header(ClipFactoryRegistry::LINEAR, header)
            },
            Clip::Choice(choice) => choice_metadata(ClipFactoryRegistry::CHOICE, choice),
            Clip::Quiz(quiz) => ClipMetadata {
                correct_answer_index: Some(
                    (*quiz.correct_answer())
                        .and_then(|answer| i64::try_from(answer).ok())
                        .unwrap_or(-1),
                ),
                feedback: Some(quiz.feedback().clone()),
                ..choice_metadata(ClipFactoryRegistry::QUIZ, quiz.choice())
            },
        };
        Self {
            metadata,
            characters: header.performances().clone(),
        }
    }
}

fn choice_metadata(clip_type: &str, choice: &ChoiceClip) -> ClipMetadata {
    ClipMetadata {
        ui_name: Some(choice.ui_name().clone()),
        question_text: Some(choice.question().clone()),
        answers: Some(choice.answers().clone()),
        next_clips: Some(choice.next_clips().clone()),
        ..ClipMetadata::from_header(clip_type, choice.header())
    }
}

/// Parse a JSON script document and build its graph.
///
/// # Errors
///
/// Returns a [`ScriptErrorKind::Parse`] error for malformed JSON, and any
/// error raised while building clips.
#[tracing::instrument(skip_all, fields(bytes = json.len()))]
pub fn load_script(json: &str, registry: &ClipFactoryRegistry) -> BeatlineResult<ScriptGraph> {
    let document: ScriptDocument = serde_json::from_str(json)
        .map_err(|e| ScriptError::new(ScriptErrorKind::Parse(e.to_string())))?;
    let script = document.to_graph(registry)?;
    tracing::info!(
        clips = script.len(),
        characters = script.characters().len(),
        "Script loaded"
    );
    Ok(script)
}

/// Read and load a JSON script file.
///
/// # Errors
///
/// Returns a [`ScriptErrorKind::FileRead`] error if the file cannot be
/// read, otherwise as [`load_script`].
#[tracing::instrument(skip_all)]
pub fn load_script_file(
    path: impl AsRef<Path>,
    registry: &ClipFactoryRegistry,
) -> BeatlineResult<ScriptGraph> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading script file");
    let json = std::fs::read_to_string(path).map_err(|e| {
        ScriptError::new(ScriptErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    load_script(&json, registry)
}
