//! Per-clip character performance data.

use serde::{Deserialize, Serialize};

/// What one character does during one clip.
///
/// Performances are read-only during execution; the character controller
/// turns them into audio and animation and reports how long they take.
///
/// # Examples
///
/// ```
/// use beatline_core::PerformanceData;
///
/// let line = PerformanceData::new("Ada")
///     .speaking("Welcome back.")
///     .with_mood("Happy");
/// assert!(line.is_talking());
/// assert_eq!(line.mood().as_deref(), Some("Happy"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceData {
    /// Character this performance belongs to
    #[serde(rename = "name")]
    character: String,
    /// Line of dialogue
    #[serde(default)]
    text: String,
    /// Direct audio reference; controllers fall back to their own lookup when absent
    #[serde(default, rename = "audioClip", skip_serializing_if = "Option::is_none")]
    audio: Option<String>,
    /// Whether the character speaks in this clip
    #[serde(default)]
    #[getter(skip)]
    is_talking: bool,
    /// Sustained facial expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mood: Option<String>,
    /// One-shot facial animation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reaction: Option<String>,
    /// Full-body animation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body_behavior: Option<String>,
}

impl PerformanceData {
    /// Create a silent, neutral performance for a character.
    pub fn new(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            ..Self::default()
        }
    }

    /// Whether the character speaks in this clip.
    pub fn is_talking(&self) -> bool {
        self.is_talking
    }

    /// Builder method making the character speak a line.
    pub fn speaking(mut self, text: impl Into<String>) -> Self {
        self.is_talking = true;
        self.text = text.into();
        self
    }

    /// Builder method to set a direct audio reference.
    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Builder method to set the mood tag.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Builder method to set the reaction tag.
    pub fn with_reaction(mut self, reaction: impl Into<String>) -> Self {
        self.reaction = Some(reaction.into());
        self
    }

    /// Builder method to set the body-behavior tag.
    pub fn with_body_behavior(mut self, body_behavior: impl Into<String>) -> Self {
        self.body_behavior = Some(body_behavior.into());
        self
    }
}
