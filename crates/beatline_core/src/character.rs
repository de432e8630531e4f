//! Character roster entries.

use serde::{Deserialize, Serialize};

/// A character declared by a script.
///
/// Roster entries are created at load time and never change. The `name`
/// is the key used to find the character's runtime controller.
///
/// # Examples
///
/// ```
/// use beatline_core::CharacterInfo;
///
/// let ada = CharacterInfo::new("Ada").with_model("ada_rig_v2");
/// assert_eq!(ada.name(), "Ada");
/// assert_eq!(ada.model_name(), "ada_rig_v2");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct CharacterInfo {
    /// Roster name, matched against registered controllers
    name: String,
    /// Free-form description for authors
    #[serde(default)]
    description: String,
    /// External model reference
    #[serde(default, rename = "modelName")]
    model_name: String,
}

impl CharacterInfo {
    /// Create a roster entry with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            model_name: String::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the external model reference.
    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}
