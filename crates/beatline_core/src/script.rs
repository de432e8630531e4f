//! The script graph: ordered clips plus the character roster.

use crate::{CharacterInfo, Clip};

/// A branch target as declared in a script.
///
/// Non-negative values are clip indices; [`END_OF_SCRIPT`] ends playback.
pub type ClipTarget = i32;

/// Universal terminal sentinel.
pub const END_OF_SCRIPT: ClipTarget = -1;

/// Index of the entry clip.
pub const ENTRY_CLIP: usize = 0;

/// In-memory script: clip slots indexed by node id plus the roster.
///
/// A slot is `None` when the source document had an entry that could not
/// be turned into a clip. Slots are never compacted, so indices written by
/// authors stay valid.
///
/// # Examples
///
/// ```
/// use beatline_core::{Clip, ClipHeader, LinearClip, ScriptGraph};
///
/// let script = ScriptGraph::from_clips(vec![
///     Clip::from(LinearClip::new(ClipHeader::new("a"), 1)),
///     Clip::from(LinearClip::new(ClipHeader::new("b"), -1)),
/// ]);
/// assert_eq!(script.len(), 2);
/// assert_eq!(script.resolve(1), Some(1));
/// assert_eq!(script.resolve(-1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, derive_getters::Getters)]
pub struct ScriptGraph {
    /// Clip slots; index = node id
    slots: Vec<Option<Clip>>,
    /// Character roster
    characters: Vec<CharacterInfo>,
}

impl ScriptGraph {
    /// Create a script from slots and a roster.
    pub fn new(slots: Vec<Option<Clip>>, characters: Vec<CharacterInfo>) -> Self {
        Self { slots, characters }
    }

    /// Create a script with every slot filled and an empty roster.
    pub fn from_clips(clips: Vec<Clip>) -> Self {
        Self {
            slots: clips.into_iter().map(Some).collect(),
            characters: Vec::new(),
        }
    }

    /// Builder method to set the roster.
    pub fn with_characters(mut self, characters: Vec<CharacterInfo>) -> Self {
        self.characters = characters;
        self
    }

    /// Number of slots, filled or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the script has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The clip at `index`, if the slot exists and is filled.
    pub fn clip(&self, index: usize) -> Option<&Clip> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Turn a declared target into a playable index.
    ///
    /// Returns `None` for the terminal sentinel and for anything outside
    /// `[0, len)`.
    pub fn resolve(&self, target: ClipTarget) -> Option<usize> {
        usize::try_from(target).ok().filter(|index| *index < self.len())
    }
}
