//! Lifecycle notifications published by a conductor.

/// Something observable happened during playback.
///
/// Delivered over a broadcast channel owned by each
/// [`Conductor`](crate::Conductor); subscribers that fall behind lose the
/// oldest events.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConductorEvent {
    /// A clip began executing
    #[display("clip {} '{}' started", index, name)]
    ClipStarted {
        /// Clip index
        index: usize,
        /// Clip name
        name: String,
    },
    /// A choice or quiz put its question on screen
    #[display("clip {} asked '{}'", index, question)]
    ChoicePresented {
        /// Clip index
        index: usize,
        /// Question text
        question: String,
    },
    /// A quiz graded the player's answer
    #[display("clip {} answer {} correct: {}", index, answer, correct)]
    ResponseCorrectness {
        /// Clip index
        index: usize,
        /// Matched answer index
        answer: usize,
        /// Whether it was the correct one
        correct: bool,
    },
    /// Playback reached the end of the script
    #[display("clips finished")]
    ClipsFinished,
    /// Playback was stopped during a clip
    #[display("playback stopped at clip {}", index)]
    PlaybackStopped {
        /// Clip that was interrupted
        index: usize,
    },
}
