//! Small shared types for the capability traits.

/// Callback an input provider invokes with the text it collected.
pub type InputCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// User-facing error prompts an interactive UI can display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum UiErrorKind {
    /// The provider returned nothing usable
    #[display("I didn't catch that. Please try again.")]
    InputNotDetected,
    /// The analyzer could not match the input to an answer
    #[display("That doesn't match any of the choices. Please try again.")]
    AnalysisFailed,
    /// A remote analyzer could not be reached
    #[display("Couldn't reach the answer service. Please try again.")]
    NetworkConnection,
}
