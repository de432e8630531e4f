//! Analyzers and input providers for the Beatline clip sequencer.
//!
//! # Analyzers
//!
//! - [`ExactMatchAnalyzer`] matches input equal to an answer, ignoring case
//! - [`KeywordMatchAnalyzer`] matches the first answer contained in the input
//! - [`ChatCompletionAnalyzer`] asks an OpenAI-compatible chat endpoint
//!
//! # Input providers
//!
//! - [`TextEntryProvider`] takes text the host submits, e.g. a typed line
//! - [`ChoiceClickProvider`] takes the label of a clicked choice button
//! - [`CompositeInputProvider`] races several providers; the first answer wins

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod input;

pub use analyzer::{
    ANSWERS_PLACEHOLDER, ChatChoice, ChatCompletionAnalyzer, ChatCompletionSettings, ChatMessage,
    ChatRequest, ChatResponse, ChatRole, ExactMatchAnalyzer, KeywordMatchAnalyzer, parse_reply,
};
pub use input::{ChoiceClickProvider, CompositeInputProvider, TextEntryProvider};
