//! Answer analyzers.

mod chat_completion;
mod dto;
mod exact;
mod keyword;

pub use chat_completion::{
    ANSWERS_PLACEHOLDER, ChatCompletionAnalyzer, ChatCompletionSettings, parse_reply,
};
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatRole};
pub use exact::ExactMatchAnalyzer;
pub use keyword::KeywordMatchAnalyzer;
