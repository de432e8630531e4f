//! Remote answer matching through an OpenAI-compatible chat completion API.

use crate::analyzer::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
use async_trait::async_trait;
use beatline_core::AnalysisContext;
use beatline_error::{BeatlineResult, HttpError, JsonError};
use beatline_interface::Analyzer;
use derive_getters::Getters;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_SYSTEM_PROMPT: &str = "You match a player's reply in an interactive story to one of \
several numbered options. The options are:\n{answers}\n\
Reply with only the number of the option closest in meaning to the player's reply. \
If no option fits, reply with -1.";

/// Placeholder in the system prompt replaced by the numbered answer list.
pub const ANSWERS_PLACEHOLDER: &str = "{answers}";

/// Connection and prompt settings for [`ChatCompletionAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ChatCompletionSettings {
    /// Full URL of the chat completions endpoint
    endpoint: String,
    /// Model identifier
    model: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// System prompt; `{answers}` is replaced by the numbered answers
    system_prompt: String,
    /// Sampling temperature
    temperature: Option<f32>,
}

impl Default for ChatCompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: Some(0.0),
        }
    }
}

impl ChatCompletionSettings {
    /// Builder method to point at another endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builder method to pick another model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method to read the key from another variable.
    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    /// Builder method to replace the system prompt.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

/// Interpret a model reply as an answer index.
///
/// Anything that is not an integer in `0..answer_count` is "no match",
/// including the model's explicit `-1`.
///
/// # Examples
///
/// ```
/// use beatline_capability::parse_reply;
///
/// assert_eq!(parse_reply(" 1\n", 3), Some(1));
/// assert_eq!(parse_reply("-1", 3), None);
/// assert_eq!(parse_reply("3", 3), None);
/// assert_eq!(parse_reply("the second one", 3), None);
/// ```
pub fn parse_reply(reply: &str, answer_count: usize) -> Option<usize> {
    reply
        .trim()
        .trim_end_matches('.')
        .parse::<i64>()
        .ok()
        .and_then(|index| usize::try_from(index).ok())
        .filter(|index| *index < answer_count)
}

/// Analyzer backed by a remote language model.
///
/// Transport failures and non-success statuses are returned as errors so
/// the clip can show a network prompt. A missing API key or an unreadable
/// reply is "no match".
#[derive(Debug, Clone)]
pub struct ChatCompletionAnalyzer {
    client: Client,
    settings: ChatCompletionSettings,
    api_key: Option<String>,
}

impl ChatCompletionAnalyzer {
    /// Registry name.
    pub const NAME: &'static str = "remote";

    /// Creates an analyzer, reading the API key from the configured variable.
    #[instrument(skip_all, fields(model = %settings.model()))]
    pub fn new(settings: ChatCompletionSettings) -> Self {
        let api_key = std::env::var(settings.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!(env = %settings.api_key_env(), "API key not set; remote analysis will never match");
        }
        Self {
            client: Client::new(),
            settings,
            api_key,
        }
    }

    /// Builder method to reuse an existing HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Builder method to supply the API key directly.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Active settings.
    pub fn settings(&self) -> &ChatCompletionSettings {
        &self.settings
    }

    /// The system prompt with the answers filled in, one `index: text` per line.
    pub fn system_prompt(&self, answers: &[String]) -> String {
        let numbered = answers
            .iter()
            .enumerate()
            .map(|(index, answer)| format!("{}: {}\n", index, answer))
            .collect::<String>();
        self.settings
            .system_prompt
            .replace(ANSWERS_PLACEHOLDER, &numbered)
    }

    fn build_request(&self, context: &AnalysisContext) -> BeatlineResult<ChatRequest> {
        let system = ChatMessage::builder()
            .role(ChatRole::System)
            .content(self.system_prompt(context.answers()))
            .build()
            .map_err(|e| JsonError::new(format!("Builder error: {}", e)))?;
        let user = ChatMessage::builder()
            .role(ChatRole::User)
            .content(context.user_input())
            .build()
            .map_err(|e| JsonError::new(format!("Builder error: {}", e)))?;

        let request = ChatRequest::builder()
            .model(self.settings.model.clone())
            .messages(vec![system, user])
            .temperature(self.settings.temperature)
            .build()
            .map_err(|e| JsonError::new(format!("Builder error: {}", e)))?;
        Ok(request)
    }
}

#[async_trait]
impl Analyzer for ChatCompletionAnalyzer {
    #[instrument(skip(self, context), fields(model = %self.settings.model, answers = context.answers().len()))]
    async fn analyze(&self, context: &AnalysisContext) -> BeatlineResult<Option<usize>> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!(env = %self.settings.api_key_env, "API key not set; treating input as unmatched");
            return Ok(None);
        };

        let request = self.build_request(context)?;
        debug!(endpoint = %self.settings.endpoint, "Sending chat completion request");

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(HttpError::with_status(status, error_text).into());
        }

        let body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to parse chat completion response");
                return Ok(None);
            }
        };

        let Some(reply) = body.choices().first().map(|choice| choice.message().content()) else {
            warn!("Chat completion response had no choices");
            return Ok(None);
        };

        let matched = parse_reply(reply, context.answers().len());
        debug!(reply = %reply, ?matched, "Remote analysis finished");
        Ok(matched)
    }

    fn can_handle(&self, _context: &AnalysisContext) -> bool {
        true
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
