//! The completion-client contract shared by every client implementation.
//!
//! A [`CompletionClient`] answers chat-completion requests, either as a single
//! [`CompletionResult`] or as a lazy [`CompletionStream`] of [`StreamChunk`]s, and reports
//! token accounting for the conversations it is handed. It does not keep track of the
//! conversation itself: callers own their [`Message`]s and pass them by reference on every
//! call.
//!
//! # Example
//!
//! ```rust
//! use mockllm::completion_client::{CompletionClient, CompletionOptions, Message, StreamChunk};
//! use mockllm::clients::mock::MockCompletionClient;
//! use futures_util::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MockCompletionClient::new("mock-gpt-4");
//!     let messages = vec![Message::user("Say 'Hello World!'")];
//!     let options = CompletionOptions::default();
//!
//!     let result = client.complete(&messages, &options).await?;
//!     assert_eq!(result.usage.total_tokens, 25);
//!
//!     let mut stream = client.complete_stream(&messages, &options);
//!     while let Some(chunk) = stream.next().await {
//!         match chunk? {
//!             StreamChunk::Text(fragment) => print!("{}", fragment),
//!             StreamChunk::Final(result) => println!("\n[{}]", result.finish_reason.as_str()),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use crate::mockllm::error::ClientError;
use async_trait::async_trait;
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::pin::Pin;
use std::sync::Arc;

/// Represents the possible roles for a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    // set by the developer to steer the model's responses
    System,
    // a message sent by a human user (or app user)
    User,
    // content generated by the model in response to a user message
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// The payload carried by a [`Message`].
///
/// Only [`MessageContent::Text`] participates in token counting; how other kinds are
/// treated is decided by the client (see
/// [`NonTextPolicy`](crate::mockllm::config::NonTextPolicy)).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: Arc<str> },
    Image { media_type: String, data: String },
}

impl MessageContent {
    /// The textual content, if this is a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Short label naming the content kind, used in error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text { .. } => "text",
            MessageContent::Image { .. } => "image",
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text {
            text: Arc::from(text),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text {
            text: Arc::from(text.as_str()),
        }
    }
}

/// One turn in a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role associated with the message.
    pub role: Role,
    /// The actual content of the message.
    pub content: MessageContent,
}

impl Message {
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    pub fn system(text: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

/// Why the model stopped producing output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
}

impl FinishReason {
    /// The wire name of the finish reason (e.g. `"stop"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::ToolCalls => "tool_calls",
        }
    }
}

/// How many tokens were spent on prompt vs. completion.
///
/// `total_tokens` always equals `prompt_tokens + completion_tokens` for values built with
/// [`TokenUsage::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

impl TokenUsage {
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        TokenUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Aggregate usage reported by [`CompletionClient::actual_usage`] and
/// [`CompletionClient::total_usage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_tokens: usize,
}

/// The answer to a non-streaming completion request, or the terminal item of a stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Generated text. Empty when this is the terminal item of a stream.
    pub content: String,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
    /// Whether the result was served from a cache.
    pub cached: bool,
}

/// One item of a streamed completion.
///
/// A stream yields any number of [`StreamChunk::Text`] fragments followed by exactly one
/// [`StreamChunk::Final`] carrying the authoritative finish reason and usage.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamChunk {
    Text(String),
    Final(CompletionResult),
}

impl StreamChunk {
    pub fn is_final(&self) -> bool {
        matches!(self, StreamChunk::Final(_))
    }
}

/// Lazy stream of completion chunks returned by [`CompletionClient::complete_stream`].
pub type CompletionStream<'a> =
    Pin<Box<dyn Stream<Item = Result<StreamChunk, ClientError>> + Send + 'a>>;

/// Open configuration bag accepted by every client operation.
///
/// `model` overrides the client's default model for a single call. Any other option is
/// carried as a JSON value; clients ignore keys they do not recognise.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Trait defining the interface agents use to talk to a completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier used when a call does not override it.
    fn model_name(&self) -> &str;

    /// Send the conversation and wait for the full response.
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, ClientError>;

    /// Send the conversation and receive the response as a stream of fragments, terminated
    /// by a single [`StreamChunk::Final`].
    ///
    /// Dropping the stream before it ends abandons the request.
    fn complete_stream<'a>(
        &'a self,
        messages: &'a [Message],
        options: &'a CompletionOptions,
    ) -> CompletionStream<'a>;

    /// Approximate the number of tokens the conversation occupies.
    fn count_tokens(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<usize, ClientError>;

    /// Size of the context window tokens are budgeted against.
    fn token_limit(&self) -> usize;

    /// Tokens left in the context window after `messages`. Negative when over budget.
    fn remaining_tokens(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<i64, ClientError> {
        let used = self.count_tokens(messages, options)?;
        Ok(self.token_limit() as i64 - used as i64)
    }

    /// Usage reported for the most recent call.
    fn actual_usage(&self) -> UsageSummary;

    /// Usage reported over the lifetime of the client.
    fn total_usage(&self) -> UsageSummary;

    /// Release any resources held by the client. Safe to call on every exit path.
    async fn close(&self) -> Result<(), ClientError> {
        Ok(())
    }
}
