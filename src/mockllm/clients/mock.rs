//! The `MockCompletionClient` struct implements [`CompletionClient`] with canned,
//! deterministic data so agent runtimes can be driven end to end without a network call or
//! an API key.
//!
//! # Behaviour
//!
//! - **complete(...)**: always answers [`MOCK_RESPONSE_TEXT`] with `finish_reason = stop`
//!   and usage `{prompt: 10, completion: 15, total: 25}`.
//! - **complete_stream(...)**: yields the eight [`MOCK_STREAM_FRAGMENTS`] one at a time,
//!   handing control back to the caller between fragments, then one final result with empty
//!   content and the same usage.
//! - **count_tokens(...)**: sums the character length of every text message. This is a
//!   placeholder, not a tokenizer, and does not match any real model's token count.
//! - **actual_usage() / total_usage()**: fixed at 25 total tokens no matter how many calls
//!   were made.
//!
//! The client never looks at message content to decide what to answer and keeps no state
//! between calls, so call order and count never change its output.
//!
//! # Example
//!
//! ```rust
//! use mockllm::clients::mock::MockCompletionClient;
//! use mockllm::completion_client::{CompletionClient, CompletionOptions, Message};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = MockCompletionClient::new("mock-gpt-4");
//!     let messages = vec![Message::user("Say 'Hello World!'")];
//!
//!     let result = client.complete(&messages, &CompletionOptions::default()).await.unwrap();
//!     assert_eq!(result.content, "Hello World! This is a mock response from AutoGen.");
//!
//!     let remaining = client.remaining_tokens(&messages, &CompletionOptions::default()).unwrap();
//!     assert_eq!(remaining, 4000 - 18);
//!
//!     client.close().await.unwrap();
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream;

use crate::mockllm::completion_client::{
    CompletionClient, CompletionOptions, CompletionResult, CompletionStream, FinishReason,
    Message, StreamChunk, TokenUsage, UsageSummary,
};
use crate::mockllm::config::{MockClientConfig, NonTextPolicy};
use crate::mockllm::error::ClientError;

/// Content returned by every non-streaming call.
pub const MOCK_RESPONSE_TEXT: &str = "Hello World! This is a mock response from AutoGen.";

/// Fragments yielded, in order, by every streaming call.
pub const MOCK_STREAM_FRAGMENTS: [&str; 8] = [
    "Hello",
    " World!",
    " This",
    " is",
    " a",
    " mock",
    " streaming",
    " response.",
];

/// Context window the mock budgets `remaining_tokens` against.
pub const MOCK_TOKEN_LIMIT: usize = 4000;

pub const MOCK_PROMPT_TOKENS: usize = 10;
pub const MOCK_COMPLETION_TOKENS: usize = 15;

/// Usage attached to every result the mock produces.
pub fn mock_usage() -> TokenUsage {
    TokenUsage::new(MOCK_PROMPT_TOKENS, MOCK_COMPLETION_TOKENS)
}

fn mock_result(content: String) -> CompletionResult {
    CompletionResult {
        content,
        finish_reason: FinishReason::Stop,
        usage: mock_usage(),
        cached: false,
    }
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

/// Test double for a chat-completion service.
///
/// Holds only its [`MockClientConfig`]; it is `Send + Sync` and can be shared behind an
/// `Arc<dyn CompletionClient>` by any number of concurrent callers without locking.
#[derive(Clone, Debug)]
pub struct MockCompletionClient {
    config: MockClientConfig,
}

impl MockCompletionClient {
    /// Construct a mock reporting `model` as its model name.
    pub fn new(model: &str) -> Self {
        Self::from_config(MockClientConfig::default().with_model(model))
    }

    pub fn from_config(config: MockClientConfig) -> Self {
        MockCompletionClient { config }
    }

    pub fn config(&self) -> &MockClientConfig {
        &self.config
    }

    fn effective_model<'a>(&'a self, options: &'a CompletionOptions) -> &'a str {
        options.model.as_deref().unwrap_or(self.config.model.as_str())
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::from_config(MockClientConfig::default())
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, ClientError> {
        log::debug!(
            "MockCompletionClient::complete(...): model={} messages={}",
            self.effective_model(options),
            messages.len()
        );

        // Stands in for the network round-trip.
        pause(self.config.response_delay).await;

        Ok(mock_result(MOCK_RESPONSE_TEXT.to_string()))
    }

    fn complete_stream<'a>(
        &'a self,
        messages: &'a [Message],
        options: &'a CompletionOptions,
    ) -> CompletionStream<'a> {
        log::debug!(
            "MockCompletionClient::complete_stream(...): model={} messages={}",
            self.effective_model(options),
            messages.len()
        );

        let delay = self.config.stream_delay;
        let chunks = stream::unfold(0usize, move |index| async move {
            if index > MOCK_STREAM_FRAGMENTS.len() {
                return None;
            }
            pause(delay).await;
            let chunk = match MOCK_STREAM_FRAGMENTS.get(index) {
                Some(fragment) => StreamChunk::Text((*fragment).to_string()),
                None => StreamChunk::Final(mock_result(String::new())),
            };
            Some((Ok::<_, ClientError>(chunk), index + 1))
        });

        Box::pin(chunks)
    }

    fn count_tokens(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<usize, ClientError> {
        let mut total = 0;
        for (index, message) in messages.iter().enumerate() {
            match message.content.as_text() {
                Some(text) => total += text.chars().count(),
                None => {
                    if self.config.non_text_policy == NonTextPolicy::Reject {
                        return Err(ClientError::InvalidContentKind {
                            index,
                            kind: message.content.kind(),
                        });
                    }
                }
            }
        }
        Ok(total)
    }

    fn token_limit(&self) -> usize {
        MOCK_TOKEN_LIMIT
    }

    fn actual_usage(&self) -> UsageSummary {
        UsageSummary {
            total_tokens: mock_usage().total_tokens,
        }
    }

    fn total_usage(&self) -> UsageSummary {
        UsageSummary {
            total_tokens: mock_usage().total_tokens,
        }
    }

    async fn close(&self) -> Result<(), ClientError> {
        log::debug!("MockCompletionClient::close(): nothing to release");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mockllm::completion_client::MessageContent;

    fn image() -> Message {
        Message::user(MessageContent::Image {
            media_type: "image/png".to_string(),
            data: "iVBORw0KGgo=".to_string(),
        })
    }

    #[test]
    fn counts_characters_not_bytes() {
        let client = MockCompletionClient::default();
        let messages = vec![Message::user("héllo"), Message::assistant("日本")];
        let count = client
            .count_tokens(&messages, &CompletionOptions::default())
            .unwrap();
        assert_eq!(count, 7);
    }

    #[test]
    fn ignores_non_text_content_by_default() {
        let client = MockCompletionClient::default();
        let messages = vec![Message::user("abc"), image()];
        let options = CompletionOptions::default();
        assert_eq!(client.count_tokens(&messages, &options).unwrap(), 3);
        assert_eq!(client.remaining_tokens(&messages, &options).unwrap(), 3997);
    }

    #[test]
    fn reject_policy_fails_on_non_text_content() {
        let client = MockCompletionClient::from_config(
            MockClientConfig::default().with_non_text_policy(NonTextPolicy::Reject),
        );
        let messages = vec![Message::user("abc"), image()];
        let options = CompletionOptions::default();

        let err = client.count_tokens(&messages, &options).unwrap_err();
        assert_eq!(
            err,
            ClientError::InvalidContentKind {
                index: 1,
                kind: "image"
            }
        );
        assert!(client.remaining_tokens(&messages, &options).is_err());
        // Text-only conversations are unaffected by the policy.
        assert_eq!(
            client
                .count_tokens(&[Message::user("abc")], &options)
                .unwrap(),
            3
        );
    }

    #[test]
    fn usage_invariant_holds() {
        let usage = mock_usage();
        assert_eq!(
            usage.total_tokens,
            usage.prompt_tokens + usage.completion_tokens
        );
        assert_eq!(usage.total_tokens, 25);
    }

    #[test]
    fn fragments_concatenate_to_streamed_text() {
        assert_eq!(
            MOCK_STREAM_FRAGMENTS.concat(),
            "Hello World! This is a mock streaming response."
        );
    }
}
