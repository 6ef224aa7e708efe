//! Configuration for the mock completion client.
//!
//! Provides the [`MockClientConfig`] struct consumed by
//! [`MockCompletionClient::from_config`](crate::clients::mock::MockCompletionClient::from_config).
//! Users construct this manually — no file parsing dependencies are required.
//!
//! # Example
//!
//! ```rust
//! use mockllm::config::{MockClientConfig, NonTextPolicy};
//! use std::time::Duration;
//!
//! // Use the default ("mock-gpt-4", no latency, non-text content counts as zero)
//! let config = MockClientConfig::default();
//!
//! // Or slow the stream down for a visible demo
//! let config = MockClientConfig::default()
//!     .with_model("mock-demo")
//!     .with_stream_delay(Duration::from_millis(50))
//!     .with_non_text_policy(NonTextPolicy::Reject);
//! ```

use std::time::Duration;

/// Model label used when none is given.
pub const DEFAULT_MOCK_MODEL: &str = "mock-gpt-4";

/// How token counting treats message content that is not text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonTextPolicy {
    /// Non-text content contributes zero to the count.
    Ignore,
    /// Non-text content fails the count with
    /// [`ClientError::InvalidContentKind`](crate::error::ClientError::InvalidContentKind).
    Reject,
}

impl Default for NonTextPolicy {
    fn default() -> Self {
        NonTextPolicy::Ignore
    }
}

/// Settings for a [`MockCompletionClient`](crate::clients::mock::MockCompletionClient).
///
/// None of these change the content, finish reason or usage the mock reports.
#[derive(Clone, Debug, PartialEq)]
pub struct MockClientConfig {
    /// Label reported by `model_name()`. Stored only.
    pub model: String,
    /// Simulated wait before `complete()` returns. Zero yields to the scheduler once.
    pub response_delay: Duration,
    /// Simulated wait before each streamed fragment. Zero yields to the scheduler.
    pub stream_delay: Duration,
    pub non_text_policy: NonTextPolicy,
}

impl Default for MockClientConfig {
    /// # Example
    ///
    /// ```rust
    /// use mockllm::config::MockClientConfig;
    ///
    /// let config = MockClientConfig::default();
    /// assert_eq!(config.model, "mock-gpt-4");
    /// assert!(config.stream_delay.is_zero());
    /// ```
    fn default() -> Self {
        Self {
            model: DEFAULT_MOCK_MODEL.to_string(),
            response_delay: Duration::ZERO,
            stream_delay: Duration::ZERO,
            non_text_policy: NonTextPolicy::default(),
        }
    }
}

impl MockClientConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn with_stream_delay(mut self, delay: Duration) -> Self {
        self.stream_delay = delay;
        self
    }

    pub fn with_non_text_policy(mut self, policy: NonTextPolicy) -> Self {
        self.non_text_policy = policy;
        self
    }
}
