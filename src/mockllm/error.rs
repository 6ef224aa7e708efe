//! Errors surfaced by completion clients.

use thiserror::Error;

/// Failures a [`CompletionClient`](crate::completion_client::CompletionClient) can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A message carried content the client refuses to count.
    #[error("message {index} has non-text content of kind `{kind}`")]
    InvalidContentKind { index: usize, kind: &'static str },

    /// A stream produced something other than fragments followed by one final result.
    #[error("stream error: {0}")]
    Stream(String),

    #[error("provider error: {0}")]
    Provider(String),
}
