//! # mockllm
//!
//! mockllm provides a deterministic stand-in for a chat-completion service so agent runtimes
//! can be smoke-tested end to end without network access, API keys or non-deterministic
//! model output.
//!
//! The crate is organised around a single contract and one implementation of it:
//!
//! * **Completion contract**: the [`CompletionClient`] trait covers single-shot completion,
//!   streamed completion, token counting, usage reporting and shutdown.
//! * **Mock client**: [`MockCompletionClient`] answers every request with canned content and
//!   fixed usage, and streams its answer fragment by fragment, yielding to the scheduler
//!   between fragments exactly like a network-backed client would.
//! * **Agent**: a minimal [`Agent`] that drives any [`CompletionClient`] for one turn and
//!   reports what it sees through [`event::EventHandler`].
//!
//! ## Getting Started
//!
//! ```rust
//! use std::sync::Arc;
//! use mockllm::{Agent, MockCompletionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     mockllm::init_logger();
//!
//!     let client = Arc::new(MockCompletionClient::new("mock-gpt-4"));
//!     let agent = Agent::new("assistant", client.clone());
//!
//!     let result = agent.run("Say 'Hello World!'").await?;
//!     println!("{}", result);
//!
//!     let streamed = agent.run_stream("Say 'Hello World!'").await?;
//!     assert_eq!(streamed.usage.total_tokens, 25);
//!
//!     mockllm::CompletionClient::close(client.as_ref()).await?;
//!     Ok(())
//! }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Applications embedding mockllm can opt in to simple `RUST_LOG` driven diagnostics without
/// choosing a logging backend upfront.
///
/// ```rust
/// mockllm::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        // try_init so a logger installed by the host application wins
        let _ = env_logger::try_init();
    });
}

pub mod mockllm;

// Re-exporting key items for easier external access.
pub use mockllm::agent;
pub use mockllm::agent::{Agent, TaskResult};
pub use mockllm::capabilities;
pub use mockllm::clients;
pub use mockllm::clients::mock::MockCompletionClient;
pub use mockllm::completion_client;
pub use mockllm::completion_client::{
    CompletionClient, CompletionOptions, CompletionResult, CompletionStream, FinishReason,
    Message, MessageContent, Role, StreamChunk, TokenUsage, UsageSummary,
};
pub use mockllm::config;
pub use mockllm::config::{MockClientConfig, NonTextPolicy};
pub use mockllm::error;
pub use mockllm::error::ClientError;
pub use mockllm::event;
pub use mockllm::event::{AgentEvent, EventHandler};
