//! Agent event system.
//!
//! Implement [`EventHandler`] to observe an [`Agent`](crate::Agent) while it drives its
//! completion client: run boundaries, each LLM round-trip, and every streamed fragment as it
//! arrives.
//!
//! # Example
//!
//! ```rust,no_run
//! use mockllm::event::{AgentEvent, EventHandler};
//! use async_trait::async_trait;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl EventHandler for Printer {
//!     async fn on_agent_event(&self, event: &AgentEvent) {
//!         if let AgentEvent::StreamFragment { fragment, .. } = event {
//!             print!("{}", fragment);
//!         }
//!     }
//! }
//! ```

use crate::mockllm::completion_client::{FinishReason, TokenUsage};
use async_trait::async_trait;

/// Events emitted by an [`Agent`](crate::Agent) during a run.
///
/// # Event Flow
///
/// ```text
/// RunStarted
///   └─ LLMCallStarted { streaming }
///   └─ StreamFragment { index: 0 }   (streaming runs only, one per fragment)
///   └─ LLMCallCompleted
/// RunCompleted
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    RunStarted {
        agent_name: String,
        /// First ~120 characters of the task.
        task_preview: String,
    },
    LLMCallStarted {
        agent_name: String,
        model: String,
        message_count: usize,
        streaming: bool,
    },
    /// A text fragment arrived from the client. Fired before the next one is requested.
    StreamFragment {
        agent_name: String,
        index: usize,
        fragment: String,
    },
    LLMCallCompleted {
        agent_name: String,
        finish_reason: FinishReason,
        usage: TokenUsage,
        response_length: usize,
    },
    RunCompleted {
        agent_name: String,
        usage: TokenUsage,
    },
}

/// Receiver for [`AgentEvent`]s. The default implementation ignores everything.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn on_agent_event(&self, _event: &AgentEvent) {}
}
