//! A minimal assistant agent that drives a [`CompletionClient`].
//!
//! The [`Agent`] exists so the completion contract can be exercised the way an agent runtime
//! uses it: build a prompt from a system message and a task, send it, and hand the reply (or
//! the streamed fragments) back to the caller. It performs a single turn per run and has no
//! notion of teams, scheduling or termination conditions.
//!
//! # Example
//!
//! ```rust
//! use mockllm::Agent;
//! use mockllm::clients::mock::MockCompletionClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent = Agent::new("assistant", Arc::new(MockCompletionClient::new("mock-gpt-4")));
//!
//!     let result = agent.run("Say 'Hello World!'").await?;
//!     assert_eq!(
//!         result.final_content(),
//!         Some("Hello World! This is a mock response from AutoGen.")
//!     );
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use futures_util::StreamExt;

use crate::mockllm::completion_client::{
    CompletionClient, CompletionOptions, CompletionResult, FinishReason, Message, StreamChunk,
    TokenUsage,
};
use crate::mockllm::error::ClientError;
use crate::mockllm::event::{AgentEvent, EventHandler};

/// System message used when none is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful AI assistant.";

/// Outcome of a single agent run.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    /// The task as a user message followed by the assistant reply.
    pub messages: Vec<Message>,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

impl TaskResult {
    /// Text of the assistant reply.
    pub fn final_content(&self) -> Option<&str> {
        self.messages.last().and_then(|m| m.content.as_text())
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            let text = message.content.as_text().unwrap_or("<non-text content>");
            writeln!(f, "[{}] {}", message.role.as_str(), text)?;
        }
        write!(
            f,
            "finish_reason={} tokens={}",
            self.finish_reason.as_str(),
            self.usage.total_tokens
        )
    }
}

/// An LLM-backed assistant with a name, a system message and a completion client.
pub struct Agent {
    pub name: String,
    system_message: String,
    client: Arc<dyn CompletionClient>,
    options: CompletionOptions,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl Agent {
    pub fn new(name: impl Into<String>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            name: name.into(),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            client,
            options: CompletionOptions::default(),
            event_handler: None,
        }
    }

    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = system_message.into();
        self
    }

    /// Options passed to the client on every call (e.g. a per-agent model override).
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn client(&self) -> &Arc<dyn CompletionClient> {
        &self.client
    }

    fn model(&self) -> &str {
        self.options
            .model
            .as_deref()
            .unwrap_or_else(|| self.client.model_name())
    }

    async fn emit(&self, event: AgentEvent) {
        if let Some(handler) = &self.event_handler {
            handler.on_agent_event(&event).await;
        }
    }

    fn prompt(&self, task: &str) -> Vec<Message> {
        vec![
            Message::system(self.system_message.as_str()),
            Message::user(task),
        ]
    }

    async fn begin(&self, task: &str, message_count: usize, streaming: bool) {
        log::info!("Agent '{}' running task (streaming={})", self.name, streaming);
        self.emit(AgentEvent::RunStarted {
            agent_name: self.name.clone(),
            task_preview: task.chars().take(120).collect(),
        })
        .await;
        self.emit(AgentEvent::LLMCallStarted {
            agent_name: self.name.clone(),
            model: self.model().to_string(),
            message_count,
            streaming,
        })
        .await;
    }

    async fn finish(&self, task: &str, content: String, result: &CompletionResult) -> TaskResult {
        self.emit(AgentEvent::LLMCallCompleted {
            agent_name: self.name.clone(),
            finish_reason: result.finish_reason,
            usage: result.usage,
            response_length: content.chars().count(),
        })
        .await;
        self.emit(AgentEvent::RunCompleted {
            agent_name: self.name.clone(),
            usage: result.usage,
        })
        .await;
        log::debug!(
            "Agent '{}' finished: finish_reason={} total_tokens={}",
            self.name,
            result.finish_reason.as_str(),
            result.usage.total_tokens
        );

        TaskResult {
            messages: vec![Message::user(task), Message::assistant(content)],
            finish_reason: result.finish_reason,
            usage: result.usage,
        }
    }

    /// Run `task` with a single non-streaming completion.
    pub async fn run(&self, task: &str) -> Result<TaskResult, ClientError> {
        let prompt = self.prompt(task);
        self.begin(task, prompt.len(), false).await;

        let result = self.client.complete(&prompt, &self.options).await?;
        Ok(self.finish(task, result.content.clone(), &result).await)
    }

    /// Run `task` through a streamed completion.
    ///
    /// Every fragment is forwarded to the event handler before the next one is pulled. The
    /// stream must end with exactly one final result; anything after it, or a stream that
    /// ends without one, is reported as [`ClientError::Stream`].
    pub async fn run_stream(&self, task: &str) -> Result<TaskResult, ClientError> {
        let prompt = self.prompt(task);
        self.begin(task, prompt.len(), true).await;

        let mut stream = self.client.complete_stream(&prompt, &self.options);
        let mut content = String::new();
        let mut fragments = 0;
        let mut terminal: Option<CompletionResult> = None;

        while let Some(chunk) = stream.next().await {
            match chunk? {
                StreamChunk::Text(fragment) => {
                    if terminal.is_some() {
                        return Err(ClientError::Stream(
                            "text fragment received after the final result".to_string(),
                        ));
                    }
                    content.push_str(&fragment);
                    self.emit(AgentEvent::StreamFragment {
                        agent_name: self.name.clone(),
                        index: fragments,
                        fragment,
                    })
                    .await;
                    fragments += 1;
                }
                StreamChunk::Final(result) => {
                    if terminal.is_some() {
                        return Err(ClientError::Stream(
                            "more than one final result in stream".to_string(),
                        ));
                    }
                    terminal = Some(result);
                }
            }
        }

        match terminal {
            Some(result) => Ok(self.finish(task, content, &result).await),
            None => Err(ClientError::Stream(
                "stream ended without a final result".to_string(),
            )),
        }
    }
}
