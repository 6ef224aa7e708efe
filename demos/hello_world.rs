use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockllm::capabilities;
use mockllm::{Agent, AgentEvent, CompletionClient, EventHandler, MockClientConfig, MockCompletionClient};

// Run from the root folder of the repo as follows:
// RUST_LOG=debug MOCKLLM_STREAM_DELAY_MS=80 cargo run --example hello_world

/// Prints streamed fragments as soon as the agent sees them.
struct FragmentPrinter;

#[async_trait]
impl EventHandler for FragmentPrinter {
    async fn on_agent_event(&self, event: &AgentEvent) {
        if let AgentEvent::StreamFragment { fragment, .. } = event {
            print!("{}", fragment);
            let _ = io::stdout().flush();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    mockllm::init_logger();

    println!("Components in this build:");
    for component in capabilities::components() {
        let state = if component.available { "available" } else { "missing" };
        println!("  {:<20} {:<8} {}", component.name, component.version, state);
    }

    let model = env::var("MOCKLLM_MODEL").unwrap_or_else(|_| "mock-gpt-4".to_string());
    let stream_delay = env::var("MOCKLLM_STREAM_DELAY_MS")
        .ok()
        .and_then(|ms| ms.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO);

    let client = Arc::new(MockCompletionClient::from_config(
        MockClientConfig::default()
            .with_model(model)
            .with_stream_delay(stream_delay),
    ));
    let agent =
        Agent::new("assistant", client.clone()).with_event_handler(Arc::new(FragmentPrinter));

    println!("\nRunning agent with task: 'Say Hello World!'");
    let outcome = run(&agent).await;

    if env::var("OPENAI_API_KEY").is_ok() && !capabilities::is_available("clients::remote") {
        println!("OPENAI_API_KEY is set, but this build has no remote client; skipping live check.");
    }

    // Clean up on every path, then report.
    client.close().await?;
    match outcome {
        Ok(()) => {
            println!("Hello World smoke test completed successfully!");
            Ok(())
        }
        Err(e) => {
            eprintln!("Hello World smoke test failed: {}", e);
            Err(e)
        }
    }
}

async fn run(agent: &Agent) -> Result<(), Box<dyn std::error::Error>> {
    let result = agent.run("Say 'Hello World!'").await?;
    println!("Agent response:\n{}", result);

    println!("\nStreaming the same task:");
    let streamed = agent.run_stream("Say 'Hello World!'").await?;
    println!("\n[Stream complete: {}]", streamed.finish_reason.as_str());

    let remaining = agent
        .client()
        .remaining_tokens(&streamed.messages, &Default::default())?;
    println!(
        "Usage: total={} remaining_budget={}",
        agent.client().total_usage().total_tokens,
        remaining
    );
    Ok(())
}
