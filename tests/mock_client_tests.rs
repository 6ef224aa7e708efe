use std::sync::Arc;

use mockllm::clients::mock::{MOCK_RESPONSE_TEXT, MOCK_TOKEN_LIMIT};
use mockllm::{
    CompletionClient, CompletionOptions, FinishReason, Message, MockCompletionClient, Role,
    TokenUsage, UsageSummary,
};

fn hello_task() -> Vec<Message> {
    vec![Message::user("Say 'Hello World!'")]
}

#[tokio::test]
async fn test_complete_returns_canned_response() {
    mockllm::init_logger();

    let client = MockCompletionClient::new("mock-gpt-4");
    let result = client
        .complete(&hello_task(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(
        result.content,
        "Hello World! This is a mock response from AutoGen."
    );
    assert_eq!(result.finish_reason, FinishReason::Stop);
    assert_eq!(result.finish_reason.as_str(), "stop");
    assert_eq!(result.usage, TokenUsage::new(10, 15));
    assert_eq!(result.usage.total_tokens, 25);
    assert!(!result.cached);
}

#[tokio::test]
async fn test_complete_ignores_message_content() {
    let client = MockCompletionClient::default();
    let options = CompletionOptions::default();

    let conversations = vec![
        vec![],
        hello_task(),
        vec![
            Message::system("You are terse."),
            Message::user("What is the capital of France?"),
            Message::assistant("Paris."),
            Message::user("And of Spain?"),
        ],
        vec![Message::user("x".repeat(10_000))],
    ];

    for messages in &conversations {
        let result = client.complete(messages, &options).await.unwrap();
        assert_eq!(result.content, MOCK_RESPONSE_TEXT);
        assert_eq!(
            result.usage.total_tokens,
            result.usage.prompt_tokens + result.usage.completion_tokens
        );
    }
}

#[tokio::test]
async fn test_model_override_is_accepted_and_ignored() {
    let client = MockCompletionClient::new("mock-gpt-4");
    assert_eq!(client.model_name(), "mock-gpt-4");

    let plain = client
        .complete(&hello_task(), &CompletionOptions::default())
        .await
        .unwrap();
    let overridden = client
        .complete(
            &hello_task(),
            &CompletionOptions::new()
                .with_model("gpt-4.1-nano")
                .with_option("temperature", 0.2)
                .with_option("max_tokens", 64),
        )
        .await
        .unwrap();

    assert_eq!(plain, overridden);
    // The override applies to that call only.
    assert_eq!(client.model_name(), "mock-gpt-4");
}

#[tokio::test]
async fn test_model_label_does_not_change_output() {
    let a = MockCompletionClient::new("mock-gpt-4");
    let b = MockCompletionClient::new("something-else");
    let options = CompletionOptions::default();

    assert_eq!(
        a.complete(&hello_task(), &options).await.unwrap(),
        b.complete(&hello_task(), &options).await.unwrap()
    );
}

#[test]
fn test_count_tokens_sums_character_lengths() {
    let client = MockCompletionClient::default();
    let options = CompletionOptions::default();

    assert_eq!(client.count_tokens(&[], &options).unwrap(), 0);
    assert_eq!(client.count_tokens(&hello_task(), &options).unwrap(), 18);

    let messages = vec![
        Message::new(Role::System, "abcd"),
        Message::new(Role::User, ""),
        Message::new(Role::Assistant, "efghij"),
    ];
    assert_eq!(client.count_tokens(&messages, &options).unwrap(), 10);
}

#[test]
fn test_remaining_tokens_is_budget_minus_count() {
    let client = MockCompletionClient::default();
    let options = CompletionOptions::default();

    assert_eq!(client.token_limit(), MOCK_TOKEN_LIMIT);
    assert_eq!(client.remaining_tokens(&[], &options).unwrap(), 4000);
    assert_eq!(
        client.remaining_tokens(&hello_task(), &options).unwrap(),
        4000 - 18
    );

    let at_budget = vec![Message::user("y".repeat(4000))];
    assert_eq!(client.remaining_tokens(&at_budget, &options).unwrap(), 0);
}

#[test]
fn test_remaining_tokens_goes_negative_without_clamping() {
    let client = MockCompletionClient::default();
    let options = CompletionOptions::default();

    let over_budget = vec![
        Message::user("z".repeat(4500)),
        Message::assistant("w".repeat(250)),
    ];
    let count = client.count_tokens(&over_budget, &options).unwrap();
    let remaining = client.remaining_tokens(&over_budget, &options).unwrap();

    assert_eq!(count, 4750);
    assert_eq!(remaining, -750);
    assert_eq!(remaining, 4000 - count as i64);
}

#[tokio::test]
async fn test_usage_is_fixed_regardless_of_call_count() {
    let client = MockCompletionClient::default();
    let expected = UsageSummary { total_tokens: 25 };

    assert_eq!(client.actual_usage(), expected);
    assert_eq!(client.total_usage(), expected);

    for _ in 0..5 {
        client
            .complete(&hello_task(), &CompletionOptions::default())
            .await
            .unwrap();
    }

    assert_eq!(client.actual_usage(), expected);
    assert_eq!(client.total_usage(), expected);
}

#[tokio::test]
async fn test_close_twice_is_harmless_and_stateless() {
    let client = MockCompletionClient::default();
    let options = CompletionOptions::default();
    let before = client.complete(&hello_task(), &options).await.unwrap();

    client.close().await.unwrap();
    client.close().await.unwrap();

    let after = client.complete(&hello_task(), &options).await.unwrap();
    assert_eq!(before, after);
    assert_eq!(client.count_tokens(&hello_task(), &options).unwrap(), 18);
}

#[tokio::test]
async fn test_concurrent_callers_get_identical_results() {
    let client: Arc<dyn CompletionClient> = Arc::new(MockCompletionClient::default());

    let mut handles = vec![];
    for i in 0..16 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            let messages = vec![Message::user(format!("task number {}", i))];
            client
                .complete(&messages, &CompletionOptions::default())
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.content, MOCK_RESPONSE_TEXT);
        assert_eq!(result.usage, TokenUsage::new(10, 15));
    }
}

#[test]
fn test_completion_result_serialises_like_the_wire_format() {
    let result = mockllm::CompletionResult {
        content: MOCK_RESPONSE_TEXT.to_string(),
        finish_reason: FinishReason::Stop,
        usage: TokenUsage::new(10, 15),
        cached: false,
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["finish_reason"], "stop");
    assert_eq!(value["usage"]["prompt_tokens"], 10);
    assert_eq!(value["usage"]["completion_tokens"], 15);
    assert_eq!(value["usage"]["total_tokens"], 25);
    assert_eq!(value["cached"], false);

    let options: CompletionOptions =
        serde_json::from_value(serde_json::json!({"model": "gpt-4o", "seed": 7})).unwrap();
    assert_eq!(options.model.as_deref(), Some("gpt-4o"));
    assert_eq!(options.get("seed"), Some(&serde_json::json!(7)));
}
