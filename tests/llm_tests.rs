//! OpenAI-compatible client, structured generation, and web-search research
//! tests against mocked chat completions and Responses API endpoints.

mod common;

use common::{agent, ai_research};
use serde_json::json;
use std::sync::Arc;
use symposium::llm::openai::OpenAIClient;
use symposium::llm::{LLMClient, Provider, StructuredGenerator};
use symposium::research::{
    CollectOptions, RawResearchResult, ResearchCollector, WebSearchCollector,
};
use symposium::types::AppError;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

/// Create a mock chat completion response
fn mock_completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Create a mock Responses API reply whose message carries `text`
fn mock_response(text: &str) -> serde_json::Value {
    json!({
        "id": "resp_test",
        "object": "response",
        "model": "gpt-test",
        "output": [
            { "type": "web_search_call", "id": "ws_test", "status": "completed" },
            {
                "type": "message",
                "id": "msg_test",
                "role": "assistant",
                "content": [{ "type": "output_text", "text": text, "annotations": [] }]
            }
        ]
    })
}

fn client_for(server: &MockServer) -> OpenAIClient {
    OpenAIClient::new(
        "sk-test".to_string(),
        format!("{}/v1/", server.uri()),
        "gpt-test".to_string(),
    )
}

// ============= OpenAIClient =============

#[tokio::test]
async fn test_generate_posts_chat_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "messages": [{ "role": "user", "content": "Say hello" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("  hello  ")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.generate("Say hello").await.unwrap();
    assert_eq!(text, "hello");
    assert_eq!(client.model_name(), "gpt-test");
}

#[tokio::test]
async fn test_generate_with_system_sends_both_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "Be terse." },
                { "role": "user", "content": "Summarize" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("done")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate_with_system("Be terse.", "Summarize")
        .await
        .unwrap();
    assert_eq!(text, "done");
}

#[tokio::test]
async fn test_error_status_surfaces_as_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "The model `gpt-test` does not exist",
                "type": "invalid_request_error",
                "param": null,
                "code": "model_not_found"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).generate("hi").await.unwrap_err();
    assert!(matches!(err, AppError::LLM(_)));
    let message = err.to_string();
    assert!(message.starts_with("LLM error: OpenAI API error"));
    assert!(message.contains("The model `gpt-test` does not exist"));
}

#[tokio::test]
async fn test_empty_content_is_missing_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("hi").await.unwrap_err();
    assert_eq!(err.to_string(), "LLM error: OpenAI response missing output text.");
}

#[test]
fn test_provider_rejects_blank_key() {
    let provider = Provider::OpenAI {
        api_key: "  ".to_string(),
        api_base: "https://api.openai.com/v1".to_string(),
        model: "gpt-test".to_string(),
    };
    let err = provider.create_client().err().expect("blank key must fail");
    assert!(matches!(err, AppError::Configuration(_)));
}

// ============= Structured generation over HTTP =============

#[tokio::test]
async fn test_structured_generation_retries_bad_output() {
    let server = MockServer::start().await;
    let raw = serde_json::to_string(&ai_research()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("not json at all")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_completion(&format!("Here you go:\n{}\nThanks.", raw))),
        )
        .mount(&server)
        .await;

    let generator = StructuredGenerator::new(Arc::new(client_for(&server)));
    let result: RawResearchResult = generator.generate("research please").await.unwrap();
    assert_eq!(result, ai_research());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_structured_generation_gives_up_after_two_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_completion("{\"topic\": \"x\"}")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let generator = StructuredGenerator::new(Arc::new(client_for(&server)));
    let err = generator
        .generate::<RawResearchResult>("research please")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Model output did not match expected shape"));
}

// ============= Web-search research collector =============

fn collector_for(server: &MockServer, timezone: &str) -> WebSearchCollector {
    let provider = Provider::OpenAI {
        api_key: "sk-test".to_string(),
        api_base: format!("{}/v1", server.uri()),
        model: "gpt-research".to_string(),
    };
    WebSearchCollector::new(provider.openai_client().unwrap(), timezone)
}

#[tokio::test]
async fn test_collector_sends_web_search_tool_and_schema() {
    let server = MockServer::start().await;
    let raw = serde_json::to_string(&ai_research()).unwrap();
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-research",
            "tools": [{
                "type": "web_search_preview",
                "search_context_size": "high",
                "user_location": {
                    "type": "approximate",
                    "country": "US",
                    "timezone": "Europe/Berlin"
                }
            }],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": "research_dossier",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["topic", "summary", "sources", "claims"]
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_response(&raw)))
        .expect(1)
        .mount(&server)
        .await;

    let result = collector_for(&server, "Europe/Berlin")
        .collect(&agent("alex"), &CollectOptions::new(3, 30))
        .await
        .unwrap();
    assert_eq!(result, ai_research());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["input"].as_str().unwrap();
    assert!(prompt.contains("Use web search and provide at least 3 distinct primary/reputable"));
    assert!(prompt.contains("within the last 30 days"));
}

#[tokio::test]
async fn test_collector_without_output_text_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_test",
            "output": [{ "type": "web_search_call", "id": "ws_test", "status": "completed" }]
        })))
        .mount(&server)
        .await;

    let err = collector_for(&server, "America/New_York")
        .collect(&agent("alex"), &CollectOptions::new(3, 30))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "LLM error: Research response did not include output text."
    );
}

#[tokio::test]
async fn test_collector_rejects_malformed_dossier() {
    let server = MockServer::start().await;
    let mut weak = ai_research();
    weak.claims.clear();
    let raw = serde_json::to_string(&weak).unwrap();
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_response(&raw)))
        .mount(&server)
        .await;

    let err = collector_for(&server, "America/New_York")
        .collect(&agent("alex"), &CollectOptions::new(1, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::LLM(_)));
    assert!(err.to_string().contains("claims must contain at least 1 item"));
}
