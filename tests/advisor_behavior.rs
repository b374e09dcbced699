//! Behavior-driven tests for the advisor chat responder
//!
//! The responder never fails: transport, status and payload problems all
//! come back as the fixed apology.

use finsight_core::advisor::{build_prompt, SYSTEM_PROMPT};
use finsight_core::{Advisor, CannedAdvisor, HttpMethod, InferenceAdvisor, APOLOGY};
use serde_json::Value;
use finsight_tests::{test_settings, Scripted, ScriptedHttpClient};

const INFERENCE: &str = "inference.test";

fn advisor(client: std::sync::Arc<ScriptedHttpClient>) -> InferenceAdvisor {
    InferenceAdvisor::new(client, &test_settings())
}

// =============================================================================
// Successful generation
// =============================================================================

#[tokio::test]
async fn generated_text_is_returned_verbatim() {
    let client = ScriptedHttpClient::new()
        .route(
            INFERENCE,
            Scripted::ok(r#"[{"generated_text":"  Start with an emergency fund.\n"}]"#),
        )
        .shared();

    let reply = advisor(client).respond("Where do I begin?").await;

    assert_eq!(reply, "  Start with an emergency fund.\n");
}

#[tokio::test]
async fn request_carries_prompt_parameters_and_bearer_token() {
    let client = ScriptedHttpClient::new()
        .route(INFERENCE, Scripted::ok(r#"{"generated_text":"ok"}"#))
        .shared();

    let _ = advisor(client.clone()).respond("Should I buy index funds?").await;

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://inference.test/models/mixtral");
    assert_eq!(
        request.headers.get("authorization").map(String::as_str),
        Some("Bearer hf_test_token")
    );
    assert_eq!(
        request.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );

    let body: Value = serde_json::from_str(request.body.as_deref().expect("json body"))
        .expect("body is json");
    assert_eq!(body["model"], "mistralai/Mixtral-8x7B-Instruct-v0.1");
    assert_eq!(body["inputs"], build_prompt("Should I buy index funds?"));
    assert_eq!(body["parameters"]["max_new_tokens"], 500);
    assert_eq!(body["parameters"]["temperature"], 0.7);
    assert_eq!(body["parameters"]["top_p"], 0.95);
    assert_eq!(body["parameters"]["repetition_penalty"], 1.15);
}

#[tokio::test]
async fn each_message_is_sent_without_history() {
    let client = ScriptedHttpClient::new()
        .route(INFERENCE, Scripted::ok(r#"{"generated_text":"ok"}"#))
        .shared();
    let advisor = advisor(client.clone());

    let _ = advisor.respond("first question").await;
    let _ = advisor.respond("second question").await;

    let requests = client.requests();
    let second: Value =
        serde_json::from_str(requests[1].body.as_deref().expect("json body")).expect("json");
    let inputs = second["inputs"].as_str().expect("inputs string");
    assert!(inputs.contains("second question"));
    assert!(!inputs.contains("first question"));
}

#[test]
fn prompt_wraps_system_text_and_message() {
    let prompt = build_prompt("How much should I save?");

    assert!(prompt.starts_with("<s>[INST] You are making a Financial Advisor"));
    assert!(prompt.contains(SYSTEM_PROMPT));
    assert!(prompt.ends_with("\n\nUser: How much should I save? [/INST]"));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn transport_failure_yields_apology() {
    let client = ScriptedHttpClient::new()
        .route(INFERENCE, Scripted::Fail(String::from("request timeout")))
        .shared();

    assert_eq!(advisor(client).respond("hello").await, APOLOGY);
}

#[tokio::test]
async fn error_status_yields_apology() {
    let client = ScriptedHttpClient::new()
        .route(INFERENCE, Scripted::status(503))
        .shared();

    assert_eq!(advisor(client).respond("hello").await, APOLOGY);
}

#[tokio::test]
async fn unexpected_payload_yields_apology() {
    let client = ScriptedHttpClient::new()
        .route(INFERENCE, Scripted::ok(r#"{"error":"Model is currently loading"}"#))
        .shared();

    assert_eq!(advisor(client).respond("hello").await, APOLOGY);
}

// =============================================================================
// Offline responder
// =============================================================================

#[tokio::test]
async fn canned_advisor_matches_keywords_case_insensitively() {
    let tesla = CannedAdvisor.respond("Is TESLA a buy?").await;
    let market = CannedAdvisor.respond("what's the market doing").await;
    let other = CannedAdvisor.respond("tell me about bonds").await;

    assert!(tesla.starts_with("Tesla (TSLA)"));
    assert!(market.starts_with("Current market trends"));
    assert!(other.starts_with("Thank you for your question."));
}
