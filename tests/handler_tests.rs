//! Integration tests for the ads.get and health handlers.
//!
//! Tests exercise the handler functions directly with a seeded selector,
//! and verify the full dispatch flow for tool calls.

use std::sync::Arc;

use ad_service::ads::{AdCatalog, AdResponse, AdSelector, SelectionPolicy, XorShiftRng};
use ad_service::handlers;
use ad_service::protocol::{JsonRpcRequest, RpcId};

fn test_selector() -> AdSelector {
    AdSelector::with_random_source(
        Arc::new(AdCatalog::builtin()),
        SelectionPolicy::PerKey,
        Box::new(XorShiftRng::new(7)),
    )
}

fn parse_ads(text: &str) -> AdResponse {
    serde_json::from_str(text).unwrap()
}

fn ids(response: &AdResponse) -> Vec<&str> {
    response.ads.iter().map(|a| a.id.as_str()).collect()
}

fn tool_call(id: i64, name: &str, arguments: Option<serde_json::Value>) -> JsonRpcRequest {
    let mut params = serde_json::json!({ "name": name });
    if let Some(args) = arguments {
        params["arguments"] = args;
    }
    JsonRpcRequest::new(Some(RpcId::Number(id)), "tools/call", Some(params))
}

// ---------------------------------------------------------------------------
// ads.get tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_ads_contextual() {
    let selector = test_selector();
    let args = serde_json::json!({ "contextKeys": ["elec", "sport"] });

    let result = handlers::get_ads::handle(Some(&args), &selector).await;
    assert!(!result.is_error);

    let response = parse_ads(&result.content[0].text);
    assert_eq!(ids(&response), vec!["ad2", "ad4"]);
}

#[tokio::test]
async fn get_ads_response_carries_all_fields() {
    let selector = test_selector();
    let args = serde_json::json!({ "contextKeys": ["fashion"] });

    let result = handlers::get_ads::handle(Some(&args), &selector).await;
    let value: serde_json::Value = serde_json::from_str(&result.content[0].text).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "ads": [{
                "id": "ad1",
                "text": "Shop the latest fashion trends",
                "url": "https://example.com/ad1",
                "category": "fashion"
            }]
        })
    );
}

#[tokio::test]
async fn get_ads_without_arguments_falls_back() {
    let selector = test_selector();

    let result = handlers::get_ads::handle(None, &selector).await;
    assert!(!result.is_error);
    assert_eq!(parse_ads(&result.content[0].text).ads.len(), 2);
}

#[tokio::test]
async fn get_ads_null_keys_falls_back() {
    let selector = test_selector();
    let args = serde_json::json!({ "contextKeys": null });

    let result = handlers::get_ads::handle(Some(&args), &selector).await;
    assert!(!result.is_error);
    assert_eq!(parse_ads(&result.content[0].text).ads.len(), 2);
}

#[tokio::test]
async fn get_ads_malformed_arguments_fall_back() {
    let selector = test_selector();

    let malformed = vec![
        serde_json::json!({ "contextKeys": "fashion" }),
        serde_json::json!({ "contextKeys": [1, 2] }),
        serde_json::json!([]),
        serde_json::json!("fashion"),
    ];

    for args in malformed {
        let result = handlers::get_ads::handle(Some(&args), &selector).await;
        assert!(!result.is_error, "malformed args {args} must not fail");

        let response = parse_ads(&result.content[0].text);
        assert_eq!(response.ads.len(), 2);
        for ad in &response.ads {
            assert!(selector.catalog().contains(ad));
        }
    }
}

#[tokio::test]
async fn get_ads_skips_non_string_keys_and_keeps_the_rest() {
    let selector = test_selector();
    let args = serde_json::json!({ "contextKeys": ["fashion", 5, null, { "k": "v" }, "sport"] });

    let result = handlers::get_ads::handle(Some(&args), &selector).await;
    assert!(!result.is_error);
    assert_eq!(ids(&parse_ads(&result.content[0].text)), vec!["ad1", "ad4"]);
}

#[tokio::test]
async fn get_ads_with_only_non_string_keys_falls_back() {
    let selector = test_selector();
    let args = serde_json::json!({ "contextKeys": [5, true, null] });

    let result = handlers::get_ads::handle(Some(&args), &selector).await;
    assert!(!result.is_error);
    assert_eq!(parse_ads(&result.content[0].text).ads.len(), 2);
}

#[tokio::test]
async fn health_reports_fixed_status() {
    let result = handlers::health::handle().await;
    assert!(!result.is_error);
    assert_eq!(result.content[0].text, "Ad Service is healthy");
}

// ---------------------------------------------------------------------------
// Dispatch integration tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dispatch_initialize_reports_server_info() {
    let selector = test_selector();
    let req = JsonRpcRequest::new(Some(RpcId::Number(1)), "initialize", None);

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    let result = response.result.unwrap();

    assert_eq!(result["serverInfo"]["name"].as_str().unwrap(), "ad-service");
    assert_eq!(result["protocolVersion"].as_str().unwrap(), "2024-11-05");
}

#[tokio::test]
async fn dispatch_initialized_notification_has_no_response() {
    let selector = test_selector();
    let req = JsonRpcRequest::new(None, "notifications/initialized", None);

    assert!(handlers::dispatch(&req, &selector).await.is_none());
}

#[tokio::test]
async fn dispatch_tools_list_advertises_all_tools() {
    let selector = test_selector();
    let req = JsonRpcRequest::new(Some(RpcId::Number(1)), "tools/list", None);

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    let result = response.result.unwrap();
    let tools = result["tools"].as_array().unwrap();

    let tool_names: Vec<&str> = tools
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();

    assert!(tool_names.contains(&"ads.get"), "Should advertise ads.get");
    assert!(tool_names.contains(&"health"), "Should advertise health");
    assert_eq!(tools.len(), 2, "Should advertise exactly 2 tools");
}

#[tokio::test]
async fn dispatch_get_ads_via_tools_call() {
    let selector = test_selector();
    let req = tool_call(2, "ads.get", Some(serde_json::json!({ "contextKeys": ["travel"] })));

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    assert_eq!(response.id, Some(RpcId::Number(2)));

    let result = response.result.unwrap();
    assert!(result.get("isError").is_none());

    let text = result["content"][0]["text"].as_str().unwrap();
    assert_eq!(ids(&parse_ads(text)), vec!["ad7"]);
}

#[tokio::test]
async fn dispatch_health_via_tools_call() {
    let selector = test_selector();
    let req = tool_call(3, "health", None);

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    let result = response.result.unwrap();

    assert_eq!(
        result["content"][0]["text"].as_str().unwrap(),
        "Ad Service is healthy"
    );
}

#[tokio::test]
async fn dispatch_unknown_tool_is_tool_error() {
    let selector = test_selector();
    let req = tool_call(4, "ads.delete", None);

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    let result = response.result.unwrap();
    assert_eq!(result["isError"].as_bool().unwrap(), true);

    let text = result["content"][0]["text"].as_str().unwrap();
    let err: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(err["error"]["code"].as_str().unwrap(), "unknown_tool");
    assert_eq!(err["error"]["message"].as_str().unwrap(), "Unknown tool: ads.delete");
}

#[tokio::test]
async fn dispatch_tools_call_without_params_is_invalid_params() {
    let selector = test_selector();
    let req = JsonRpcRequest::new(Some(RpcId::Number(5)), "tools/call", None);

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    assert!(response.result.is_none());
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn dispatch_tools_call_with_bad_params_is_invalid_params() {
    let selector = test_selector();
    let req = JsonRpcRequest::new(
        Some(RpcId::Number(6)),
        "tools/call",
        Some(serde_json::json!({ "arguments": {} })),
    );

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn dispatch_unknown_method() {
    let selector = test_selector();
    let req = JsonRpcRequest::new(Some(RpcId::Str("x".into())), "ads/list", None);

    let response = handlers::dispatch(&req, &selector).await.unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert_eq!(error.message, "Method not found: ads/list");
}
