use async_trait::async_trait;
use mcp_core::{
    error_codes, Error, JsonRpcId, JsonRpcMessage, JsonRpcRequest, Protocol, Result, ToolHandler,
    ToolInfo,
};
use serde_json::{json, Value};
use std::sync::Arc;

struct EchoTool;

#[async_trait]
impl ToolHandler for EchoTool {
    fn tool_info(&self) -> ToolInfo {
        ToolInfo {
            name: "echo".to_string(),
            description: "Echoes its arguments back".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            }),
        }
    }

    async fn handle(&self, params: Option<Value>) -> Result<Value> {
        let params = params.ok_or_else(|| Error::InvalidParams("missing arguments".into()))?;
        Ok(params)
    }
}

struct FailingTool;

#[async_trait]
impl ToolHandler for FailingTool {
    fn tool_info(&self) -> ToolInfo {
        ToolInfo {
            name: "always_fails".to_string(),
            description: "Fails on every call".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        }
    }

    async fn handle(&self, _params: Option<Value>) -> Result<Value> {
        Err(Error::Tool("deliberate failure".into()))
    }
}

fn test_protocol() -> Protocol {
    Protocol::builder("test-server", "0.0.1")
        .protocol_version("2025-03-26")
        .tool(Arc::new(EchoTool))
        .tool(Arc::new(FailingTool))
        .build()
}

fn request(method: &str, params: Option<Value>, id: i64) -> JsonRpcMessage {
    JsonRpcMessage::Request(JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: JsonRpcId::Number(id),
    })
}

fn unwrap_response(msg: Option<JsonRpcMessage>) -> mcp_core::JsonRpcResponse {
    match msg {
        Some(JsonRpcMessage::Response(resp)) => resp,
        other => panic!("expected a single response, got {other:?}"),
    }
}

#[tokio::test]
async fn initialize_reports_server_info_and_version() {
    let protocol = test_protocol();
    let resp = unwrap_response(
        protocol
            .handle_message(request("initialize", None, 1))
            .await,
    );

    let result = resp.result.expect("initialize must succeed");
    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], "test-server");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn tools_list_preserves_registration_order() {
    let protocol = test_protocol();
    let resp = unwrap_response(protocol.handle_message(request("tools/list", None, 2)).await);

    let tools = resp.result.expect("tools/list must succeed");
    let names: Vec<&str> = tools["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["echo", "always_fails"]);
}

#[tokio::test]
async fn tools_call_wraps_success_in_content() {
    let protocol = test_protocol();
    let params = json!({"name": "echo", "arguments": {"text": "hi"}});
    let resp = unwrap_response(
        protocol
            .handle_message(request("tools/call", Some(params), 3))
            .await,
    );

    let result = resp.result.expect("tools/call must succeed");
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("hi"));
}

#[tokio::test]
async fn tool_failure_rides_in_successful_envelope() {
    let protocol = test_protocol();
    let params = json!({"name": "always_fails", "arguments": {}});
    let resp = unwrap_response(
        protocol
            .handle_message(request("tools/call", Some(params), 4))
            .await,
    );

    assert!(resp.error.is_none(), "tool errors are not protocol errors");
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("deliberate failure"));
}

#[tokio::test]
async fn unknown_tool_is_method_not_found() {
    let protocol = test_protocol();
    let params = json!({"name": "nonexistent", "arguments": {}});
    let resp = unwrap_response(
        protocol
            .handle_message(request("tools/call", Some(params), 5))
            .await,
    );

    let error = resp.error.expect("unknown tool must be a protocol error");
    assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
    assert!(error.message.contains("nonexistent"));
}

#[tokio::test]
async fn tools_call_without_params_is_invalid_params() {
    let protocol = test_protocol();
    let resp = unwrap_response(protocol.handle_message(request("tools/call", None, 6)).await);

    let error = resp.error.expect("missing params must fail");
    assert_eq!(error.code, error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let protocol = test_protocol();
    let resp = unwrap_response(
        protocol
            .handle_message(request("resources/list", None, 7))
            .await,
    );

    let error = resp.error.expect("unknown method must fail");
    assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
}

#[tokio::test]
async fn ping_returns_empty_result() {
    let protocol = test_protocol();
    let resp = unwrap_response(protocol.handle_message(request("ping", None, 8)).await);
    assert_eq!(resp.result, Some(json!({})));
}

#[tokio::test]
async fn notification_produces_no_response() {
    let protocol = test_protocol();
    let notif = JsonRpcMessage::Notification(mcp_core::JsonRpcNotification {
        jsonrpc: "2.0".to_string(),
        method: "notifications/initialized".to_string(),
        params: None,
    });
    assert!(protocol.handle_message(notif).await.is_none());
}

#[tokio::test]
async fn batch_answers_requests_and_skips_notifications() {
    let protocol = test_protocol();
    let batch = JsonRpcMessage::Batch(vec![
        request("ping", None, 9),
        JsonRpcMessage::Notification(mcp_core::JsonRpcNotification {
            jsonrpc: "2.0".to_string(),
            method: "notifications/initialized".to_string(),
            params: None,
        }),
        request("tools/list", None, 10),
    ]);

    match protocol.handle_message(batch).await {
        Some(JsonRpcMessage::Batch(responses)) => assert_eq!(responses.len(), 2),
        other => panic!("expected batch response, got {other:?}"),
    }
}
