pub mod get_ads;
pub mod health;

use tracing::error;

use crate::ads::AdSelector;
use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServiceErrorCode, ServiceErrorResponse,
    ToolCallParams, ToolResult,
};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, selector: &AdSelector) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "ad-service",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [
                    {
                        "name": "ads.get",
                        "description": "Get ads matching the given context keys, or random ads when none match",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "contextKeys": {
                                    "type": ["array", "null"],
                                    "items": { "type": "string" },
                                    "description": "Context keys matched case-insensitively against ad categories"
                                }
                            }
                        }
                    },
                    {
                        "name": "health",
                        "description": "Liveness check",
                        "inputSchema": {
                            "type": "object",
                            "properties": {}
                        }
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, selector).await;
            match serde_json::to_value(&tool_result) {
                Ok(result_json) => Some(JsonRpcResponse::success(req.id.clone(), result_json)),
                Err(e) => {
                    error!("ToolResult serialization failed: {e}");
                    let err = ServiceErrorResponse::canonical(ServiceErrorCode::InternalError);
                    Some(JsonRpcResponse::error(req.id.clone(), err.into()))
                }
            }
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, selector: &AdSelector) -> ToolResult {
    match params.name.as_str() {
        "ads.get" => get_ads::handle(params.arguments.as_ref(), selector).await,

        "health" => health::handle().await,

        _ => {
            let mut err = ServiceErrorResponse::canonical(ServiceErrorCode::UnknownTool);
            err.error.message = format!("Unknown tool: {}", params.name);
            err.into()
        }
    }
}
