use serde::{Deserialize, Serialize};

use super::request::RpcId;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object (protocol-level errors).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self { code: -32700, message: "Parse error".into(), data: None }
    }

    pub fn invalid_request() -> Self {
        Self { code: -32600, message: "Invalid Request".into(), data: None }
    }

    pub fn invalid_request_with(detail: impl Into<String>) -> Self {
        Self { code: -32600, message: detail.into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self { code: -32602, message: detail.into(), data: None }
    }
}

// ---------------------------------------------------------------------------
// Tool result layer (returned inside a *successful* JSON-RPC response)
// ---------------------------------------------------------------------------

/// Tool call result wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// A single content block inside a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Service-level error types
// ---------------------------------------------------------------------------

/// Service error code (v0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorCode {
    UnknownTool,
    InternalError,
}

impl ServiceErrorCode {
    /// Map to the corresponding JSON-RPC 2.0 error code.
    ///
    /// Caller mistakes    → -32602 (Invalid params)
    /// Server-side faults → -32603 (Internal error)
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::UnknownTool => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// Service error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub code: ServiceErrorCode,
    pub message: String,
}

/// Service error response (top-level)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorResponse {
    pub error: ServiceError,
}

impl ServiceErrorResponse {
    pub fn new(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ServiceError {
                code,
                message: message.into(),
            },
        }
    }

    /// Construct with the canonical message for a given code.
    pub fn canonical(code: ServiceErrorCode) -> Self {
        let message = match &code {
            ServiceErrorCode::UnknownTool => "Unknown tool",
            ServiceErrorCode::InternalError => "Internal error",
        };
        Self::new(code, message)
    }
}

/// Convert a service error into a JSON-RPC error.
///
/// Used when a failure cannot be reported inside a tool result. The full
/// service error object is carried in `data` for structured clients.
impl From<ServiceErrorResponse> for JsonRpcError {
    fn from(err: ServiceErrorResponse) -> Self {
        Self {
            code: err.error.code.json_rpc_code(),
            message: err.error.message.clone(),
            data: serde_json::to_value(&err).ok(),
        }
    }
}

/// Convert a service error into a tool result with `isError: true`.
///
/// The text content is the JSON-serialized `ServiceErrorResponse`.
impl From<ServiceErrorResponse> for ToolResult {
    fn from(err: ServiceErrorResponse) -> Self {
        match serde_json::to_string(&err) {
            Ok(json) => Self::error(format!("{json}\n")),
            Err(_) => Self::error(err.error.message),
        }
    }
}
