use serde_json::Value;
use tracing::{debug, error, warn};

use crate::ads::{AdRequest, AdSelector};
use crate::protocol::{ServiceErrorCode, ServiceErrorResponse, ToolResult};

/// Handle an `ads.get` tool call.
///
/// Missing or malformed arguments are treated as an empty request, which
/// selects the random fallback. The call itself never fails on input.
pub async fn handle(arguments: Option<&Value>, selector: &AdSelector) -> ToolResult {
    let request = parse_request(arguments);
    let response = selector.get_ads(&request);
    debug!(served = response.ads.len(), "ads.get");

    match serde_json::to_string(&response) {
        Ok(json) => ToolResult::text(json),
        Err(e) => {
            error!("Serialization failed: {e}");
            ServiceErrorResponse::canonical(ServiceErrorCode::InternalError).into()
        }
    }
}

/// Build the request from raw tool arguments.
///
/// `contextKeys` is read element by element: string entries are kept and
/// anything else is skipped, so one bad entry does not discard the rest.
fn parse_request(arguments: Option<&Value>) -> AdRequest {
    let items = match arguments.and_then(|args| args.get("contextKeys")) {
        None | Some(Value::Null) => return AdRequest::default(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Ignoring non-array contextKeys: {other}");
            return AdRequest::default();
        }
    };

    let keys: Vec<&str> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(key) => Some(key.as_str()),
            other => {
                warn!("Skipping non-string context key: {other}");
                None
            }
        })
        .collect();

    AdRequest::new(keys)
}
