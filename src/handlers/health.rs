use crate::protocol::ToolResult;

pub const HEALTH_STATUS: &str = "Ad Service is healthy";

/// Liveness check.
pub async fn handle() -> ToolResult {
    ToolResult::text(HEALTH_STATUS)
}
