use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::ads::AdSelector;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Ad server that communicates over stdio using newline-delimited JSON-RPC 2.0.
pub struct AdServer {
    selector: AdSelector,
    initialized: bool,
}

impl AdServer {
    pub fn new(selector: AdSelector) -> Self {
        Self {
            selector,
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        self.serve(BufReader::new(stdin), stdout).await
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`.
    pub async fn serve<R, W>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWriteExt + Unpin,
    {
        info!(
            catalog_size = self.selector.catalog().len(),
            policy = ?self.selector.policy(),
            "ad-service listening on stdio"
        );

        let mut raw = Vec::new();

        loop {
            raw.clear();
            // Room for the payload plus a trailing `\r\n`.
            let n = (&mut reader)
                .take(MAX_MESSAGE_BYTES as u64 + 2)
                .read_until(b'\n', &mut raw)
                .await?;
            if n == 0 {
                break;
            }

            let truncated = n == MAX_MESSAGE_BYTES + 2 && raw.last() != Some(&b'\n');
            if truncated {
                discard_line(&mut reader).await?;
            }

            let payload = strip_line_ending(&raw);
            if truncated || payload.len() > MAX_MESSAGE_BYTES {
                warn!("Message too large: over {MAX_MESSAGE_BYTES} bytes");
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                ).await?;
                continue;
            }

            let trimmed = match std::str::from_utf8(payload) {
                Ok(s) => s.trim(),
                Err(_) => {
                    write_response(
                        &mut writer,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                    ).await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Parse error: {e}");
                    write_response(
                        &mut writer,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                    ).await?;
                    continue;
                }
            };

            if req.jsonrpc != "2.0" {
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()),
                ).await?;
                continue;
            }

            // Only `initialize` is allowed before the handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.id.is_none() {
                    continue;
                }
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_request_with("Server not initialized"),
                    ),
                ).await?;
                continue;
            }

            if let Some(resp) = handlers::dispatch(&req, &self.selector).await {
                write_response(&mut writer, &resp).await?;
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }

        Ok(())
    }
}

fn strip_line_ending(raw: &[u8]) -> &[u8] {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Skip the remainder of the current line, up to and including `\n`.
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|b| *b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

async fn write_response<W>(
    writer: &mut W,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>>
where
    W: AsyncWriteExt + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
