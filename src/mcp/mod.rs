//! Tool server
//!
//! Exposes the finder to calling agents as three JSON-RPC 2.0 tools:
//! `find_sunshine`, `get_weather_at_location` and `get_current_location`.
//! Messages arrive as newline-delimited JSON on stdin, or as `POST /mcp`
//! bodies when the HTTP transport is enabled.

pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use tools::ToolCall;
