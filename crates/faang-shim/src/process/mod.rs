//! Process-backed language client.
//!
//! Spawns the configured `.faang` language-server executable and drives the
//! protocol lifecycle (initialize/initialized on the way up, shutdown/exit
//! on the way down) as JSON-RPC 2.0 with Content-Length framing over the
//! child's stdio. Only the lifecycle handshake lives here: diagnostics,
//! completion and the rest of the feature surface are negotiated between the
//! server and the editor host, not the shim.

mod client;
mod error;
mod jsonrpc;
mod transport;

pub use client::ProcessLanguageClient;
pub use error::{ProcessClientError, TransportError};
pub use jsonrpc::{
    JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    JsonRpcServerNotification, JsonRpcServerRequest,
};
pub use transport::{StdioTransport, Transport};
