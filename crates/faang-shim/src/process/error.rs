//! Error types for the process-backed client.

use std::io;

use thiserror::Error;

use super::jsonrpc::JsonRpcError;

/// Errors raised while managing the language-server process.
#[derive(Debug, Error)]
pub enum ProcessClientError {
    /// The configured executable was not found.
    #[error("language server binary not found: {command}")]
    BinaryNotFound {
        /// Command that could not be resolved.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Spawning the process failed for another reason.
    #[error("failed to spawn language server: {message}")]
    SpawnFailed {
        /// Description of the spawn failure.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The client was started while already running.
    #[error("language client is already started")]
    AlreadyStarted,

    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// JSON encode/decode failure.
    #[error("JSON codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The server answered with a JSON-RPC error.
    #[error("server returned error: {message} (code: {code})")]
    ServerError {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the server.
        message: String,
    },

    /// The startup handshake did not complete.
    #[error("startup handshake failed: {message}")]
    HandshakeFailed {
        /// Description of the handshake failure.
        message: String,
    },

    /// No matching response arrived within the bounded message scan.
    #[error("no response for request {request_id} within the message budget")]
    ResponseOverrun {
        /// Request awaiting a response.
        request_id: i64,
    },
}

impl ProcessClientError {
    /// Wraps a JSON-RPC error object reported by the server.
    #[must_use]
    pub fn from_jsonrpc(error: JsonRpcError) -> Self {
        Self::ServerError {
            code: error.code,
            message: error.message,
        }
    }
}

/// Transport-layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The message headers lacked a Content-Length.
    #[error("missing Content-Length header")]
    MissingContentLength,

    /// A header line was malformed.
    #[error("invalid header format")]
    InvalidHeader,
}
