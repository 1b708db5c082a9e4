//! Abstraction over concrete language-client implementations.

use std::error::Error;
use std::fmt;

use thiserror::Error;

/// Errors reported by language-client implementations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ClientError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-friendly description without the optional source.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Behaviour required from a client/server pairing.
///
/// Keeping launch and transport details behind this trait lets tests drive
/// the activation lifecycle with lightweight doubles instead of spawning
/// real server processes.
pub trait LanguageClient: Send {
    /// Stable identifier the host uses for labelling and logging.
    fn id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Launches the server and completes the startup handshake.
    fn start(&mut self) -> Result<(), ClientError>;

    /// Stops the pairing, terminating the server process.
    fn stop(&mut self) -> Result<(), ClientError>;
}

impl fmt::Debug for dyn LanguageClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LanguageClient")
    }
}
