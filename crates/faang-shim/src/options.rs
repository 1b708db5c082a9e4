//! Launch descriptors and editor-side client options.

use std::path::PathBuf;

use crate::selector::{DocumentSelector, SelectorError};

/// Command line used to launch the language server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Executable path or name.
    pub command: PathBuf,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// Builds an argument-free launch command.
    #[must_use]
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Replaces the argument list.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// How the server is launched in each execution mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Launch descriptor for normal runs.
    pub run: LaunchCommand,
    /// Launch descriptor when a debugger is attached to the server.
    pub debug: LaunchCommand,
}

impl ServerOptions {
    /// Uses the same argument-free command for both run and debug modes.
    #[must_use]
    pub fn uniform(command: impl Into<PathBuf>) -> Self {
        let run = LaunchCommand::new(command);
        Self {
            debug: run.clone(),
            run,
        }
    }
}

/// Editor-side options for the client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Filter restricting which documents the client attaches to.
    pub document_selector: DocumentSelector,
}

impl ClientOptions {
    /// Options attaching the client to faang source documents.
    pub fn faang_documents() -> Result<Self, SelectorError> {
        Ok(Self {
            document_selector: DocumentSelector::faang_documents()?,
        })
    }
}
