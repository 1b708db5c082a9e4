//! Editor-integration shim for the faang language server.
//!
//! The shim wires an external `faang_language-server` executable to an
//! editor host: it resolves the configured executable path (see
//! `faang-shim-config`), restricts document applicability to `**/*.faang`,
//! and starts/stops the client/server pairing on activation/deactivation.
//! The server itself is an external collaborator invoked by path or name;
//! nothing in this crate implements `.faang` language semantics.
//!
//! [`ActivationShim`] owns the single client handle for a session. Concrete
//! launch and transport details stay behind the [`LanguageClient`] trait so
//! tests can drive the lifecycle without spawning processes;
//! [`ProcessLanguageClient`] is the production implementation.

mod client;
mod options;
pub mod process;
mod selector;
mod shim;

#[cfg(test)]
mod tests;

pub use client::{ClientError, LanguageClient};
pub use options::{ClientOptions, LaunchCommand, ServerOptions};
pub use process::ProcessLanguageClient;
pub use selector::{DOCUMENT_GLOB, DocumentSelector, SelectorError};
pub use shim::{ActivationError, ActivationShim, CLIENT_ID, CLIENT_NAME};
