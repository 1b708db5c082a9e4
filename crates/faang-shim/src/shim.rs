//! Activation lifecycle for the faang language client.

use thiserror::Error;
use tracing::debug;

use faang_shim_config::ShimConfig;

use crate::client::{ClientError, LanguageClient};
use crate::options::{ClientOptions, ServerOptions};
use crate::process::ProcessLanguageClient;
use crate::selector::SelectorError;

/// Internal identifier for the client/server pairing.
pub const CLIENT_ID: &str = "faang_language_server";

/// Display name hosts use for labelling and logging.
pub const CLIENT_NAME: &str = "Faang Language Server";

/// Log target for lifecycle operations.
const SHIM_TARGET: &str = "faang_shim::activation";

/// Errors surfaced by the activation lifecycle.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The document selector failed to compile.
    #[error("failed to build document selector: {0}")]
    Selector(#[from] SelectorError),

    /// The client failed to start.
    #[error("failed to start language client: {0}")]
    Start(#[source] ClientError),

    /// The client failed to stop cleanly.
    #[error("failed to stop language client: {0}")]
    Stop(#[source] ClientError),
}

/// Owns the single client handle for one editor session.
///
/// The handle lifecycle is uninitialized → running → stopped: `activate`
/// assigns the handle, `deactivate` releases it, and deactivation before a
/// completed activation is a no-op. Both callbacks take `&mut self`, so the
/// host's serialized lifecycle dispatch is enforced by the borrow checker
/// rather than by locks.
#[derive(Debug, Default)]
pub struct ActivationShim {
    client: Option<Box<dyn LanguageClient>>,
}

impl ActivationShim {
    /// Builds a shim with no client attached.
    #[must_use]
    pub fn new() -> Self {
        Self { client: None }
    }

    /// Resolves the configured executable, constructs the client, and
    /// starts it.
    ///
    /// Run and debug modes launch the same argument-free command, and the
    /// client attaches only to documents matching `**/*.faang`. The
    /// configured path is handed to the process launcher unvalidated (host
    /// configuration is trusted input); launch failures surface as
    /// [`ActivationError::Start`] and leave the shim inactive.
    ///
    /// A repeated activation constructs a fresh client and replaces the
    /// stored handle, dropping the previous pairing. That is observed
    /// behaviour, not a guarantee; hosts invoke activation once per session.
    pub fn activate(&mut self, config: &ShimConfig) -> Result<(), ActivationError> {
        let server_options = ServerOptions::uniform(config.language_server_path());
        let client_options = ClientOptions::faang_documents()?;
        let client =
            ProcessLanguageClient::new(CLIENT_ID, CLIENT_NAME, server_options, client_options);
        self.activate_with(Box::new(client))
    }

    /// Starts the supplied client and stores its handle.
    ///
    /// Seam for tests and alternate client implementations; [`Self::activate`]
    /// is the production entry point.
    pub fn activate_with(
        &mut self,
        mut client: Box<dyn LanguageClient>,
    ) -> Result<(), ActivationError> {
        debug!(
            target: SHIM_TARGET,
            id = client.id(),
            name = client.display_name(),
            "starting language client"
        );
        client.start().map_err(ActivationError::Start)?;
        self.client = Some(client);
        Ok(())
    }

    /// Stops the running client, if one was ever started.
    ///
    /// Without a prior successful activation this returns immediately. The
    /// handle is released regardless of the stop outcome; stop failures are
    /// propagated, not handled here.
    pub fn deactivate(&mut self) -> Result<(), ActivationError> {
        match self.client.take() {
            None => Ok(()),
            Some(mut client) => {
                debug!(target: SHIM_TARGET, id = client.id(), "stopping language client");
                client.stop().map_err(ActivationError::Stop)
            }
        }
    }

    /// Whether a client handle is currently held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.client.is_some()
    }

    /// The held client handle, when active.
    #[must_use]
    pub fn client(&self) -> Option<&dyn LanguageClient> {
        self.client.as_deref()
    }
}
