//! Process-backed language client.

use std::mem;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use lsp_types::{ClientCapabilities, InitializeParams, InitializeResult, InitializedParams};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ProcessClientError;
use super::jsonrpc::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
use super::transport::StdioTransport;
use crate::client::{ClientError, LanguageClient};
use crate::options::{ClientOptions, LaunchCommand, ServerOptions};

/// Log target for process client operations.
const CLIENT_TARGET: &str = "faang_shim::process";

/// Upper bound on interleaved messages scanned while waiting for a response.
const MAX_RESPONSE_SCAN: usize = 100;

/// How long a stopping server may take to exit before being killed.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

enum ClientState {
    Idle,
    Running(Connection),
    Stopped,
}

/// Live wiring to a running server process.
struct Connection {
    child: Child,
    transport: StdioTransport,
    next_request_id: i64,
}

impl Connection {
    fn request<P, R>(&mut self, method: &str, params: P) -> Result<R, ProcessClientError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let response = self.request_raw(method, params)?;
        let result = response
            .result
            .ok_or_else(|| ProcessClientError::HandshakeFailed {
                message: format!("empty result for '{method}'"),
            })?;
        Ok(serde_json::from_value(result)?)
    }

    fn request_raw<P>(&mut self, method: &str, params: P) -> Result<JsonRpcResponse, ProcessClientError>
    where
        P: Serialize,
    {
        let params_value = serde_json::to_value(params)?;
        let request = JsonRpcRequest::new(self.next_request_id, method, Some(params_value));
        self.next_request_id += 1;
        let payload = serde_json::to_vec(&request)?;

        debug!(target: CLIENT_TARGET, method, id = request.id, "sending request");

        self.transport.send(&payload)?;
        let response = self.receive_response(request.id)?;

        if let Some(error) = response.error {
            return Err(ProcessClientError::from_jsonrpc(error));
        }

        Ok(response)
    }

    fn notify<P>(&mut self, method: &str, params: P) -> Result<(), ProcessClientError>
    where
        P: Serialize,
    {
        let params_value = serde_json::to_value(params)?;
        let notification = JsonRpcNotification::new(method, Some(params_value));
        let payload = serde_json::to_vec(&notification)?;

        debug!(target: CLIENT_TARGET, method, "sending notification");

        self.transport.send(&payload)?;
        Ok(())
    }

    /// Reads messages until the response for `request_id` arrives, skipping
    /// interleaved server traffic. The scan is bounded so a chatty or
    /// misbehaving server cannot block the lifecycle indefinitely.
    fn receive_response(&mut self, request_id: i64) -> Result<JsonRpcResponse, ProcessClientError> {
        for _ in 0..MAX_RESPONSE_SCAN {
            let bytes = self.transport.receive()?;
            match JsonRpcMessage::from_bytes(&bytes)? {
                JsonRpcMessage::Response(response) if response.id == Some(request_id) => {
                    return Ok(response);
                }
                JsonRpcMessage::Response(response) => {
                    warn!(
                        target: CLIENT_TARGET,
                        expected = request_id,
                        received = ?response.id,
                        "skipping response with unexpected id"
                    );
                }
                JsonRpcMessage::ServerRequest(request) => {
                    warn!(
                        target: CLIENT_TARGET,
                        method = %request.method,
                        id = request.id,
                        "ignoring server-initiated request"
                    );
                }
                JsonRpcMessage::Notification(notification) => {
                    debug!(
                        target: CLIENT_TARGET,
                        method = %notification.method,
                        "skipping server notification"
                    );
                }
            }
        }
        Err(ProcessClientError::ResponseOverrun { request_id })
    }
}

/// Client that spawns the configured server and drives its lifecycle over
/// stdio.
///
/// The state machine is Idle → Running → Stopped. Stopping an Idle or
/// already-Stopped client is a no-op; dropping a Running client kills the
/// server process.
pub struct ProcessLanguageClient {
    id: String,
    name: String,
    server_options: ServerOptions,
    client_options: ClientOptions,
    state: ClientState,
}

impl ProcessLanguageClient {
    /// Builds an unstarted client.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        server_options: ServerOptions,
        client_options: ClientOptions,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            server_options,
            client_options,
            state: ClientState::Idle,
        }
    }

    /// Options the client launches the server with.
    #[must_use]
    pub fn server_options(&self) -> &ServerOptions {
        &self.server_options
    }

    /// Editor-side options, including the document selector.
    #[must_use]
    pub fn client_options(&self) -> &ClientOptions {
        &self.client_options
    }

    /// Whether the pairing is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClientState::Running(_))
    }

    /// Whether the document selector covers the given path.
    #[must_use]
    pub fn handles_document(&self, path: impl AsRef<std::path::Path>) -> bool {
        self.client_options.document_selector.matches(path)
    }

    /// Spawns the launch command with piped stdio.
    fn spawn(launch: &LaunchCommand) -> Result<(Child, StdioTransport), ProcessClientError> {
        debug!(
            target: CLIENT_TARGET,
            command = %launch.command.display(),
            args = ?launch.args,
            "spawning language server process"
        );

        let mut child = Command::new(&launch.command)
            .args(&launch.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ProcessClientError::BinaryNotFound {
                        command: launch.command.display().to_string(),
                        source,
                    }
                } else {
                    ProcessClientError::SpawnFailed {
                        message: format!("failed to start {}", launch.command.display()),
                        source,
                    }
                }
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProcessClientError::SpawnFailed {
                message: "failed to capture stdin".to_string(),
                source: std::io::Error::other("no stdin"),
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ProcessClientError::SpawnFailed {
                message: "failed to capture stdout".to_string(),
                source: std::io::Error::other("no stdout"),
            })?;

        debug!(target: CLIENT_TARGET, pid = child.id(), "language server process spawned");

        Ok((child, StdioTransport::from_child_io(stdout, stdin)))
    }

    fn start_process(&mut self) -> Result<(), ProcessClientError> {
        if matches!(self.state, ClientState::Running(_)) {
            return Err(ProcessClientError::AlreadyStarted);
        }

        let (child, transport) = Self::spawn(&self.server_options.run)?;
        let mut connection = Connection {
            child,
            transport,
            next_request_id: 1,
        };

        if let Err(error) = Self::handshake(&mut connection) {
            // A half-initialized server is not recoverable; reap it before
            // surfacing the failure.
            let _ = connection.child.kill();
            let _ = connection.child.wait();
            return Err(error);
        }

        self.state = ClientState::Running(connection);
        Ok(())
    }

    fn handshake(connection: &mut Connection) -> Result<(), ProcessClientError> {
        let params = InitializeParams {
            process_id: Some(std::process::id()),
            capabilities: ClientCapabilities::default(),
            ..Default::default()
        };

        let result: InitializeResult = connection.request("initialize", params)?;
        connection.notify("initialized", InitializedParams {})?;

        if let Some(info) = &result.server_info {
            debug!(target: CLIENT_TARGET, server = %info.name, "language server initialized");
        }

        Ok(())
    }

    /// Sends the shutdown/exit sequence and tears the process down.
    ///
    /// The process is terminated even when the shutdown request fails; the
    /// failure is reported to the caller afterwards.
    fn stop_process(&mut self) -> Result<(), ProcessClientError> {
        match mem::replace(&mut self.state, ClientState::Stopped) {
            ClientState::Idle | ClientState::Stopped => Ok(()),
            ClientState::Running(mut connection) => {
                debug!(target: CLIENT_TARGET, "initiating graceful shutdown");

                let shutdown = connection.request_raw("shutdown", ()).map(drop);
                if let Err(error) = &shutdown {
                    debug!(target: CLIENT_TARGET, error = %error, "shutdown request failed");
                }
                if let Err(error) = connection.notify("exit", ()) {
                    debug!(target: CLIENT_TARGET, error = %error, "exit notification failed");
                }

                terminate(&mut connection.child);
                shutdown
            }
        }
    }
}

impl LanguageClient for ProcessLanguageClient {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn display_name(&self) -> &str {
        self.name.as_str()
    }

    fn start(&mut self) -> Result<(), ClientError> {
        self.start_process()
            .map_err(|error| ClientError::with_source(format!("failed to start {}", self.name), error))
    }

    fn stop(&mut self) -> Result<(), ClientError> {
        self.stop_process()
            .map_err(|error| ClientError::with_source(format!("failed to stop {}", self.name), error))
    }
}

impl Drop for ProcessLanguageClient {
    fn drop(&mut self) {
        if let ClientState::Running(mut connection) =
            mem::replace(&mut self.state, ClientState::Stopped)
        {
            if let Err(error) = connection.child.kill() {
                warn!(
                    target: CLIENT_TARGET,
                    error = %error,
                    "failed to kill language server process on drop"
                );
            } else {
                let _ = connection.child.wait();
            }
        }
    }
}

impl std::fmt::Debug for ProcessLanguageClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            ClientState::Idle => "idle",
            ClientState::Running(_) => "running",
            ClientState::Stopped => "stopped",
        };
        formatter
            .debug_struct("ProcessLanguageClient")
            .field("id", &self.id)
            .field("state", &state)
            .finish_non_exhaustive()
    }
}

/// Waits briefly for the child to exit after shutdown/exit, then kills it.
fn terminate(child: &mut Child) {
    if let Ok(Some(status)) = child.try_wait() {
        debug!(target: CLIENT_TARGET, ?status, "language server exited");
        return;
    }

    thread::sleep(SHUTDOWN_GRACE);
    match child.try_wait() {
        Ok(Some(status)) => {
            debug!(target: CLIENT_TARGET, ?status, "language server exited during grace period");
        }
        Ok(None) | Err(_) => {
            warn!(target: CLIENT_TARGET, "language server did not exit, killing");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
