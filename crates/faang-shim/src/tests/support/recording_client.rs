//! Recording client used in lifecycle tests.

use std::sync::{Arc, Mutex};

use crate::client::{ClientError, LanguageClient};

/// Lifecycle call recorded by the stub client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `start` was invoked.
    Start,
    /// `stop` was invoked.
    Stop,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<CallKind>,
    running: bool,
}

/// Test double that records every lifecycle call routed through it.
pub struct RecordingClient {
    shared: Arc<Mutex<RecordingState>>,
    fail_start: Option<String>,
    fail_stop: Option<String>,
}

impl RecordingClient {
    /// Creates a client whose lifecycle calls succeed.
    pub fn new() -> Self {
        Self {
            shared: Arc::default(),
            fail_start: None,
            fail_stop: None,
        }
    }

    /// Creates a client whose `start` fails with the given message.
    pub fn failing_start(message: impl Into<String>) -> Self {
        Self {
            fail_start: Some(message.into()),
            ..Self::new()
        }
    }

    /// Creates a client whose `stop` fails with the given message.
    pub fn failing_stop(message: impl Into<String>) -> Self {
        Self {
            fail_stop: Some(message.into()),
            ..Self::new()
        }
    }

    /// Returns a handle for asserting recorded calls after the client has
    /// been boxed away.
    pub fn handle(&self) -> RecordingClientHandle {
        RecordingClientHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl LanguageClient for RecordingClient {
    fn id(&self) -> &str {
        "recording_client"
    }

    fn display_name(&self) -> &str {
        "Recording Client"
    }

    fn start(&mut self) -> Result<(), ClientError> {
        with_state(&self.shared, |state| {
            state.calls.push(CallKind::Start);
            if let Some(message) = &self.fail_start {
                return Err(ClientError::new(message.clone()));
            }
            state.running = true;
            Ok(())
        })
    }

    fn stop(&mut self) -> Result<(), ClientError> {
        with_state(&self.shared, |state| {
            state.calls.push(CallKind::Stop);
            state.running = false;
            if let Some(message) = &self.fail_stop {
                return Err(ClientError::new(message.clone()));
            }
            Ok(())
        })
    }
}

/// Handle exposing recorded state for assertions.
pub struct RecordingClientHandle {
    shared: Arc<Mutex<RecordingState>>,
}

impl RecordingClientHandle {
    /// Ordered list of lifecycle calls the client observed.
    pub fn calls(&self) -> Vec<CallKind> {
        with_state(&self.shared, |state| state.calls.clone())
    }

    /// Whether the client currently considers itself running.
    pub fn running(&self) -> bool {
        with_state(&self.shared, |state| state.running)
    }
}

fn with_state<R>(
    shared: &Arc<Mutex<RecordingState>>,
    action: impl FnOnce(&mut RecordingState) -> R,
) -> R {
    let mut guard = shared.lock().unwrap_or_else(|poison| poison.into_inner());
    action(&mut guard)
}
