//! Shared test doubles.

mod recording_client;

pub use recording_client::{CallKind, RecordingClient, RecordingClientHandle};
