//! Built-in defaults applied when no configuration layer provides a value.

use std::path::PathBuf;

/// Executable launched when the language-server path is not configured.
///
/// The server is looked up by name, so an unqualified value relies on the
/// platform's executable search path.
pub const DEFAULT_SERVER_COMMAND: &str = "faang_language-server";

/// Owned default command value used where a `PathBuf` is required.
#[must_use]
pub fn default_server_command() -> PathBuf {
    PathBuf::from(DEFAULT_SERVER_COMMAND)
}
