//! Configuration for the faang editor-integration shim.
//!
//! The shim consumes a single value: the path or name of the `faang`
//! language-server executable it launches on activation. This crate resolves
//! that value once, at load time, from the usual layers in precedence order:
//!
//! 1. the `--language-server-path` command-line flag,
//! 2. the `FAANG_LANGUAGE_SERVER_PATH` environment variable,
//! 3. a TOML configuration file (`[language-server] path = "..."`),
//! 4. the built-in default [`DEFAULT_SERVER_COMMAND`].
//!
//! The configuration file is only consulted when named explicitly, either
//! via `--config-path` or the `FAANG_CONFIG_PATH` environment variable.
//! Loading is fail-fast: unreadable files, malformed TOML, and unknown keys
//! are errors rather than silently ignored input.
//!
//! The resolved path is not validated; the host's configuration is a trusted
//! input and a bad path surfaces later as a launch failure.

mod defaults;

pub use defaults::{DEFAULT_SERVER_COMMAND, default_server_command};

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the language-server executable path.
pub const SERVER_PATH_ENV: &str = "FAANG_LANGUAGE_SERVER_PATH";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "FAANG_CONFIG_PATH";

/// Resolved shim configuration.
///
/// Immutable after load; the shim reads the server path exactly once per
/// activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    language_server_path: PathBuf,
}

impl ShimConfig {
    /// Loads configuration from the process arguments and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_iter(env::args_os())
    }

    /// Loads configuration from the supplied arguments and the process
    /// environment.
    ///
    /// The first argument is treated as the program name, mirroring
    /// `std::env::args_os`.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli =
            CliArgs::try_parse_from(args).map_err(|source| ConfigError::Arguments { source })?;

        let file = match cli
            .config_path
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        {
            Some(path) => ConfigFile::read(&path)?,
            None => ConfigFile::default(),
        };

        let env_path = env::var_os(SERVER_PATH_ENV).map(PathBuf::from);

        Ok(Self {
            language_server_path: resolve_server_path(
                cli.language_server_path,
                env_path,
                file.language_server.path,
            ),
        })
    }

    /// Builds a configuration with an explicit server path, bypassing the
    /// layered lookup.
    #[must_use]
    pub fn with_server_path(path: impl Into<PathBuf>) -> Self {
        Self {
            language_server_path: path.into(),
        }
    }

    /// Path or name of the language-server executable to launch.
    #[must_use]
    pub fn language_server_path(&self) -> &Path {
        self.language_server_path.as_path()
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            language_server_path: default_server_command(),
        }
    }
}

/// Applies the layer precedence: CLI beats environment beats file beats the
/// built-in default.
fn resolve_server_path(
    cli: Option<PathBuf>,
    env_var: Option<PathBuf>,
    file: Option<PathBuf>,
) -> PathBuf {
    cli.or(env_var)
        .or(file)
        .unwrap_or_else(default_server_command)
}

#[derive(Debug, Parser)]
#[command(name = "faang-shim", disable_version_flag = true)]
struct CliArgs {
    /// Explicit configuration file to load.
    #[arg(long, value_name = "PATH")]
    config_path: Option<PathBuf>,

    /// Path or name of the faang language-server executable.
    #[arg(long, value_name = "PATH")]
    language_server_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(rename = "language-server", default)]
    language_server: LanguageServerSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LanguageServerSection {
    #[serde(default)]
    path: Option<PathBuf>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Errors raised while loading the shim configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Command-line arguments did not parse.
    #[error("invalid command-line arguments: {source}")]
    Arguments {
        /// Underlying parser error.
        #[source]
        source: clap::Error,
    },

    /// The named configuration file could not be read.
    #[error("failed to read configuration file '{}': {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file contents were not valid.
    #[error("failed to parse configuration file '{}': {source}", path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
