//! Layer-precedence tests for the resolved language-server path.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use rstest::rstest;
use tempfile::TempDir;

use faang_shim_config::{CONFIG_PATH_ENV, DEFAULT_SERVER_COMMAND, SERVER_PATH_ENV, ShimConfig};

/// Serializes tests that touch the process environment.
fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

/// Clears the shim environment variables and restores them on drop.
struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<OsString>)>,
}

impl EnvGuard {
    fn new() -> Self {
        let lock = env_lock();
        let saved = [SERVER_PATH_ENV, CONFIG_PATH_ENV]
            .into_iter()
            .map(|key| {
                let previous = std::env::var_os(key);
                // Environment mutation is `unsafe` on recent toolchains; the
                // guard restores every override in `Drop` so the wider
                // process environment is left unchanged.
                unsafe { std::env::remove_var(key) };
                (key, previous)
            })
            .collect();
        Self {
            _lock: lock,
            saved,
        }
    }

    fn set(&self, key: &str, value: impl AsRef<std::ffi::OsStr>) {
        unsafe { std::env::set_var(key, value) };
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        while let Some((key, value)) = self.saved.pop() {
            match value {
                Some(previous) => unsafe { std::env::set_var(key, previous) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn write_config(dir: &TempDir, path_value: &str) -> PathBuf {
    let file = dir.path().join("faang-shim.toml");
    let contents = format!("[language-server]\npath = \"{path_value}\"\n");
    fs::write(&file, contents).unwrap();
    file
}

fn load(args: &[&str]) -> ShimConfig {
    let mut full = vec!["faang-shim"];
    full.extend_from_slice(args);
    ShimConfig::load_from_iter(full).unwrap()
}

#[rstest]
fn resolves_the_built_in_default_when_nothing_is_configured() {
    let _guard = EnvGuard::new();

    let config = load(&[]);

    assert_eq!(
        config.language_server_path(),
        Path::new(DEFAULT_SERVER_COMMAND)
    );
}

#[rstest]
fn configuration_file_overrides_the_default() {
    let _guard = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "/opt/faang/bin/server");

    let config = load(&["--config-path", file.to_str().unwrap()]);

    assert_eq!(
        config.language_server_path(),
        Path::new("/opt/faang/bin/server")
    );
}

#[rstest]
fn configuration_file_can_be_named_via_the_environment() {
    let guard = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "env-named-server");
    guard.set(CONFIG_PATH_ENV, &file);

    let config = load(&[]);

    assert_eq!(config.language_server_path(), Path::new("env-named-server"));
}

#[rstest]
fn environment_variable_overrides_the_configuration_file() {
    let guard = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "file-server");
    guard.set(SERVER_PATH_ENV, "env-server");

    let config = load(&["--config-path", file.to_str().unwrap()]);

    assert_eq!(config.language_server_path(), Path::new("env-server"));
}

#[rstest]
fn cli_flag_overrides_environment_and_file() {
    let guard = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let file = write_config(&dir, "file-server");
    guard.set(SERVER_PATH_ENV, "env-server");

    let config = load(&[
        "--config-path",
        file.to_str().unwrap(),
        "--language-server-path",
        "cli-server",
    ]);

    assert_eq!(config.language_server_path(), Path::new("cli-server"));
}
