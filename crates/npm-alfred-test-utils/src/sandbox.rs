//! Hermetic runner for the `npm-alfred` binary.
//! - Points the binary at a caller-supplied registry URL
//! - Pins the icon path so output is deterministic
//! - Sends the diagnostic log to a file inside an `assert_fs::TempDir`
//!
//! Everything is cleaned up on drop.

use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use duct::Expression;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub const ICON_PATH: &str = "/workflow/icon.png";

pub struct Sandbox {
    root: TempDir,
    pub home: PathBuf,
    pub log_path: PathBuf,
    registry_url: Option<String>,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create sandbox TempDir");
        let home = root.child("home").to_path_buf();
        let log_path = root.child("alfred.log").to_path_buf();
        fs::create_dir_all(&home).expect("create home dir");

        Self {
            root,
            home,
            log_path,
            registry_url: None,
        }
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Registry base URL handed to the binary through `NPM_REGISTRY_URL`.
    pub fn with_registry(mut self, url: impl Into<String>) -> Self {
        self.registry_url = Some(url.into());
        self
    }

    /// Build a `duct::Expression` for the `npm-alfred` binary with the sandbox env.
    pub fn cmd<I>(&self, args: I) -> Expression
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let bin = assert_cmd::cargo::cargo_bin("npm-alfred");
        let args: Vec<_> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect();
        let expr = duct::cmd(bin, args).dir(self.root_path());
        self.inject_env(expr)
    }

    /// Run the binary and return stdout. Errors if it exits with non-zero status.
    pub fn run<I>(&self, args: I) -> Result<String, String>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        self.cmd(args)
            .read()
            .map_err(|e| format!("command failed: {e}"))
    }

    /// Contents of the diagnostic log, empty if nothing was written.
    pub fn log(&self) -> String {
        fs::read_to_string(&self.log_path).unwrap_or_default()
    }

    pub fn inject_env(&self, mut expr: Expression) -> Expression {
        let mut env_map: HashMap<String, String> = HashMap::new();
        if let Ok(path) = std::env::var("PATH") {
            env_map.insert("PATH".into(), path);
        }
        env_map.insert("HOME".into(), self.home.to_string_lossy().into_owned());
        env_map.insert("NPM_ALFRED_ICON".into(), ICON_PATH.into());
        env_map.insert(
            "NPM_ALFRED_LOG".into(),
            self.log_path.to_string_lossy().into_owned(),
        );
        if let Some(url) = &self.registry_url {
            env_map.insert("NPM_REGISTRY_URL".into(), url.clone());
        }

        expr = expr.full_env(&env_map);

        expr
    }
}
