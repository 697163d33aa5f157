//! Diagnostic log. Stdout carries the feedback document, so log records go
//! to a file.

use env_logger::{Env, Target, WriteStyle};
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_PATH: &str = "/tmp/alfred.log";

/// `NPM_ALFRED_LOG` when set, otherwise [`DEFAULT_LOG_PATH`].
pub fn log_path() -> PathBuf {
    log_path_from(std::env::var_os("NPM_ALFRED_LOG"))
}

fn log_path_from(var: Option<OsString>) -> PathBuf {
    var.filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global logger (overridden by RUST_LOG).
///
/// Logs at debug level into `path`. If the file cannot be opened, only errors
/// are logged, to stderr.
pub fn init(path: &Path) {
    let (default_filter, target) = match open_log_file(path) {
        Ok(file) => ("debug", Target::Pipe(Box::new(file))),
        Err(_) => ("error", Target::Stderr),
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(target)
        .write_style(WriteStyle::Never)
        .init();
}
