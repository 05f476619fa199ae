//! Error types for the engine module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while invoking the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine binary not found.
    #[error("engine not found at path: {path}")]
    NotFound { path: PathBuf },

    /// The engine process could not be started or waited on.
    #[error("failed to run engine: {0}")]
    Spawn(#[from] std::io::Error),

    /// The engine ran but reported failure through its exit status.
    #[error("engine exited with {}{}", describe_exit(.code), stderr_tail(.stderr))]
    Exited {
        code: Option<i32>,
        stderr: Option<String>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Lines of captured stderr kept in the error message.
const STDERR_TAIL_LINES: usize = 5;

fn stderr_tail(stderr: &Option<String>) -> String {
    let Some(stderr) = stderr else {
        return String::new();
    };

    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return String::new();
    }

    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!(": {}", lines[start..].join(" | "))
}

impl EngineError {
    /// Creates an exit error from a process status and optional captured stderr.
    pub fn exited(status: std::process::ExitStatus, stderr: Option<String>) -> Self {
        Self::Exited {
            code: status.code(),
            stderr: stderr.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Maps a spawn failure, turning `NotFound` into the dedicated variant.
    pub fn from_spawn(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Spawn(err)
        }
    }
}
