use std::io;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to launch `{command}`: {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
