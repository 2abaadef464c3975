use std::{io, path::PathBuf};

use thiserror::Error;

use crate::dict::ParseError;

/// Errors raised while reading, writing, or running tools in a [`Case`](super::Case).
#[derive(Debug, Error)]
pub enum CaseError {
    /// A filesystem operation failed.
    #[error("i/o error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A new case was requested at a path that is already taken.
    #[error("refusing to write to existing path: {path}")]
    Exists { path: PathBuf },

    /// An existing dictionary could not be read back.
    #[error("malformed dictionary {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The external executable could not be started.
    #[error("failed to start {tool}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The external executable ran but reported failure.
    #[error("{tool} exited with status {status:?}")]
    ToolFailed {
        tool: String,

        /// Exit code, or `None` if the process was terminated by a signal.
        status: Option<i32>,

        /// Log file holding the tool's output, when logging is enabled.
        log: Option<PathBuf>,
    },
}

impl CaseError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
