//! Engine error types.

use std::fmt;

use thiserror::Error;

/// The three asynchronous operations that each own one in-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Perturbation,
    Assessment,
    Chat,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perturbation => "perturbation",
            Self::Assessment => "assessment",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The operation's slot is already occupied; nothing changed.
    #[error("{operation} already in progress")]
    Busy { operation: Operation },

    /// The assessment service failed; the previous assessment is kept.
    #[error("assessment failed: {source}")]
    AnalysisFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat input was blank after trimming.
    #[error("message text is empty")]
    EmptyMessage,

    /// A completion arrived for an operation that was never begun.
    #[error("no {operation} in flight")]
    NothingInFlight { operation: Operation },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
}
