//! Error types for response buffering and replay.

use std::fmt;

use thiserror::Error;

use crate::action::ActionKind;

/// Result type alias for buffer mutations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Result type alias for replay onto a sink whose error type is `E`.
pub type ReplayResult<T, E> = Result<T, ReplayError<E>>;

/// The kind of body a buffer has committed to.
///
/// Fixed by the first body write and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyMode {
    Text,
    Bytes,
}

impl BodyMode {
    /// Name of the buffer operation that establishes this mode.
    pub fn operation(self) -> &'static str {
        match self {
            BodyMode::Text => "write_text",
            BodyMode::Bytes => "write_bytes",
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyMode::Text => "text",
            BodyMode::Bytes => "bytes",
        })
    }
}

/// Errors raised synchronously by [`ResponseBuffer`](crate::ResponseBuffer)
/// mutations. These indicate a programming error in the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error(
        "cannot call {} after {} has been called",
        .refused.operation(),
        .established.operation()
    )]
    BodyModeConflict {
        established: BodyMode,
        refused: BodyMode,
    },
}

/// A sink failure during replay.
///
/// Identifies the log entry that failed. The sink's own error is kept
/// untouched as the [`source`](std::error::Error::source).
#[derive(Debug, Error)]
#[error("sink rejected {kind} at log entry {index}")]
pub struct ReplayError<E>
where
    E: std::error::Error + 'static,
{
    index: usize,
    kind: ActionKind,
    #[source]
    source: E,
}

impl<E> ReplayError<E>
where
    E: std::error::Error + 'static,
{
    pub(crate) fn new(index: usize, kind: ActionKind, source: E) -> Self {
        Self {
            index,
            kind,
            source,
        }
    }

    /// Position of the failing entry in the log.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn sink_error(&self) -> &E {
        &self.source
    }

    pub fn into_sink_error(self) -> E {
        self.source
    }
}
