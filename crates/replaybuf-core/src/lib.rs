//! replaybuf-core — deferred response buffering.
//!
//! A [`ResponseBuffer`] stands in for a real response while application
//! code runs. Every mutation (cookies, headers, status, redirects, body
//! writes, flush, close) is recorded as an [`Action`] in an ordered
//! [`ActionLog`]. Nothing reaches the transport until the caller commits
//! by replaying the log onto a [`ResponseSink`].
//!
//! # Body Writes
//!
//! A buffer accepts either text or bytes, never both. The first body
//! write fixes the [`BodyMode`] for the lifetime of the buffer and a write
//! of the other kind fails with [`BufferError::BodyModeConflict`].
//! Consecutive writes of the same kind coalesce into the entry at the end
//! of the log, so replay hands the sink one call per run of writes.
//!
//! # Zero-Copy Replay
//!
//! Byte payloads are kept as reference-counted `Bytes` chunks. When an
//! entry holds exactly one chunk, replay hands the sink that chunk by
//! refcount, so the sink sees the caller's original allocation. Entries
//! assembled from several chunks are concatenated once.
//!
//! ```text
//! handler ──► ResponseBuffer ──► ActionLog ──replay──► ResponseSink
//! ```

pub mod action;
pub mod body;
pub mod buffer;
pub mod config;
pub mod cookie;
pub mod error;
pub mod header;
pub mod log;
pub mod recording;
pub mod replay;
pub mod sink;

pub use action::{Action, ActionKind};
pub use body::ByteBody;
pub use buffer::ResponseBuffer;
pub use config::BufferConfig;
pub use cookie::Cookie;
pub use error::{BodyMode, BufferError, BufferResult, ReplayError, ReplayResult};
pub use header::{DateHeader, Header};
pub use log::ActionLog;
pub use recording::{RecordingError, RecordingSink, SinkCall};
pub use replay::replay;
pub use sink::ResponseSink;
