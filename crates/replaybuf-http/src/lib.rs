//! replaybuf-http — commits buffered responses into `http` types.
//!
//! [`HttpResponseSink`] implements [`ResponseSink`](replaybuf_core::ResponseSink) on top of an
//! `http::Response<Bytes>` under construction. Replaying a
//! [`ResponseBuffer`](replaybuf_core::ResponseBuffer) onto it produces the response the handler would have
//! produced had it written to the transport directly:
//!
//! ```text
//! ResponseBuffer ──write_to──► HttpResponseSink ──into_response──► http::Response<Bytes>
//! ```
//!
//! Header semantics the buffer leaves open are settled here: `set_header`
//! replaces earlier values of the same name, cookies append `Set-Cookie`
//! headers, and the response commits on flush, error, redirect or close.

pub mod cookie;
pub mod date;
pub mod error;
pub mod sink;

pub use error::{HttpSinkError, HttpSinkResult};
pub use sink::HttpResponseSink;

use bytes::Bytes;
use replaybuf_core::{ReplayResult, ResponseBuffer};

/// Replay `buffer` onto a fresh [`HttpResponseSink`] and return the
/// resulting response.
pub fn commit(buffer: &ResponseBuffer) -> ReplayResult<http::Response<Bytes>, HttpSinkError> {
    let mut sink = HttpResponseSink::new();
    buffer.write_to(&mut sink)?;
    Ok(sink.into_response())
}
