use std::time::SystemTime;

use bytes::Bytes;

use crate::cookie::Cookie;

/// The destination a recorded log is replayed onto.
///
/// Exposes the same operation vocabulary a
/// [`ResponseBuffer`](crate::ResponseBuffer) records. Implementations may
/// be a transport adapter, a test double, or another buffer.
///
/// Every call may fail with the sink's own error type; replay stops at the
/// first failure and reports it through
/// [`ReplayError`](crate::ReplayError).
pub trait ResponseSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_cookie(&mut self, cookie: &Cookie) -> Result<(), Self::Error>;

    fn clear_cookie(&mut self, cookie: &Cookie) -> Result<(), Self::Error>;

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Self::Error>;

    fn set_date_header(&mut self, name: &str, date: SystemTime) -> Result<(), Self::Error>;

    fn set_content_length(&mut self, length: u64) -> Result<(), Self::Error>;

    fn set_content_type(&mut self, mime_type: &str) -> Result<(), Self::Error>;

    fn set_status(&mut self, status: u16) -> Result<(), Self::Error>;

    fn send_error(&mut self, status: u16, message: &str) -> Result<(), Self::Error>;

    fn send_redirect(&mut self, url: &str) -> Result<(), Self::Error>;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Write a byte payload.
    ///
    /// The payload is a cheap handle: when the recorded body was a single
    /// buffer, this is that buffer's original allocation.
    fn write_bytes(&mut self, bytes: Bytes) -> Result<(), Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;

    fn close(&mut self) -> Result<(), Self::Error>;
}
