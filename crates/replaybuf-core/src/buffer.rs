//! The recording response.

use std::fmt;
use std::io;
use std::time::SystemTime;

use bytes::Bytes;
use tracing::trace;

use crate::action::Action;
use crate::body::ByteBody;
use crate::config::BufferConfig;
use crate::cookie::Cookie;
use crate::error::{BodyMode, BufferError, BufferResult, ReplayResult};
use crate::header::{DateHeader, Header};
use crate::log::ActionLog;
use crate::sink::ResponseSink;

/// A response that records mutations instead of performing them.
///
/// Each call appends to the buffer's [`ActionLog`]; nothing touches a
/// transport until [`write_to`](ResponseBuffer::write_to) replays the log
/// onto a real sink. Dropping the buffer discards the response.
///
/// # Body Writes
///
/// The first body write fixes the buffer's [`BodyMode`]. A later write of
/// the other kind fails with [`BufferError::BodyModeConflict`] and leaves
/// the log untouched. Writes of the established kind extend the
/// accumulator when it is the last entry; after any other entry they open
/// a new one, so body data stays in order relative to headers and flushes.
///
/// Non-body operations always append a fresh entry, duplicates included.
#[derive(Debug, Clone)]
pub struct ResponseBuffer {
    log: ActionLog,
    mode: Option<BodyMode>,
    text_capacity: usize,
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::with_config(&BufferConfig::default())
    }

    pub fn with_config(config: &BufferConfig) -> Self {
        Self {
            log: ActionLog::with_capacity(config.log_capacity),
            mode: None,
            text_capacity: config.text_capacity,
        }
    }

    pub fn add_cookie(&mut self, cookie: Cookie) {
        self.log.push(Action::AddCookie(cookie));
    }

    pub fn clear_cookie(&mut self, cookie: Cookie) {
        self.log.push(Action::ClearCookie(cookie));
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.log.push(Action::SetHeader(Header::new(name, value)));
    }

    pub fn set_date_header(&mut self, name: impl Into<String>, date: SystemTime) {
        self.log.push(Action::SetDateHeader(DateHeader::new(name, date)));
    }

    pub fn set_content_length(&mut self, length: u64) {
        self.log.push(Action::SetContentLength(length));
    }

    pub fn set_content_type(&mut self, mime_type: impl Into<String>) {
        self.log.push(Action::SetContentType(mime_type.into()));
    }

    pub fn set_status(&mut self, status: u16) {
        self.log.push(Action::SetStatus(status));
    }

    pub fn send_error(&mut self, status: u16, message: impl Into<String>) {
        self.log.push(Action::SendError {
            status,
            message: message.into(),
        });
    }

    pub fn send_redirect(&mut self, url: impl Into<String>) {
        self.log.push(Action::SendRedirect(url.into()));
    }

    /// Append text to the body.
    pub fn write_text(&mut self, text: &str) -> BufferResult<()> {
        self.enter_mode(BodyMode::Text)?;

        if let Some(Action::WriteText(buf)) = self.log.last_mut() {
            buf.push_str(text);
        } else {
            let mut buf = String::with_capacity(self.text_capacity.max(text.len()));
            buf.push_str(text);
            trace!(capacity = buf.capacity(), "opening text accumulator");
            self.log.push(Action::WriteText(buf));
        }
        Ok(())
    }

    /// Append an owned byte buffer to the body without copying it.
    ///
    /// If this is the only chunk of its entry, replay hands the sink this
    /// same allocation.
    pub fn write_bytes(&mut self, data: impl Into<Bytes>) -> BufferResult<()> {
        let data = data.into();
        self.enter_mode(BodyMode::Bytes)?;

        if let Some(Action::WriteBytes(body)) = self.log.last_mut() {
            body.push(data);
        } else {
            trace!(len = data.len(), "opening byte accumulator");
            self.log.push(Action::WriteBytes(ByteBody::from(data)));
        }
        Ok(())
    }

    /// Append a borrowed byte slice to the body. The slice is copied once,
    /// on entry.
    pub fn write_slice(&mut self, data: &[u8]) -> BufferResult<()> {
        self.enter_mode(BodyMode::Bytes)?;

        if let Some(Action::WriteBytes(body)) = self.log.last_mut() {
            body.extend_from_slice(data);
        } else {
            trace!(len = data.len(), "opening byte accumulator");
            let mut body = ByteBody::new();
            body.extend_from_slice(data);
            self.log.push(Action::WriteBytes(body));
        }
        Ok(())
    }

    pub fn flush(&mut self) {
        self.log.push(Action::Flush);
    }

    pub fn close(&mut self) {
        self.log.push(Action::Close);
    }

    fn enter_mode(&mut self, requested: BodyMode) -> BufferResult<()> {
        match self.mode {
            Some(established) if established != requested => Err(BufferError::BodyModeConflict {
                established,
                refused: requested,
            }),
            _ => {
                self.mode = Some(requested);
                Ok(())
            }
        }
    }

    /// Replay the recorded actions onto `sink`.
    pub fn write_to<S>(&self, sink: &mut S) -> ReplayResult<(), S::Error>
    where
        S: ResponseSink + ?Sized,
    {
        self.log.replay(sink)
    }

    /// Returns `true` if a redirect has been recorded.
    pub fn is_redirect(&self) -> bool {
        self.log.is_redirect()
    }

    /// The body kind fixed by the first body write, if any.
    pub fn body_mode(&self) -> Option<BodyMode> {
        self.mode
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn actions(&self) -> &[Action] {
        self.log.as_slice()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn into_log(self) -> ActionLog {
        self.log
    }

    /// Discard everything recorded, including the body mode.
    pub fn reset(&mut self) {
        self.log.clear();
        self.mode = None;
    }
}

impl fmt::Write for ResponseBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s).map_err(|e| {
            // fmt::Error carries no payload
            trace!(error = %e, "text write refused");
            fmt::Error
        })
    }
}

impl io::Write for ResponseBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_slice(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ResponseBuffer::flush(self);
        Ok(())
    }
}

/// Lets one buffer's log be replayed into another buffer.
impl ResponseSink for ResponseBuffer {
    type Error = BufferError;

    fn add_cookie(&mut self, cookie: &Cookie) -> BufferResult<()> {
        ResponseBuffer::add_cookie(self, cookie.clone());
        Ok(())
    }

    fn clear_cookie(&mut self, cookie: &Cookie) -> BufferResult<()> {
        ResponseBuffer::clear_cookie(self, cookie.clone());
        Ok(())
    }

    fn set_header(&mut self, name: &str, value: &str) -> BufferResult<()> {
        ResponseBuffer::set_header(self, name, value);
        Ok(())
    }

    fn set_date_header(&mut self, name: &str, date: SystemTime) -> BufferResult<()> {
        ResponseBuffer::set_date_header(self, name, date);
        Ok(())
    }

    fn set_content_length(&mut self, length: u64) -> BufferResult<()> {
        ResponseBuffer::set_content_length(self, length);
        Ok(())
    }

    fn set_content_type(&mut self, mime_type: &str) -> BufferResult<()> {
        ResponseBuffer::set_content_type(self, mime_type);
        Ok(())
    }

    fn set_status(&mut self, status: u16) -> BufferResult<()> {
        ResponseBuffer::set_status(self, status);
        Ok(())
    }

    fn send_error(&mut self, status: u16, message: &str) -> BufferResult<()> {
        ResponseBuffer::send_error(self, status, message);
        Ok(())
    }

    fn send_redirect(&mut self, url: &str) -> BufferResult<()> {
        ResponseBuffer::send_redirect(self, url);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> BufferResult<()> {
        ResponseBuffer::write_text(self, text)
    }

    fn write_bytes(&mut self, bytes: Bytes) -> BufferResult<()> {
        ResponseBuffer::write_bytes(self, bytes)
    }

    fn flush(&mut self) -> BufferResult<()> {
        ResponseBuffer::flush(self);
        Ok(())
    }

    fn close(&mut self) -> BufferResult<()> {
        ResponseBuffer::close(self);
        Ok(())
    }
}
