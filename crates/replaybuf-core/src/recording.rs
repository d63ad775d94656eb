//! A sink that records every call it receives.
//!
//! Useful for asserting what a replay would do to a real response without
//! building one, and for exercising the fail-fast path with
//! [`RecordingSink::fail_on`].

use std::time::SystemTime;

use bytes::Bytes;
use thiserror::Error;

use crate::cookie::Cookie;
use crate::sink::ResponseSink;

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    AddCookie(Cookie),
    ClearCookie(Cookie),
    SetHeader { name: String, value: String },
    SetDateHeader { name: String, date: SystemTime },
    SetContentLength(u64),
    SetContentType(String),
    SetStatus(u16),
    SendError { status: u16, message: String },
    SendRedirect(String),
    WriteText(String),
    WriteBytes(Bytes),
    Flush,
    Close,
}

/// Injected failure returned by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("recording sink refused call #{call}")]
pub struct RecordingError {
    pub call: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
    fail_on: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the call at zero-based position `call` fail. The failing call
    /// is not recorded.
    pub fn fail_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<SinkCall> {
        self.calls
    }

    fn record(&mut self, call: SinkCall) -> Result<(), RecordingError> {
        let position = self.calls.len();
        if self.fail_on == Some(position) {
            return Err(RecordingError { call: position });
        }
        self.calls.push(call);
        Ok(())
    }
}

impl ResponseSink for RecordingSink {
    type Error = RecordingError;

    fn add_cookie(&mut self, cookie: &Cookie) -> Result<(), Self::Error> {
        self.record(SinkCall::AddCookie(cookie.clone()))
    }

    fn clear_cookie(&mut self, cookie: &Cookie) -> Result<(), Self::Error> {
        self.record(SinkCall::ClearCookie(cookie.clone()))
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        self.record(SinkCall::SetHeader {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    fn set_date_header(&mut self, name: &str, date: SystemTime) -> Result<(), Self::Error> {
        self.record(SinkCall::SetDateHeader {
            name: name.to_string(),
            date,
        })
    }

    fn set_content_length(&mut self, length: u64) -> Result<(), Self::Error> {
        self.record(SinkCall::SetContentLength(length))
    }

    fn set_content_type(&mut self, mime_type: &str) -> Result<(), Self::Error> {
        self.record(SinkCall::SetContentType(mime_type.to_string()))
    }

    fn set_status(&mut self, status: u16) -> Result<(), Self::Error> {
        self.record(SinkCall::SetStatus(status))
    }

    fn send_error(&mut self, status: u16, message: &str) -> Result<(), Self::Error> {
        self.record(SinkCall::SendError {
            status,
            message: message.to_string(),
        })
    }

    fn send_redirect(&mut self, url: &str) -> Result<(), Self::Error> {
        self.record(SinkCall::SendRedirect(url.to_string()))
    }

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(SinkCall::WriteText(text.to_string()))
    }

    fn write_bytes(&mut self, bytes: Bytes) -> Result<(), Self::Error> {
        self.record(SinkCall::WriteBytes(bytes))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.record(SinkCall::Flush)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.record(SinkCall::Close)
    }
}
