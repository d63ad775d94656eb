//! HTTP response sink.
//!
//! `HttpResponseSink` applies replayed actions to a response under
//! construction, following servlet-style commit rules: once headers are
//! flushed they can no longer change, and once an error, redirect or close
//! completes the response nothing more can be written.

use std::time::SystemTime;

use bytes::{Bytes, BytesMut};
use http::header::{self, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use replaybuf_core::{Cookie, ResponseSink};
use tracing::debug;

use crate::cookie::{clear_cookie_value, set_cookie_value};
use crate::date::http_date;
use crate::error::{HttpSinkError, HttpSinkResult};

/// How far the response has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    /// Status, headers and body may all change.
    Open,
    /// Headers are final; body writes still append.
    HeadersSent,
    /// The response is complete.
    Completed,
}

/// Builds an `http::Response<Bytes>` from replayed actions.
#[derive(Debug)]
pub struct HttpResponseSink {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<Bytes>,
    state: CommitState,
}

impl Default for HttpResponseSink {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponseSink {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            state: CommitState::Open,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state != CommitState::Open
    }

    pub fn body_len(&self) -> usize {
        self.body.iter().map(Bytes::len).sum()
    }

    /// Finish the response.
    ///
    /// A body written in one piece is returned as that same buffer.
    pub fn into_response(mut self) -> http::Response<Bytes> {
        let body = match self.body.len() {
            0 => Bytes::new(),
            1 => self.body.swap_remove(0),
            _ => {
                let mut out = BytesMut::with_capacity(self.body_len());
                for chunk in &self.body {
                    out.extend_from_slice(chunk);
                }
                out.freeze()
            }
        };

        let mut response = http::Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }

    fn ensure_open(&self, operation: &'static str) -> HttpSinkResult<()> {
        match self.state {
            CommitState::Open => Ok(()),
            _ => Err(HttpSinkError::Committed { operation }),
        }
    }

    fn ensure_writable(&self, operation: &'static str) -> HttpSinkResult<()> {
        match self.state {
            CommitState::Completed => Err(HttpSinkError::Committed { operation }),
            _ => Ok(()),
        }
    }

    fn complete(&mut self) {
        if self.state != CommitState::Completed {
            debug!(status = %self.status, body_len = self.body_len(), "response completed");
            self.state = CommitState::Completed;
        }
    }

    fn status_code(status: u16) -> HttpSinkResult<StatusCode> {
        StatusCode::from_u16(status).map_err(|source| HttpSinkError::InvalidStatus { status, source })
    }

    fn header_name(name: &str) -> HttpSinkResult<HeaderName> {
        HeaderName::from_bytes(name.as_bytes()).map_err(|source| HttpSinkError::InvalidHeaderName {
            name: name.to_string(),
            source,
        })
    }

    fn header_value(name: &str, value: &str) -> HttpSinkResult<HeaderValue> {
        HeaderValue::from_str(value).map_err(|source| HttpSinkError::InvalidHeaderValue {
            name: name.to_string(),
            source,
        })
    }

    fn append_body(&mut self, chunk: Bytes) {
        if !chunk.is_empty() {
            self.body.push(chunk);
        }
    }
}

impl ResponseSink for HttpResponseSink {
    type Error = HttpSinkError;

    fn add_cookie(&mut self, cookie: &Cookie) -> HttpSinkResult<()> {
        self.ensure_open("add_cookie")?;
        let value = Self::header_value("set-cookie", &set_cookie_value(cookie)?)?;
        self.headers.append(header::SET_COOKIE, value);
        Ok(())
    }

    fn clear_cookie(&mut self, cookie: &Cookie) -> HttpSinkResult<()> {
        self.ensure_open("clear_cookie")?;
        let value = Self::header_value("set-cookie", &clear_cookie_value(cookie)?)?;
        self.headers.append(header::SET_COOKIE, value);
        Ok(())
    }

    fn set_header(&mut self, name: &str, value: &str) -> HttpSinkResult<()> {
        self.ensure_open("set_header")?;
        let header_name = Self::header_name(name)?;
        let header_value = Self::header_value(name, value)?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    fn set_date_header(&mut self, name: &str, date: SystemTime) -> HttpSinkResult<()> {
        self.ensure_open("set_date_header")?;
        let header_name = Self::header_name(name)?;
        let header_value = Self::header_value(name, &http_date(date))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    fn set_content_length(&mut self, length: u64) -> HttpSinkResult<()> {
        self.ensure_open("set_content_length")?;
        self.headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(length));
        Ok(())
    }

    fn set_content_type(&mut self, mime_type: &str) -> HttpSinkResult<()> {
        self.ensure_open("set_content_type")?;
        let value = Self::header_value("content-type", mime_type)?;
        self.headers.insert(header::CONTENT_TYPE, value);
        Ok(())
    }

    fn set_status(&mut self, status: u16) -> HttpSinkResult<()> {
        self.ensure_open("set_status")?;
        self.status = Self::status_code(status)?;
        Ok(())
    }

    fn send_error(&mut self, status: u16, message: &str) -> HttpSinkResult<()> {
        self.ensure_open("send_error")?;
        self.status = Self::status_code(status)?;
        self.headers.remove(header::CONTENT_LENGTH);
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body.clear();
        self.append_body(Bytes::copy_from_slice(message.as_bytes()));
        self.complete();
        Ok(())
    }

    fn send_redirect(&mut self, url: &str) -> HttpSinkResult<()> {
        self.ensure_open("send_redirect")?;
        let location = Self::header_value("location", url)?;
        self.status = StatusCode::FOUND;
        self.headers.insert(header::LOCATION, location);
        self.headers.remove(header::CONTENT_LENGTH);
        self.body.clear();
        self.complete();
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> HttpSinkResult<()> {
        self.ensure_writable("write_text")?;
        self.append_body(Bytes::copy_from_slice(text.as_bytes()));
        Ok(())
    }

    fn write_bytes(&mut self, bytes: Bytes) -> HttpSinkResult<()> {
        self.ensure_writable("write_bytes")?;
        self.append_body(bytes);
        Ok(())
    }

    fn flush(&mut self) -> HttpSinkResult<()> {
        if self.state == CommitState::Open {
            debug!(status = %self.status, "response headers committed");
            self.state = CommitState::HeadersSent;
        }
        Ok(())
    }

    fn close(&mut self) -> HttpSinkResult<()> {
        self.complete();
        Ok(())
    }
}
