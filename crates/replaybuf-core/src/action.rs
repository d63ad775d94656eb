//! Recorded response operations.

use std::fmt;

use crate::body::ByteBody;
use crate::cookie::Cookie;
use crate::header::{DateHeader, Header};

/// One recorded response mutation.
///
/// The set is closed: replay matches on it exhaustively, so a new variant
/// cannot be added without teaching replay how to dispatch it. Only
/// `WriteText` and `WriteBytes` change after they are recorded, and only
/// while they are the last entry of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddCookie(Cookie),
    ClearCookie(Cookie),
    SetHeader(Header),
    SetDateHeader(DateHeader),
    SetContentLength(u64),
    SetContentType(String),
    SetStatus(u16),
    SendError { status: u16, message: String },
    SendRedirect(String),
    WriteText(String),
    WriteBytes(ByteBody),
    Flush,
    Close,
}

/// Payload-free tag of an [`Action`], used by log queries and replay
/// error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    AddCookie,
    ClearCookie,
    SetHeader,
    SetDateHeader,
    SetContentLength,
    SetContentType,
    SetStatus,
    SendError,
    SendRedirect,
    WriteText,
    WriteBytes,
    Flush,
    Close,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::AddCookie(_) => ActionKind::AddCookie,
            Action::ClearCookie(_) => ActionKind::ClearCookie,
            Action::SetHeader(_) => ActionKind::SetHeader,
            Action::SetDateHeader(_) => ActionKind::SetDateHeader,
            Action::SetContentLength(_) => ActionKind::SetContentLength,
            Action::SetContentType(_) => ActionKind::SetContentType,
            Action::SetStatus(_) => ActionKind::SetStatus,
            Action::SendError { .. } => ActionKind::SendError,
            Action::SendRedirect(_) => ActionKind::SendRedirect,
            Action::WriteText(_) => ActionKind::WriteText,
            Action::WriteBytes(_) => ActionKind::WriteBytes,
            Action::Flush => ActionKind::Flush,
            Action::Close => ActionKind::Close,
        }
    }

    /// Returns `true` for the accumulating body-write variants.
    pub fn is_body_write(&self) -> bool {
        matches!(self, Action::WriteText(_) | Action::WriteBytes(_))
    }
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::AddCookie => "AddCookie",
            ActionKind::ClearCookie => "ClearCookie",
            ActionKind::SetHeader => "SetHeader",
            ActionKind::SetDateHeader => "SetDateHeader",
            ActionKind::SetContentLength => "SetContentLength",
            ActionKind::SetContentType => "SetContentType",
            ActionKind::SetStatus => "SetStatus",
            ActionKind::SendError => "SendError",
            ActionKind::SendRedirect => "SendRedirect",
            ActionKind::WriteText => "WriteText",
            ActionKind::WriteBytes => "WriteBytes",
            ActionKind::Flush => "Flush",
            ActionKind::Close => "Close",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
