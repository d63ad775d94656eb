//! Replay of recorded actions onto a sink.

use tracing::{debug, trace};

use crate::action::Action;
use crate::error::{ReplayError, ReplayResult};
use crate::sink::ResponseSink;

/// Replay `actions` onto `sink` in recorded order.
///
/// Issues exactly one sink call per entry. The first sink failure stops
/// replay and is returned together with the failing entry's index; entries
/// already replayed are not undone. The actions are only read, so the same
/// slice can be replayed again onto a fresh sink.
pub fn replay<S>(actions: &[Action], sink: &mut S) -> ReplayResult<(), S::Error>
where
    S: ResponseSink + ?Sized,
{
    debug!(
        entries = actions.len(),
        body_writes = actions.iter().filter(|a| a.is_body_write()).count(),
        "replaying action log"
    );

    for (index, action) in actions.iter().enumerate() {
        trace!(index, kind = %action.kind(), "replaying entry");
        dispatch(action, sink).map_err(|e| ReplayError::new(index, action.kind(), e))?;
    }

    debug!(entries = actions.len(), "action log replayed");
    Ok(())
}

fn dispatch<S>(action: &Action, sink: &mut S) -> Result<(), S::Error>
where
    S: ResponseSink + ?Sized,
{
    match action {
        Action::AddCookie(cookie) => sink.add_cookie(cookie),
        Action::ClearCookie(cookie) => sink.clear_cookie(cookie),
        Action::SetHeader(header) => sink.set_header(&header.name, &header.value),
        Action::SetDateHeader(header) => sink.set_date_header(&header.name, header.date),
        Action::SetContentLength(length) => sink.set_content_length(*length),
        Action::SetContentType(mime_type) => sink.set_content_type(mime_type),
        Action::SetStatus(status) => sink.set_status(*status),
        Action::SendError { status, message } => sink.send_error(*status, message),
        Action::SendRedirect(url) => sink.send_redirect(url),
        Action::WriteText(text) => sink.write_text(text),
        Action::WriteBytes(body) => {
            trace!(len = body.len(), zero_copy = body.is_contiguous(), "writing byte body");
            sink.write_bytes(body.to_bytes())
        }
        Action::Flush => sink.flush(),
        Action::Close => sink.close(),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::body::ByteBody;
    use crate::header::Header;
    use crate::recording::{RecordingSink, SinkCall};

    #[test]
    fn empty_log_makes_no_calls() {
        let mut sink = RecordingSink::new();
        replay(&[], &mut sink).unwrap();
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn dispatches_each_entry_once_in_order() {
        let actions = vec![
            Action::SetStatus(201),
            Action::SetHeader(Header::new("X-A", "1")),
            Action::WriteText("hi".into()),
            Action::Flush,
            Action::Close,
        ];
        let mut sink = RecordingSink::new();
        replay(&actions, &mut sink).unwrap();

        assert_eq!(
            sink.calls(),
            &[
                SinkCall::SetStatus(201),
                SinkCall::SetHeader {
                    name: "X-A".into(),
                    value: "1".into()
                },
                SinkCall::WriteText("hi".into()),
                SinkCall::Flush,
                SinkCall::Close,
            ]
        );
    }

    #[test]
    fn stops_at_first_sink_failure() {
        let actions = vec![Action::SetStatus(200), Action::Flush, Action::Close];
        let mut sink = RecordingSink::new().fail_on(1);

        let err = replay(&actions, &mut sink).unwrap_err();
        assert_eq!(err.index(), 1);
        assert_eq!(err.kind(), crate::ActionKind::Flush);
        assert_eq!(sink.calls(), &[SinkCall::SetStatus(200)]);
    }

    #[test]
    fn single_chunk_body_reaches_sink_without_copy() {
        let payload = Bytes::from(vec![9u8; 4096]);
        let ptr = payload.as_ptr();
        let actions = vec![Action::WriteBytes(ByteBody::from(payload))];

        let mut sink = RecordingSink::new();
        replay(&actions, &mut sink).unwrap();

        match &sink.calls()[0] {
            SinkCall::WriteBytes(b) => assert_eq!(b.as_ptr(), ptr),
            other => panic!("expected WriteBytes, got {other:?}"),
        }
    }
}
