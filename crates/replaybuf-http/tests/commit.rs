//! End-to-end tests: record into a `ResponseBuffer`, commit into an
//! `http::Response`.

use bytes::Bytes;
use http::{StatusCode, header};
use replaybuf_core::{ActionKind, Cookie, ResponseBuffer};
use replaybuf_http::{HttpResponseSink, HttpSinkError, commit};

#[test]
fn committed_response_matches_recorded_calls() {
    let mut buffer = ResponseBuffer::new();
    buffer.set_status(201);
    buffer.set_content_type("text/html; charset=utf-8");
    buffer.add_cookie(Cookie::new("sid", "7").with_path("/").http_only(true));
    buffer.set_header("X-Attempt", "1");
    buffer.set_header("X-Attempt", "2");
    buffer.write_text("<h1>").unwrap();
    buffer.write_text("created").unwrap();
    buffer.write_text("</h1>").unwrap();
    buffer.close();

    let response = commit(&buffer).unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::SET_COOKIE].to_str().unwrap(),
        "sid=7; Path=/; HttpOnly"
    );
    // duplicates are both replayed; the sink keeps the last
    assert_eq!(response.headers()["x-attempt"].to_str().unwrap(), "2");
    assert_eq!(response.body().as_ref(), b"<h1>created</h1>");
}

#[test]
fn discarded_attempt_never_reaches_the_response() {
    let mut attempt = ResponseBuffer::new();
    attempt.set_status(200);
    attempt.write_text("half a page").unwrap();
    // handler fails here; the attempt is thrown away
    drop(attempt);

    let mut fallback = ResponseBuffer::new();
    fallback.send_error(500, "internal error");

    let response = commit(&fallback).unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body().as_ref(), b"internal error");
}

#[test]
fn redirect_commits_location() {
    let mut buffer = ResponseBuffer::new();
    buffer.send_redirect("/login");
    assert!(buffer.is_redirect());

    let response = commit(&buffer).unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        "/login"
    );
}

#[test]
fn single_byte_payload_survives_commit_without_copy() {
    let payload = Bytes::from(vec![0xEE; 32 * 1024]);
    let ptr = payload.as_ptr();

    let mut buffer = ResponseBuffer::new();
    buffer.set_content_type("application/octet-stream");
    buffer.set_content_length(payload.len() as u64);
    buffer.write_bytes(payload).unwrap();

    let response = commit(&buffer).unwrap();
    assert_eq!(response.body().as_ptr(), ptr);
    assert_eq!(
        response.headers()[header::CONTENT_LENGTH].to_str().unwrap(),
        "32768"
    );
}

#[test]
fn header_after_flush_fails_at_that_entry() {
    let mut buffer = ResponseBuffer::new();
    buffer.write_text("streamed").unwrap();
    buffer.flush();
    buffer.set_header("X-Late", "1");
    buffer.write_text("never replayed").unwrap();

    let mut sink = HttpResponseSink::new();
    let err = buffer.write_to(&mut sink).unwrap_err();

    assert_eq!(err.index(), 2);
    assert_eq!(err.kind(), ActionKind::SetHeader);
    assert!(matches!(
        err.sink_error(),
        HttpSinkError::Committed {
            operation: "set_header"
        }
    ));
    // entries before the failure were applied, nothing after it
    assert_eq!(sink.into_response().body().as_ref(), b"streamed");
}

#[test]
fn invalid_status_surfaces_as_replay_error() {
    let mut buffer = ResponseBuffer::new();
    buffer.set_status(42);

    let err = commit(&buffer).unwrap_err();
    assert_eq!(err.index(), 0);
    assert!(matches!(
        err.into_sink_error(),
        HttpSinkError::InvalidStatus { status: 42, .. }
    ));
}

#[test]
fn cookie_attribute_injection_fails_the_commit() {
    let mut buffer = ResponseBuffer::new();
    buffer.set_status(200);
    buffer.add_cookie(Cookie::new("a", "1; Domain=evil.example"));
    buffer.write_text("ok").unwrap();

    let err = commit(&buffer).unwrap_err();
    assert_eq!(err.index(), 1);
    assert_eq!(err.kind(), ActionKind::AddCookie);
    assert!(matches!(
        err.into_sink_error(),
        HttpSinkError::InvalidCookie { part: "value", .. }
    ));
}
