//! `Set-Cookie` rendering.

use std::fmt::Write as _;
use std::time::SystemTime;

use replaybuf_core::Cookie;

use crate::date::http_date;
use crate::error::{HttpSinkError, HttpSinkResult};

/// Render a `Set-Cookie` value that stores `cookie`.
pub fn set_cookie_value(cookie: &Cookie) -> HttpSinkResult<String> {
    validate(cookie, true)?;
    let mut out = format!("{}={}", cookie.name, cookie.value);
    if let Some(max_age) = cookie.max_age {
        let _ = write!(out, "; Max-Age={max_age}");
    }
    push_scope(&mut out, cookie);
    Ok(out)
}

/// Render a `Set-Cookie` value that makes the browser drop `cookie`.
///
/// Path and domain are kept, since a cookie is only removed when they
/// match the stored one. The value is not sent.
pub fn clear_cookie_value(cookie: &Cookie) -> HttpSinkResult<String> {
    validate(cookie, false)?;
    let mut out = format!(
        "{}=; Max-Age=0; Expires={}",
        cookie.name,
        http_date(SystemTime::UNIX_EPOCH)
    );
    push_scope(&mut out, cookie);
    Ok(out)
}

/// RFC 6265 §4.1.1 grammar for the parts that end up in `Set-Cookie`.
fn validate(cookie: &Cookie, with_value: bool) -> HttpSinkResult<()> {
    let invalid = |part| HttpSinkError::InvalidCookie {
        name: cookie.name.clone(),
        part,
    };

    if !is_token(&cookie.name) {
        return Err(invalid("name"));
    }
    if with_value && !is_cookie_value(&cookie.value) {
        return Err(invalid("value"));
    }
    if cookie.path.as_deref().is_some_and(|p| !is_attribute_value(p)) {
        return Err(invalid("path"));
    }
    if cookie.domain.as_deref().is_some_and(|d| !is_attribute_value(d)) {
        return Err(invalid("domain"));
    }
    Ok(())
}

fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

fn is_cookie_value(value: &str) -> bool {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.bytes().all(is_cookie_octet)
}

fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

fn is_attribute_value(value: &str) -> bool {
    value.bytes().all(|b| !b.is_ascii_control() && b != b';' && b.is_ascii())
}

fn push_scope(out: &mut String, cookie: &Cookie) {
    if let Some(path) = &cookie.path {
        let _ = write!(out, "; Path={path}");
    }
    if let Some(domain) = &cookie.domain {
        let _ = write!(out, "; Domain={domain}");
    }
    if cookie.secure {
        out.push_str("; Secure");
    }
    if cookie.http_only {
        out.push_str("; HttpOnly");
    }
}
