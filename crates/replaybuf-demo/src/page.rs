//! A toy handler that renders into a `ResponseBuffer`.

use std::fmt::Write as _;
use std::time::{Duration, SystemTime};

use anyhow::bail;
use replaybuf_core::{Cookie, ResponseBuffer};
use serde::Serialize;

use crate::Format;

pub struct Request {
    pub format: Format,
    pub fail: bool,
    pub redirect: Option<String>,
}

#[derive(Serialize)]
struct Inventory<'a> {
    title: &'a str,
    items: &'a [&'a str],
}

const ITEMS: &[&str] = &["bolts", "nuts", "washers"];

pub fn render(request: &Request, buffer: &mut ResponseBuffer) -> anyhow::Result<()> {
    if let Some(url) = &request.redirect {
        buffer.send_redirect(url.as_str());
        return Ok(());
    }

    buffer.set_status(200);
    buffer.add_cookie(Cookie::new("visited", "1").with_path("/").http_only(true));
    buffer.set_date_header("Expires", SystemTime::now() + Duration::from_secs(60));

    match request.format {
        Format::Html => {
            buffer.set_content_type("text/html; charset=utf-8");
            buffer.write_text("<h1>Inventory</h1>\n<ul>\n")?;
            for (i, item) in ITEMS.iter().enumerate() {
                if request.fail && i == 1 {
                    bail!("inventory backend went away after {i} items");
                }
                writeln!(buffer, "  <li>{item}</li>")?;
            }
            buffer.write_text("</ul>")?;
        }
        Format::Json => {
            if request.fail {
                bail!("inventory backend unavailable");
            }
            let body = serde_json::to_vec_pretty(&Inventory {
                title: "Inventory",
                items: ITEMS,
            })?;
            buffer.set_content_type("application/json");
            buffer.set_content_length(body.len() as u64);
            buffer.write_bytes(body)?;
        }
    }

    buffer.close();
    Ok(())
}

pub fn render_error(buffer: &mut ResponseBuffer, error: &anyhow::Error) -> anyhow::Result<()> {
    buffer.set_header("Cache-Control", "no-store");
    buffer.send_error(503, format!("service unavailable: {error}"));
    Ok(())
}
