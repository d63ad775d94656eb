use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use replaybuf_core::{BufferConfig, ResponseBuffer};
use tracing::{info, warn};

mod page;

#[derive(Parser)]
#[command(
    name = "replaybuf-demo",
    about = "Render a page into a response buffer, recover from failure, then commit",
    version
)]
struct Cli {
    /// Representation to render
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,
    /// Make the handler fail halfway through rendering
    #[arg(long)]
    fail: bool,
    /// Send a redirect instead of a page
    #[arg(long)]
    redirect: Option<String>,
    /// Buffer config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Html,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("replaybuf=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BufferConfig::from_file(path)?,
        None => BufferConfig::default(),
    };

    let mut buffer = ResponseBuffer::with_config(&config);
    let request = page::Request {
        format: cli.format,
        fail: cli.fail,
        redirect: cli.redirect.clone(),
    };

    if let Err(e) = page::render(&request, &mut buffer) {
        warn!(error = %e, entries = buffer.len(), "handler failed, discarding buffered output");
        buffer.reset();
        page::render_error(&mut buffer, &e)?;
    }

    info!(
        entries = buffer.len(),
        redirect = buffer.is_redirect(),
        "committing response"
    );
    let response = replaybuf_http::commit(&buffer)?;

    println!("HTTP/1.1 {}", response.status());
    for (name, value) in response.headers() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    println!();
    println!("{}", String::from_utf8_lossy(response.body()));

    Ok(())
}
