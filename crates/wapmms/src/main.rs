//! `wapmms` - decode MMS PDUs from the command line
//!
//! Reads a binary MMS PDU (or a WAP Push packet carrying one) from a file and
//! prints the decoded headers and parts.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod push;
mod render;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wapmms_pdu::Message;

/// Decode a binary MMS PDU.
#[derive(Debug, Parser)]
#[command(version, max_term_width = 80)]
struct Args {
    /// File holding the PDU.
    path: PathBuf,

    /// The file is a WAP Push packet; decode the MMS PDU it carries.
    #[arg(long)]
    push: bool,

    /// Print the message as JSON.
    #[arg(long)]
    json: bool,

    /// Write every part's payload into this directory.
    #[arg(long, value_name = "DIR")]
    extract: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wapmms=info,wapmms_pdu=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let packet =
        fs::read(&args.path).with_context(|| format!("read {}", args.path.display()))?;
    let pdu = if args.push {
        push::unwrap_push(&packet).context("unwrap wap push")?
    } else {
        packet.as_slice()
    };

    let message = Message::decode(pdu).context("decode mms pdu")?;
    info!(
        fields = message.headers.len(),
        parts = message.parts.len(),
        "decoded {}",
        args.path.display()
    );

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&message).context("encode json")?;
        json.push('\n');
        json
    } else {
        render::dump(&message)
    };
    io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("write output")?;

    if let Some(dir) = &args.extract {
        extract(&message, dir)?;
    }

    Ok(())
}

/// Writes each part's payload into `dir`.
fn extract(message: &Message, dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    for (index, part) in message.parts.iter().enumerate() {
        let path = render::part_path(dir, index, part);
        fs::write(&path, &part.data).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), size = part.data.len(), "extracted part");
    }
    Ok(())
}
