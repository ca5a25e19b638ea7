//! Text rendering of decoded messages.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use wapmms_pdu::{Message, Part};

/// Renders headers and a part summary, one item per line.
pub fn dump(message: &Message) -> String {
    let mut out = String::new();

    for (tag, values) in &message.headers {
        for value in values {
            let _ = writeln!(out, "{tag}: {value}");
        }
    }
    for (param, value) in &message.content_type_params {
        let _ = writeln!(out, "  {param}: {value}");
    }

    for (index, part) in message.parts.iter().enumerate() {
        let _ = writeln!(
            out,
            "\nPart {index}: {} ({} bytes)",
            part.content_type,
            part.data.len()
        );
        if !part.filename.is_empty() {
            let _ = writeln!(out, "  Filename: {}", part.filename);
        }
        for (name, value) in &part.headers {
            let _ = writeln!(out, "  {name}: {value}");
        }
        if let Some(text) = part.text() {
            let _ = writeln!(out, "  | {}", text.replace('\n', "\n  | "));
        }
    }

    out
}

/// Picks a file name for a part inside `dir`.
///
/// Only the last path component of the part's own name is used, so a
/// hostile name cannot escape `dir`.
pub fn part_path(dir: &Path, index: usize, part: &Part) -> PathBuf {
    let candidates = [
        Some(part.filename.as_str()),
        part.header("Name"),
        part.header("Content-Location"),
    ];
    let name = candidates
        .into_iter()
        .flatten()
        .filter_map(|name| Path::new(name).file_name())
        .find(|name| !name.is_empty())
        .map_or_else(|| format!("part-{index}.bin").into(), ToOwned::to_owned);
    dir.join(format!("{index:02}-{}", name.to_string_lossy()))
}
