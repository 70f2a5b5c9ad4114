use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::model::Review;

/// Write all reviews as a single JSON array. `indent` of 0 emits compact
/// output; otherwise that many spaces per nesting level.
pub fn write_json(reviews: &[Review], path: &Path, indent: usize) -> Result<()> {
    ensure_parent_dir(path)?;
    let file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    if indent == 0 {
        serde_json::to_writer(&mut writer, reviews)?;
    } else {
        let indent_bytes = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        reviews.serialize(&mut ser)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("JSON export complete: {}", path.display());
    Ok(())
}

/// Write reviews as newline-delimited JSON, one object per line.
pub fn write_ndjson(reviews: &[Review], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for review in reviews {
        serde_json::to_writer(&mut writer, review)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    info!("NDJSON export complete: {}", path.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(())
}

// ── Tests ──
