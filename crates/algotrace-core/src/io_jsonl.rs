//! JSON Lines (NDJSON) helpers for streaming `Step` I/O.
//!
//! Long traces (every step owns a full snapshot) can be large, so the reader
//! returns an iterator that *owns* its underlying reader and yields
//! `Result<Step>` one line at a time. The writer serializes straight into a
//! buffered file without intermediate `String`s.
//!
//! We treat both `.jsonl` and `.ndjson` as equivalent line-delimited JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::step::Step;

/// Owning JSONL iterator over `Step`.
pub struct JsonlStepIter {
    rdr: BufReader<File>,
    buf: String,
    line_no: usize,
}

impl JsonlStepIter {
    fn new(file: File) -> Self {
        Self {
            rdr: BufReader::new(file),
            buf: String::with_capacity(8 << 10),
            line_no: 0,
        }
    }
}

impl Iterator for JsonlStepIter {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.rdr.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                let line = self.buf.trim_end_matches(['\n', '\r']);
                if line.is_empty() {
                    return Some(Err(anyhow::anyhow!(
                        "parse jsonl line {}: empty line",
                        self.line_no
                    )));
                }
                let parsed: Result<Step> = serde_json::from_str(line)
                    .with_context(|| format!("parse jsonl line {}", self.line_no));
                Some(parsed)
            }
            Err(e) => Some(Err(e).with_context(|| format!("read line {}", self.line_no + 1))),
        }
    }
}

/// Stream read: one JSON object per line, yielding `Step` items.
///
/// # Errors
/// Opening the file may fail. Individual iteration items may be `Err` if a
/// particular line is malformed.
pub fn stream_steps_jsonl<P: AsRef<Path>>(path: P) -> Result<JsonlStepIter> {
    let f = File::open(path.as_ref())
        .with_context(|| format!("open {}", path.as_ref().display()))?;
    Ok(JsonlStepIter::new(f))
}

/// Write steps as JSON Lines (one object per line).
pub fn write_steps_jsonl<P: AsRef<Path>>(path: P, steps: &[Step]) -> Result<()> {
    write_jsonl(path, steps)
}

/// Generic JSONL writer.
pub fn write_jsonl<P: AsRef<Path>, T: Serialize>(path: P, items: &[T]) -> Result<()> {
    let f = File::create(path.as_ref())
        .with_context(|| format!("create {}", path.as_ref().display()))?;
    let mut w = BufWriter::new(f);
    for it in items {
        serde_json::to_writer(&mut w, it).context("serialize jsonl item")?;
        w.write_all(b"\n").context("write newline")?;
    }
    w.flush().context("flush writer")?;
    Ok(())
}
