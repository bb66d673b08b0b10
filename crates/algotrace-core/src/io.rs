//! Serialization helpers for the `TraceFile` envelope.
//!
//! JSON and CBOR read/write utilities with extension-based auto-detection.
//! Unknown/missing extensions are rejected for reads and default to JSON
//! for writes. `.jsonl`/`.ndjson` paths are routed to [`crate::io_jsonl`],
//! which carries steps only (no envelope).

use crate::format::TraceFile;
use crate::io_jsonl::{stream_steps_jsonl, write_steps_jsonl};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Ensure the parent directory for a file exists (no-op if none).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", display(path)))?;
        }
    }
    Ok(())
}

/* ---------------- JSON ---------------- */

/// Read a `TraceFile` from **JSON**.
pub fn read_trace_json<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let rdr = BufReader::new(f);
    let v: TraceFile =
        serde_json::from_reader(rdr).with_context(|| "deserialize JSON trace file")?;
    Ok(v)
}

/// Write a `TraceFile` to **JSON** (pretty).
pub fn write_trace_json<P: AsRef<Path>>(path: P, v: &TraceFile) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, v).with_context(|| "serialize JSON trace file")?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

/* ---------------- CBOR ---------------- */

/// Read a `TraceFile` from **CBOR**.
pub fn read_trace_cbor<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let mut rdr = BufReader::new(f);
    let v: TraceFile =
        ciborium::de::from_reader(&mut rdr).with_context(|| "deserialize CBOR trace file")?;
    Ok(v)
}

/// Write a `TraceFile` to **CBOR**.
pub fn write_trace_cbor<P: AsRef<Path>>(path: P, v: &TraceFile) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(v, &mut w).with_context(|| "serialize CBOR trace file")?;
    w.flush().with_context(|| "flush CBOR writer")?;
    Ok(())
}

/* --------------- Auto-detect by extension --------------- */

/// Auto-detect **read** by extension (`.json` / `.cbor` / `.jsonl`, case-insensitive).
///
/// JSONL files carry no envelope; the returned `TraceFile` has an empty
/// `algorithm` and `input`.
pub fn read_trace_auto<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_trace_json(path),
        Some("cbor") => read_trace_cbor(path),
        Some("jsonl" | "ndjson") => {
            let steps = stream_steps_jsonl(path)?.collect::<Result<Vec<_>>>()?;
            Ok(TraceFile::new(String::new(), Vec::new(), steps))
        }
        Some(other) => Err(anyhow!(
            "unsupported trace extension: {} (supported: .json, .cbor, .jsonl)",
            other
        )),
        None => Err(anyhow!("path has no extension (expected .json, .cbor or .jsonl)")),
    }
}

/// Auto-detect **write** (defaults to JSON if unknown/missing).
pub fn write_trace_auto<P: AsRef<Path>>(path: P, v: &TraceFile) -> Result<()> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("cbor") => write_trace_cbor(path, v),
        Some("jsonl" | "ndjson") => {
            ensure_parent_dir(path.as_ref())?;
            write_steps_jsonl(path, &v.steps)
        }
        _ => write_trace_json(path, v),
    }
}

/* --------------- In-memory CBOR --------------- */

/// Serialize any value to CBOR bytes.
pub fn to_cbor<T: Serialize>(v: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(v, &mut out).context("serialize CBOR")?;
    Ok(out)
}

/// Deserialize any value from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::de::from_reader(Cursor::new(bytes)).context("deserialize CBOR")
}

/* ---------------- Small helpers ---------------- */

#[inline]
pub(crate) fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[inline]
fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
