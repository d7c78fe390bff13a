//! Report directory persistence: write/read a run report to/from disk.
//!
//! # Directory layout (`ReportDirectoryV1`)
//!
//! ```text
//! <dir>/
//!   run_report.json     canonical JSON, binds graph_digest
//!   search_graph.json   canonical JSON of the SearchGraphV1 snapshot
//!   report_digest.txt   ASCII digest of run_report.json ("sha256:...")
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing file → error
//! - Extra file → error
//! - Non-canonical JSON → error
//! - Graph digest or report digest mismatch → error

use std::collections::BTreeSet;
use std::path::Path;

use wayfinder_search::digest::{canonical_hash, ContentHash, DOMAIN_SEARCH_GRAPH};

use crate::runner::{RunError, RunReportV1, DOMAIN_RUN_REPORT, RUN_REPORT_SCHEMA};

const REPORT_FILENAME: &str = "run_report.json";
const GRAPH_FILENAME: &str = "search_graph.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

const REPORT_DIR_FILENAMES: &[&str] = &[REPORT_FILENAME, GRAPH_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    /// I/O error during write.
    Io { detail: String },
    /// Report serialization failed.
    CanonError { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

impl From<RunError> for ReportDirWriteError {
    fn from(e: RunError) -> Self {
        Self::CanonError {
            detail: e.to_string(),
        }
    }
}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    /// I/O error during read.
    Io { detail: String },
    /// A required file is missing.
    MissingFile { filename: String },
    /// An unexpected file exists in the directory.
    ExtraFile { name: String },
    /// A JSON file does not parse.
    ParseError { filename: String, detail: String },
    /// A JSON file parses but is not in canonical form.
    NonCanonical { filename: String },
    /// `run_report.json` has an unknown `schema_version`.
    SchemaVersionMismatch { found: String },
    /// `search_graph.json` does not hash to the report's `graph_digest`.
    GraphDigestMismatch { declared: String, recomputed: String },
    /// `report_digest.txt` doesn't match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "unexpected extra file: {name}"),
            Self::ParseError { filename, detail } => {
                write!(f, "{filename} parse error: {detail}")
            }
            Self::NonCanonical { filename } => write!(f, "{filename} is not canonical JSON"),
            Self::SchemaVersionMismatch { found } => {
                write!(f, "report schema version mismatch: {found}")
            }
            Self::GraphDigestMismatch {
                declared,
                recomputed,
            } => write!(
                f,
                "graph digest mismatch: declared={declared}, recomputed={recomputed}"
            ),
            Self::DigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// A verified report directory, as bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedReportV1 {
    /// Parsed `run_report.json`.
    pub report: serde_json::Value,
    /// Exact `run_report.json` bytes.
    pub report_bytes: Vec<u8>,
    /// Exact `search_graph.json` bytes.
    pub graph_bytes: Vec<u8>,
    /// Verified report digest.
    pub digest: ContentHash,
}

/// Write `report` to `dir` in `ReportDirectoryV1` format.
///
/// Creates the directory if it does not exist.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O failure or serialization error.
pub fn write_report_dir(dir: &Path, report: &RunReportV1) -> Result<ContentHash, ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let report_bytes = report.to_canonical_json_bytes()?;
    let digest = canonical_hash(DOMAIN_RUN_REPORT, &report_bytes);

    write_atomic(dir.join(GRAPH_FILENAME), &report.graph_bytes)?;
    write_atomic(dir.join(REPORT_FILENAME), &report_bytes)?;
    write_atomic(dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;

    Ok(digest)
}

/// Read and verify a `ReportDirectoryV1` directory.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<PersistedReportV1, ReportDirReadError> {
    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let graph_bytes = read_required(dir, GRAPH_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let allowed: BTreeSet<&str> = REPORT_DIR_FILENAMES.iter().copied().collect();
    for name in list_files(dir)? {
        if !allowed.contains(name.as_str()) {
            return Err(ReportDirReadError::ExtraFile { name });
        }
    }

    let report = parse_canonical(REPORT_FILENAME, &report_bytes)?;
    parse_canonical(GRAPH_FILENAME, &graph_bytes)?;

    let schema_version = report["schema_version"].as_str().unwrap_or("");
    if schema_version != RUN_REPORT_SCHEMA {
        return Err(ReportDirReadError::SchemaVersionMismatch {
            found: schema_version.to_string(),
        });
    }

    let declared_graph = report["graph_digest"].as_str().unwrap_or("").to_string();
    let recomputed_graph = canonical_hash(DOMAIN_SEARCH_GRAPH, &graph_bytes);
    if recomputed_graph.as_str() != declared_graph {
        return Err(ReportDirReadError::GraphDigestMismatch {
            declared: declared_graph,
            recomputed: recomputed_graph.as_str().to_string(),
        });
    }

    let recomputed = canonical_hash(DOMAIN_RUN_REPORT, &report_bytes);
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(ReportDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(PersistedReportV1 {
        report,
        report_bytes,
        graph_bytes,
        digest: recomputed,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write bytes to a path via temp file + rename.
fn write_atomic(path: impl AsRef<Path>, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;

    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })?;

    Ok(())
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirReadError::MissingFile {
        filename: filename.to_string(),
    })
}

/// Parse `bytes` and require that re-serializing reproduces them exactly.
fn parse_canonical(filename: &str, bytes: &[u8]) -> Result<serde_json::Value, ReportDirReadError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ReportDirReadError::ParseError {
            filename: filename.to_string(),
            detail: e.to_string(),
        })?;
    let reencoded = serde_json::to_vec(&value).map_err(|e| ReportDirReadError::ParseError {
        filename: filename.to_string(),
        detail: e.to_string(),
    })?;
    if reencoded != bytes {
        return Err(ReportDirReadError::NonCanonical {
            filename: filename.to_string(),
        });
    }
    Ok(value)
}

/// Regular files in `dir`, excluding temp files from `write_atomic`.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let mut files = BTreeSet::new();
    let entries = std::fs::read_dir(dir).map_err(|e| ReportDirReadError::Io {
        detail: format!("read_dir: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ReportDirReadError::Io {
            detail: format!("dir entry: {e}"),
        })?;
        let file_type = entry.file_type().map_err(|e| ReportDirReadError::Io {
            detail: format!("file_type: {e}"),
        })?;
        if file_type.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(".tmp_") {
                    files.insert(name.to_string());
                }
            }
        }
    }

    Ok(files)
}
