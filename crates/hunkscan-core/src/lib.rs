pub mod config;
pub mod error;
pub mod fd;
pub mod hunk;
pub mod report;
pub mod rules;
pub mod scan;

use std::io::Cursor;
use std::path::Path;

use crate::error::{HunkError, ScanError};
use crate::fd::SymbolTable;
use crate::hunk::{ArtifactContext, read_artifact, walk_code_hunks};
use crate::report::model::Report;
use crate::scan::Scanner;

pub const TOOL_NAME: &str = "hunkscan";

/// Reads and scans one file end to end.
///
/// The symbol table is only read, so independent files may be scanned
/// against the same table concurrently.
pub fn inspect(path: &Path, symbols: &SymbolTable) -> Result<Report, ScanError> {
    let name = path.display().to_string();

    let artifact = read_artifact(path).map_err(|source| ScanError::Open {
        path: name.clone(),
        source,
    })?;

    inspect_artifact(name.clone(), &artifact, symbols)
        .map_err(|source| ScanError::Format { path: name, source })
}

/// Scans an in-memory HUNK binary.
pub fn inspect_bytes(
    name: impl Into<String>,
    bytes: Vec<u8>,
    symbols: &SymbolTable,
) -> Result<Report, HunkError> {
    inspect_artifact(name.into(), &ArtifactContext::from_bytes(bytes), symbols)
}

fn inspect_artifact(
    name: String,
    artifact: &ArtifactContext,
    symbols: &SymbolTable,
) -> Result<Report, HunkError> {
    let scanner = Scanner::new(symbols);
    let mut report = Report::new(name);
    report.artifact = artifact.artifact_info();

    let hunks = walk_code_hunks(Cursor::new(artifact.bytes.as_slice()), |code, base| {
        scanner.scan_segment(code, base, &mut report);
    })?;
    report.hunks = hunks;

    Ok(report)
}
