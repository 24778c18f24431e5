use std::io;

use thiserror::Error;

/// Failures while walking a HUNK container.
#[derive(Debug, Error)]
pub enum HunkError {
    /// First long word was not `HUNK_HEADER` (or the file was shorter than 4 bytes).
    #[error("not recognized format")]
    NotHunk { found: Option<u32> },

    #[error("cannot allocate {size} bytes for code hunk")]
    CodeAlloc { size: u64 },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Per-file failures. None of these stop a batch run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{path}: cannot open")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Format {
        path: String,
        #[source]
        source: HunkError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_report_wording() {
        let err = ScanError::Format {
            path: "c/Dir".into(),
            source: HunkError::NotHunk { found: Some(0x7f454c46) },
        };
        assert_eq!(err.to_string(), "c/Dir: not recognized format");

        let err = ScanError::Open {
            path: "missing".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "missing: cannot open");
    }

    #[test]
    fn allocation_failure_names_the_file() {
        let err = ScanError::Format {
            path: "c/Huge".into(),
            source: HunkError::CodeAlloc { size: 4_294_967_292 },
        };
        assert_eq!(
            err.to_string(),
            "c/Huge: cannot allocate 4294967292 bytes for code hunk"
        );
    }
}
