use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::fd::table::SymbolTable;

/// What a descriptor directory load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// `false` when the directory could not be enumerated at all.
    pub dir_found: bool,
    pub files_read: usize,
    /// Accepted descriptor lines, duplicates included.
    pub entries: usize,
}

/// Builds the symbol table from every descriptor file in `config.fd_dir`.
///
/// Never fails: a missing directory yields an empty table with
/// `dir_found == false`, unreadable files are skipped.
pub fn load_fd_dir(config: &ScanConfig) -> (SymbolTable, LoadSummary) {
    let mut table = SymbolTable::new();
    let mut summary = LoadSummary::default();

    let files = match descriptor_files(&config.fd_dir, &config.fd_extension) {
        Ok(files) => files,
        Err(e) => {
            log::debug!("cannot enumerate {}: {e}", config.fd_dir.display());
            return (table, summary);
        }
    };
    summary.dir_found = true;

    for path in files {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("skipping descriptor {}: {e}", path.display());
                continue;
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        let accepted = table.extend_from_lines(text.lines());
        log::debug!("{}: {accepted} entries", path.display());

        summary.files_read += 1;
        summary.entries += accepted;
    }

    (table, summary)
}

/// Regular files in `dir` whose extension matches `extension`
/// case-insensitively, sorted by file name.
fn descriptor_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)?.map(|entry| -> io::Result<(PathBuf, bool)> {
        let entry = entry?;
        Ok((entry.path(), entry.file_type()?.is_dir()))
    });
    Ok(select_descriptors(entries, extension))
}

/// Filters `(path, is_dir)` entries. An entry that cannot be inspected is
/// skipped; the rest of the directory still loads.
fn select_descriptors(
    entries: impl IntoIterator<Item = io::Result<(PathBuf, bool)>>,
    extension: &str,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in entries {
        let (path, is_dir) = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping directory entry: {e}");
                continue;
            }
        };
        if is_dir {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> ScanConfig {
        ScanConfig {
            fd_dir: dir.to_path_buf(),
            ..ScanConfig::default()
        }
    }

    #[test]
    fn missing_directory_yields_empty_table() {
        let tmp = TempDir::new().unwrap();
        let (table, summary) = load_fd_dir(&config_for(&tmp.path().join("nope")));

        assert!(table.is_empty());
        assert!(!summary.dir_found);
        assert_eq!(summary.files_read, 0);
    }

    #[test]
    fn reads_only_descriptor_extension_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("exec_lib.fd"), "Supervisor -30\nForbid -132\n").unwrap();
        fs::write(tmp.path().join("dos_lib.FD"), "Open -30\n").unwrap();
        fs::write(tmp.path().join("notes.txt"), "Permit -138\n").unwrap();
        fs::create_dir(tmp.path().join("sub.fd")).unwrap();

        let (table, summary) = load_fd_dir(&config_for(tmp.path()));

        assert!(summary.dir_found);
        assert_eq!(summary.files_read, 2);
        assert_eq!(summary.entries, 3);
        assert_eq!(table.lookup(-138), None);
        assert_eq!(table.lookup(-132), Some("Forbid"));
        // dos_lib.FD sorts before exec_lib.fd, so exec wins the shared key.
        assert_eq!(table.lookup(-30), Some("Supervisor"));
    }

    #[test]
    fn empty_directory_is_found_but_empty() {
        let tmp = TempDir::new().unwrap();
        let (table, summary) = load_fd_dir(&config_for(tmp.path()));

        assert!(summary.dir_found);
        assert!(table.is_empty());
    }

    #[test]
    fn unreadable_entry_is_skipped_not_fatal() {
        let entries = vec![
            Ok((PathBuf::from("FD/graphics_lib.fd"), false)),
            Err(io::Error::other("stale entry")),
            Ok((PathBuf::from("FD/exec_lib.fd"), false)),
            Ok((PathBuf::from("FD/old.fd"), true)),
        ];

        assert_eq!(
            select_descriptors(entries, "fd"),
            vec![
                PathBuf::from("FD/exec_lib.fd"),
                PathBuf::from("FD/graphics_lib.fd"),
            ]
        );
    }
}
