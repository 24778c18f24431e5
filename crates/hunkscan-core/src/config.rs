use std::env;
use std::path::PathBuf;

/// Environment variable naming the descriptor (`.fd`) directory.
pub const FD_DIR_ENV: &str = "HUNKSCAN_FD_DIR";

/// Runtime configuration for a scan run.
///
/// Only supplies locations and file filters; it carries no detection
/// policy (severities and thresholds are compiled in).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory enumerated for library descriptor files.
    pub fd_dir: PathBuf,

    /// Descriptor file extension, matched case-insensitively, without the dot.
    pub fd_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fd_dir: PathBuf::from("FD"),
            fd_extension: "fd".to_string(),
        }
    }
}

impl ScanConfig {
    /// Default configuration with `HUNKSCAN_FD_DIR` applied when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(FD_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.fd_dir = PathBuf::from(dir);
        }
        config
    }
}
