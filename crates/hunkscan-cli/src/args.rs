use std::path::PathBuf;

use clap::Parser;
use hunkscan_core::TOOL_NAME;

#[derive(Debug, Parser)]
#[command(
    name = TOOL_NAME,
    version,
    about = "Heuristic hardened-mode compatibility scan for Amiga HUNK executables"
)]
pub struct Args {
    /// HUNK executables to scan
    pub files: Vec<PathBuf>,
}
