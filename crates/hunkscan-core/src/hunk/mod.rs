//! Amiga HUNK executable container: file reading and block walking.

pub mod parse;
pub mod read;

pub use parse::{HunkStats, walk_code_hunks};
pub use read::{ArtifactContext, read_artifact};
