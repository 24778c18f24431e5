use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::hunk::parse::HunkStats;
use crate::rules::classify::{Verdict, classify};

/// Kind of incompatibility a finding reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LibraryCall,
    LibraryJump,
    ExecBaseAccess,
    ChipRamAccess,
    RomAccess,
    VectorPatching,
    TrapCall,
    TcbAccess,
    ListManipulation,
    InterruptManipulation,
    VbrManipulation,
    SelfModifyingCode,
    StackManipulation,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::LibraryCall => "Library Call",
            Category::LibraryJump => "Library Jump",
            Category::ExecBaseAccess => "ExecBase Access",
            Category::ChipRamAccess => "Chip RAM Access",
            Category::RomAccess => "ROM Access",
            Category::VectorPatching => "Vector Patching",
            Category::TrapCall => "Trap Call",
            Category::TcbAccess => "TCB Access",
            Category::ListManipulation => "List Manipulation",
            Category::InterruptManipulation => "Interrupt Manipulation",
            Category::VbrManipulation => "VBR Manipulation",
            Category::SelfModifyingCode => "Self-Modifying Code",
            Category::StackManipulation => "Stack Manipulation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One matched pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub category: Category,
    /// Routine name for library calls, fixed issue text otherwise.
    pub description: String,
    /// Byte offset within the binary's concatenated code hunks.
    pub offset: u32,
    pub severity: i32,
}

/// Identity of the scanned file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArtifactInfo {
    pub size_bytes: u64,
    pub hash: ArtifactHash,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArtifactHash {
    pub algorithm: String,
    pub value: String,
}

/// Per-file diagnostic report.
///
/// Findings are kept newest first, the order they are rendered in.
/// `total_score` is only ever changed together with the finding list, so
/// it always equals the sum of finding severities, saturating at `i32::MAX`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub filename: String,
    pub artifact: ArtifactInfo,
    pub hunks: HunkStats,
    total_score: i32,
    findings: VecDeque<Finding>,
}

impl Report {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            artifact: ArtifactInfo::default(),
            hunks: HunkStats::default(),
            total_score: 0,
            findings: VecDeque::new(),
        }
    }

    pub fn add_finding(&mut self, finding: Finding) {
        self.total_score = self.total_score.saturating_add(finding.severity);
        self.findings.push_front(finding);
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }

    /// Most recent finding first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    pub fn verdict(&self) -> Verdict {
        classify(self.total_score)
    }
}
