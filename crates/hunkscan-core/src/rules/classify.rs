//! Verdict policy for a total risk score.
//!
//! The thresholds are inclusive on the lower bucket:
//!
//!   - score <= 20         → Likely Safe
//!   - 20 < score <= 50    → Needs Review
//!   - score > 50          → Probably Breaks

use serde::{Deserialize, Serialize};

pub const SAFE_MAX: i32 = 20;
pub const REVIEW_MAX: i32 = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    LikelySafe,
    NeedsReview,
    ProbablyBreaks,
}

impl Verdict {
    /// Short label used in the per-file summary line.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::LikelySafe => "Likely Safe",
            Verdict::NeedsReview => "Needs Review",
            Verdict::ProbablyBreaks => "Probably Breaks",
        }
    }

    /// Upper-case status shown in the detailed report.
    pub fn status(self) -> &'static str {
        match self {
            Verdict::LikelySafe => "LIKELY SAFE",
            Verdict::NeedsReview => "NEEDS REVIEW",
            Verdict::ProbablyBreaks => "PROBABLY BREAKS",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Verdict::LikelySafe => {
                "This binary appears to be compatible with hardened OS mode."
            }
            Verdict::NeedsReview => {
                "This binary may have compatibility issues that require manual review."
            }
            Verdict::ProbablyBreaks => "This binary is likely incompatible with hardened OS mode.",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(score: i32) -> Verdict {
    if score <= SAFE_MAX {
        Verdict::LikelySafe
    } else if score <= REVIEW_MAX {
        Verdict::NeedsReview
    } else {
        Verdict::ProbablyBreaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_likely_safe() {
        assert_eq!(classify(0), Verdict::LikelySafe);
    }

    #[test]
    fn boundaries_fall_into_lower_bucket() {
        assert_eq!(classify(20), Verdict::LikelySafe);
        assert_eq!(classify(21), Verdict::NeedsReview);
        assert_eq!(classify(50), Verdict::NeedsReview);
        assert_eq!(classify(51), Verdict::ProbablyBreaks);
    }

    #[test]
    fn labels_and_status() {
        assert_eq!(Verdict::NeedsReview.label(), "Needs Review");
        assert_eq!(Verdict::ProbablyBreaks.status(), "PROBABLY BREAKS");
        assert_eq!(Verdict::LikelySafe.to_string(), "Likely Safe");
    }

    #[test]
    fn verdict_serializes_screaming_snake() {
        let json = serde_json::to_string(&Verdict::ProbablyBreaks).unwrap();
        assert_eq!(json, "\"PROBABLY_BREAKS\"");
    }
}
