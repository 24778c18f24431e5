//! Fixed-stride pattern scanner over code hunk bytes.
//!
//! The cursor walks a segment while at least four bytes remain. At each
//! position the library call/jump checks run first, then [`patterns::PATTERNS`]
//! in order; the first hit emits a finding and moves the cursor by that
//! pattern's stride. With no hit the cursor moves one word.

pub mod patterns;

use crate::fd::SymbolTable;
use crate::report::model::{Category, Finding, Report};
use crate::rules::weights::WEIGHTS;

use patterns::{PATTERNS, Window};

/// `JSR (An)` family; low three bits select the address register.
pub const JSR_BASE: u16 = 0x4E90;
/// Same shape, jump variant.
pub const JMP_BASE: u16 = 0x4EB8;
const OPCODE_REG_MASK: u16 = 0xFFF8;
/// Library base pointers are conventionally held in A6.
const LIBRARY_BASE_REG: u16 = 6;

const LIBRARY_STRIDE: usize = 4;
const WORD: usize = 2;

pub struct Scanner<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> Scanner<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// Scans one code hunk whose first byte sits at `base_offset` within
    /// the binary. Returns the risk added to `report`.
    pub fn scan_segment(&self, code: &[u8], base_offset: u32, report: &mut Report) -> i32 {
        let before = report.total_score();
        let mut pos = 0;

        while pos + 4 <= code.len() {
            let window = Window::new(code, pos);
            let offset = base_offset.saturating_add(u32::try_from(pos).unwrap_or(u32::MAX));

            pos += match self.library_category(&window) {
                Some(category) => {
                    self.record_library_call(category, &window, offset, report);
                    LIBRARY_STRIDE
                }
                None => match PATTERNS.iter().find(|p| (p.matches)(&window)) {
                    Some(pattern) => {
                        report.add_finding(Finding {
                            category: pattern.category,
                            description: pattern.description.to_string(),
                            offset,
                            severity: pattern.severity,
                        });
                        pattern.stride
                    }
                    None => WORD,
                },
            };
        }

        let delta = report.total_score() - before;
        log::debug!(
            "segment at {base_offset:#010x}: {} bytes, risk +{delta}",
            code.len()
        );
        delta
    }

    fn library_category(&self, window: &Window<'_>) -> Option<Category> {
        let op = window.opcode();
        if op & !OPCODE_REG_MASK != LIBRARY_BASE_REG {
            return None;
        }
        match op & OPCODE_REG_MASK {
            JSR_BASE => Some(Category::LibraryCall),
            JMP_BASE => Some(Category::LibraryJump),
            _ => None,
        }
    }

    /// Unresolved offsets and routines without a weight are consumed
    /// silently.
    fn record_library_call(
        &self,
        category: Category,
        window: &Window<'_>,
        offset: u32,
        report: &mut Report,
    ) {
        let Some(name) = self.symbols.lookup(i32::from(window.displacement())) else {
            return;
        };

        for entry in WEIGHTS.iter().filter(|w| w.name == name) {
            report.add_finding(Finding {
                category,
                description: name.to_string(),
                offset,
                severity: entry.weight,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::classify::Verdict;

    fn symbols() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.extend_from_lines([
            "SetFunction -420",
            "Forbid -132",
            "OpenLibrary -552",
            "Supervisor -30",
        ]);
        table
    }

    fn scan(code: &[u8], base: u32) -> Report {
        let table = symbols();
        let mut report = Report::new("test");
        Scanner::new(&table).scan_segment(code, base, &mut report);
        report
    }

    fn categories(report: &Report) -> Vec<(Category, u32)> {
        let mut found: Vec<_> = report.findings().map(|f| (f.category, f.offset)).collect();
        found.reverse();
        found
    }

    fn jsr(disp: i16) -> Vec<u8> {
        let mut code = vec![0x4E, 0x96];
        code.extend(disp.to_be_bytes());
        code
    }

    #[test]
    fn library_call_resolves_to_weighted_name() {
        let report = scan(&jsr(-30), 0);

        let findings: Vec<_> = report.findings().collect();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::LibraryCall);
        assert_eq!(findings[0].description, "Supervisor");
        assert_eq!(findings[0].severity, 20);
        assert_eq!(report.total_score(), 20);
    }

    #[test]
    fn set_function_call_needs_review() {
        let table = {
            let mut t = SymbolTable::new();
            t.insert(-30, "SetFunction");
            t
        };
        let mut report = Report::new("patcher");
        let delta = Scanner::new(&table).scan_segment(&jsr(-30), 0, &mut report);

        assert_eq!(delta, 40);
        assert_eq!(report.finding_count(), 1);
        assert_eq!(report.total_score(), 40);
        assert_eq!(report.verdict(), Verdict::NeedsReview);
    }

    #[test]
    fn library_jump_variant() {
        let mut code = vec![0x4E, 0xBE];
        code.extend((-420i16).to_be_bytes());

        let report = scan(&code, 0);
        assert_eq!(categories(&report), vec![(Category::LibraryJump, 0)]);
        assert_eq!(report.total_score(), 40);
    }

    #[test]
    fn unweighted_or_unknown_calls_are_consumed_silently() {
        // OpenLibrary resolves but has no weight; -6 does not resolve.
        // Each call consumes four bytes, so the trailing TRAP still lines up.
        let mut code = jsr(-552);
        code.extend(jsr(-6));
        code.extend([0x4E, 0x40, 0x00, 0x00]);

        let report = scan(&code, 0);
        assert_eq!(categories(&report), vec![(Category::TrapCall, 8)]);
    }

    #[test]
    fn call_through_other_register_is_not_a_library_call() {
        // JSR (A5) with a Forbid-shaped displacement.
        let report = scan(&[0x4E, 0x95, 0xFF, 0x7C], 0);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn execbase_load_advances_six_bytes() {
        // MOVE.L #4,D0 then TRAP #0 directly after the six bytes.
        let code = [0x20, 0x3C, 0x00, 0x00, 0x00, 0x04, 0x4E, 0x40, 0x00, 0x00];
        let report = scan(&code, 0x100);

        assert_eq!(
            categories(&report),
            vec![(Category::ExecBaseAccess, 0x100), (Category::TrapCall, 0x106)]
        );
        assert_eq!(report.total_score(), 45);
    }

    #[test]
    fn library_stride_hides_bytes_inside_the_displacement() {
        // The displacement word is a TRAP encoding, but it is consumed
        // together with the unresolved JSR.
        let report = scan(&[0x4E, 0x96, 0x4E, 0x40, 0x00, 0x00], 0);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn no_patterns_means_zero_score() {
        let code = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        let report = scan(&code, 0);

        assert_eq!(report.finding_count(), 0);
        assert_eq!(report.total_score(), 0);
        assert_eq!(report.verdict(), Verdict::LikelySafe);
    }

    #[test]
    fn tail_shorter_than_four_bytes_is_not_scanned() {
        let report = scan(&[0x00, 0x00, 0x4E, 0x40, 0x00, 0x00], 0);
        assert_eq!(categories(&report), vec![(Category::TrapCall, 2)]);

        // Only three bytes remain at the TRAP.
        let report = scan(&[0x00, 0x00, 0x4E, 0x40, 0x00], 0);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn offsets_are_non_decreasing_in_scan_order() {
        let code = [
            0x4E, 0x71, 0x4E, 0x40, 0x20, 0x3C, 0x00, 0xC0, 0x00, 0x00, 0x4E, 0x75, 0x4E, 0x77,
            0x00, 0x00,
        ];
        let report = scan(&code, 64);
        let offsets: Vec<u32> = categories(&report).iter().map(|(_, o)| *o).collect();

        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(offsets.first(), Some(&64));
        let sum: i32 = report.findings().map(|f| f.severity).sum();
        assert_eq!(report.total_score(), sum);
    }

    #[test]
    fn vbr_immediate_consumes_only_one_word() {
        // MOVE.L #$40,D0: VBR at 0, then the immediate's words are rescanned.
        let code = [0x20, 0x3C, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00];
        let report = scan(&code, 0);
        assert_eq!(categories(&report), vec![(Category::VbrManipulation, 0)]);
    }
}
