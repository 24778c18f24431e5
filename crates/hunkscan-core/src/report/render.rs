use std::fmt::Write;

use crate::report::model::Report;

/// Detailed, human-readable report for one file.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "=== Compatibility Analysis Report ===")?;
    writeln!(out, "File: {}", report.filename)?;
    writeln!(out, "Size: {} bytes", report.artifact.size_bytes)?;
    if !report.artifact.hash.value.is_empty() {
        writeln!(out, "SHA-256: {}", report.artifact.hash.value)?;
    }
    writeln!(
        out,
        "Code hunks: {} ({} bytes scanned)",
        report.hunks.code_hunks, report.hunks.code_bytes
    )?;
    writeln!(out, "Total Risk Score: {}", report.total_score())?;
    writeln!(out, "Findings: {}", report.finding_count())?;
    writeln!(out)?;

    if report.finding_count() == 0 {
        writeln!(out, "No compatibility issues found.")?;
        return Ok(());
    }

    writeln!(out, "Detailed Findings:")?;
    writeln!(out, "-----------------")?;
    for f in report.findings() {
        writeln!(out, "[{}] at offset 0x{:08x}", f.category, f.offset)?;
        writeln!(out, "  Severity: {}", f.severity)?;
        writeln!(out, "  Issue: {}", f.description)?;
        writeln!(out)?;
    }

    let verdict = report.verdict();
    writeln!(out, "Compatibility Assessment:")?;
    writeln!(out, "------------------------")?;
    writeln!(out, "Status: {}", verdict.status())?;
    writeln!(out, "{}", verdict.explanation())?;
    writeln!(out)
}

/// One-line per-file summary printed after the detailed report.
pub fn summary_line(report: &Report) -> String {
    format!(
        "{:<28}  Score:{:>3}  -> {}",
        report.filename,
        report.total_score(),
        report.verdict().label()
    )
}
