//! Line grammar for library descriptor (`.fd`) files.
//!
//! Accepted shape, after optional leading whitespace:
//!
//! ```text
//! FunctionName   -30
//! ```
//!
//! The name token runs until whitespace and is truncated to
//! [`MAX_NAME_LEN`] bytes. The offset magnitude is always stored negated,
//! whether or not the source text carried the `-` sign, so `Name 30` and
//! `Name -30` both produce the key `-30`.

/// Longest function name kept from a descriptor line, in bytes.
pub const MAX_NAME_LEN: usize = 31;

/// Comment prefix for descriptor lines.
const COMMENT: u8 = b';';

/// A single accepted descriptor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdLine {
    pub name: String,
    /// Library vector offset; never positive.
    pub offset: i32,
}

/// Parses one descriptor line, returning `None` for comments, blank lines
/// and anything malformed.
pub fn parse_fd_line(line: &str) -> Option<FdLine> {
    let bytes = line.as_bytes();
    let mut pos = skip_space(bytes, 0);

    if bytes.get(pos) == Some(&COMMENT) {
        return None;
    }

    // The name stops at whitespace or at the length cap; any overflow
    // characters stay in place and are seen by the number parser below.
    let name_start = pos;
    while pos < bytes.len() && !is_space(bytes[pos]) && pos - name_start < MAX_NAME_LEN {
        pos += 1;
    }
    if pos == name_start {
        return None;
    }
    let name = String::from_utf8_lossy(&bytes[name_start..pos]).into_owned();

    pos = skip_space(bytes, pos);
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }

    let magnitude: i32 = line[digits_start..pos].parse().ok()?;
    if magnitude == 0 {
        return None;
    }

    Some(FdLine {
        name,
        offset: -magnitude,
    })
}

fn skip_space(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// C-locale whitespace, including vertical tab.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
