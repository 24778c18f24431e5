use std::io::{self, Read};

use serde::{Deserialize, Serialize};

use crate::error::HunkError;

pub const HUNK_HEADER: u32 = 0x3F3;
pub const HUNK_CODE: u32 = 0x3E9;
pub const HUNK_END: u32 = 0x3F2;

/// Upper two bits of a hunk size long carry memory attributes, not size.
const SIZE_MASK: u32 = 0x3FFF_FFFF;

/// Counters collected while walking the block list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HunkStats {
    pub code_hunks: u32,
    /// Code bytes handed to the scanner, i.e. the final cumulative offset.
    pub code_bytes: u32,
    pub skipped_hunks: u32,
}

/// Walks a HUNK container and hands each code hunk payload to `on_code`
/// together with its cumulative byte offset.
///
/// Layout consumed:
///
/// 1. `HUNK_HEADER` magic
/// 2. a table length `n`, followed by `n + 1` long words that are skipped
/// 3. typed blocks until `HUNK_END` or end of input:
///    - `HUNK_CODE`: size in longs, then the payload
///    - anything else: size in longs, then skipped payload
///
/// A code hunk shorter than its declared size is scanned over the bytes
/// actually present and ends the walk.
pub fn walk_code_hunks<R: Read>(
    mut reader: R,
    mut on_code: impl FnMut(&[u8], u32),
) -> Result<HunkStats, HunkError> {
    let magic = read_be_long(&mut reader)?;
    if magic != Some(HUNK_HEADER) {
        return Err(HunkError::NotHunk { found: magic });
    }

    let mut stats = HunkStats::default();

    let Some(table_len) = read_be_long(&mut reader)? else {
        return Ok(stats);
    };
    skip(&mut reader, (u64::from(table_len) + 1) * 4)?;

    let mut cumulative: u32 = 0;

    while let Some(hunk_type) = read_be_long(&mut reader)? {
        match hunk_type {
            HUNK_CODE => {
                let Some(longs) = read_be_long(&mut reader)? else {
                    break;
                };
                let size = u64::from(longs & SIZE_MASK) * 4;
                let code = read_code(&mut reader, size)?;

                on_code(&code, cumulative);
                stats.code_hunks += 1;
                cumulative = cumulative.saturating_add(code.len() as u32);
                stats.code_bytes = cumulative;

                if (code.len() as u64) < size {
                    log::warn!("code hunk truncated: {} of {size} bytes", code.len());
                    break;
                }
            }
            HUNK_END => break,
            other => {
                let Some(longs) = read_be_long(&mut reader)? else {
                    break;
                };
                log::debug!("skipping hunk type {other:#x} ({longs} longs)");
                skip(&mut reader, u64::from(longs & SIZE_MASK) * 4)?;
                stats.skipped_hunks += 1;
            }
        }
    }

    Ok(stats)
}

/// Largest buffer growth per read. A declared size only grows the
/// buffer as far as the input actually delivers bytes.
const READ_CHUNK: u64 = 64 * 1024;

fn read_code<R: Read>(reader: &mut R, size: u64) -> Result<Vec<u8>, HunkError> {
    let alloc_err = || HunkError::CodeAlloc { size };

    // A Vec cannot hold more than isize::MAX bytes.
    isize::try_from(size).map_err(|_| alloc_err())?;

    let mut code = Vec::new();
    let mut remaining = reader.by_ref().take(size);

    loop {
        let want = remaining.limit().min(READ_CHUNK);
        if want == 0 {
            break;
        }
        code.try_reserve(want as usize).map_err(|_| alloc_err())?;

        let got = remaining.by_ref().take(want).read_to_end(&mut code)?;
        if (got as u64) < want {
            break;
        }
    }

    Ok(code)
}

/// Big-endian long word, `None` on a short read at end of input.
fn read_be_long<R: Read>(reader: &mut R) -> io::Result<Option<u32>> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(None),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Some(u32::from_be_bytes(buf)))
}

fn skip<R: Read>(reader: &mut R, len: u64) -> io::Result<u64> {
    io::copy(&mut reader.by_ref().take(len), &mut io::sink())
}
