//! Fixed 68k byte patterns and their priority order.
//!
//! Matching is purely positional: a pattern sees the bytes at the cursor
//! and knows nothing about real instruction boundaries, so a match may
//! land inside data or in the middle of a longer instruction.

use crate::report::model::Category;

/// `MOVE.L #imm,D0`; the 32-bit immediate follows the opcode.
pub const MOVE_IMM: [u8; 2] = [0x20, 0x3C];

/// First byte of the `MOVE.L (d8,An,Xn),D0` family.
pub const MOVE_INDEXED: u8 = 0x20;
pub const INDEXED_A0: u8 = 0x68;
pub const INDEXED_A2: u8 = 0x6A;

pub const TRAP_0: u16 = 0x4E40;
pub const TRAP_1: u16 = 0x4E41;
pub const NOP: u16 = 0x4E71;
pub const STOP: u16 = 0x4E72;
pub const RTE: u16 = 0x4E73;
pub const RTS: u16 = 0x4E75;
pub const RTR: u16 = 0x4E77;

/// ExecBase lives at absolute address 4.
pub const EXEC_BASE: u32 = 0x0000_0004;
pub const CHIP_RAM: std::ops::RangeInclusive<u32> = 0x00C0_0000..=0x00DF_FFFF;
pub const ROM_START: u32 = 0x00F8_0000;
pub const SYSTEM_VECTORS: [u32; 3] = [0x68, 0x84, 0x4A];
/// pr_Task, pr_CLI, pr_Console, pr_FileSystem, pr_CES, pr_COS.
pub const TCB_OFFSETS: [u32; 6] = [0x0C, 0x10, 0x14, 0x18, 0x1C, 0x20];
/// lh_Head, lh_Tail, lh_TailPred.
pub const LIST_OFFSETS: [u32; 3] = [0x00, 0x04, 0x08];
/// INTENA and INTREQ.
pub const INTERRUPT_REGS: [u32; 2] = [0x00DF_F09A, 0x00DF_F09C];
pub const VECTOR_PAGE_END: u32 = 0x0000_0100;
pub const CODE_SPACE_END: u32 = 0x01FF_FFFF;

/// Bytes at the scan cursor.
///
/// The scanner only builds a window when at least four bytes remain, so
/// the opcode word and the following word are always present.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    code: &'a [u8],
    pos: usize,
}

impl<'a> Window<'a> {
    pub fn new(code: &'a [u8], pos: usize) -> Self {
        debug_assert!(pos + 4 <= code.len());
        Self { code, pos }
    }

    fn byte(&self, i: usize) -> u8 {
        self.code[self.pos + i]
    }

    pub fn opcode(&self) -> u16 {
        u16::from_be_bytes([self.byte(0), self.byte(1)])
    }

    /// Signed word following the opcode.
    pub fn displacement(&self) -> i16 {
        i16::from_be_bytes([self.byte(2), self.byte(3)])
    }

    /// Immediate of a `MOVE.L #imm` at the cursor, if the full six bytes
    /// are inside the segment.
    pub fn immediate_load(&self) -> Option<u32> {
        let bytes = self.code.get(self.pos..self.pos + 6)?;
        if bytes[..2] != MOVE_IMM {
            return None;
        }
        Some(u32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]))
    }

    /// `(mode byte, index byte)` of an indexed load through A0..A2.
    pub fn indexed_load(&self) -> Option<(u8, u8)> {
        let mode = self.byte(1);
        (self.byte(0) == MOVE_INDEXED && (INDEXED_A0..=INDEXED_A2).contains(&mode))
            .then(|| (mode, self.byte(2)))
    }

    /// Opcode word ending right before the cursor; `None` at segment start.
    pub fn previous_opcode(&self) -> Option<u16> {
        let start = self.pos.checked_sub(2)?;
        Some(u16::from_be_bytes([self.code[start], self.code[start + 1]]))
    }
}

/// One fixed pattern: what it reports and how far the cursor moves on a match.
pub struct Pattern {
    pub category: Category,
    pub description: &'static str,
    pub severity: i32,
    pub stride: usize,
    pub matches: fn(&Window<'_>) -> bool,
}

/// Fixed patterns in priority order; the first match at a position wins.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        category: Category::ExecBaseAccess,
        description: "Direct access to ExecBase (4.W)",
        severity: 25,
        stride: 6,
        matches: is_execbase_ref,
    },
    Pattern {
        category: Category::ChipRamAccess,
        description: "Direct access to Chip RAM region",
        severity: 30,
        stride: 6,
        matches: is_chip_ram_ref,
    },
    Pattern {
        category: Category::RomAccess,
        description: "Direct access to ROM region",
        severity: 25,
        stride: 6,
        matches: is_rom_ref,
    },
    Pattern {
        category: Category::VectorPatching,
        description: "Attempt to patch system vector",
        severity: 35,
        stride: 6,
        matches: is_vector_patch,
    },
    Pattern {
        category: Category::TrapCall,
        description: "Use of TRAP instruction",
        severity: 20,
        stride: 2,
        matches: is_trap_call,
    },
    Pattern {
        category: Category::TcbAccess,
        description: "Direct access to Task Control Block",
        severity: 30,
        stride: 6,
        matches: is_tcb_access,
    },
    Pattern {
        category: Category::ListManipulation,
        description: "Direct manipulation of system lists",
        severity: 25,
        stride: 6,
        matches: is_list_manipulation,
    },
    Pattern {
        category: Category::InterruptManipulation,
        description: "Direct manipulation of interrupt levels",
        severity: 35,
        stride: 6,
        matches: is_interrupt_manipulation,
    },
    // Only two bytes are consumed even for the six-byte immediate form.
    Pattern {
        category: Category::VbrManipulation,
        description: "Attempt to modify Vector Base Register",
        severity: 40,
        stride: 2,
        matches: is_vbr_manipulation,
    },
    Pattern {
        category: Category::SelfModifyingCode,
        description: "Code attempts to modify itself",
        severity: 45,
        stride: 6,
        matches: is_self_modifying,
    },
    Pattern {
        category: Category::StackManipulation,
        description: "Unusual stack manipulation detected",
        severity: 20,
        stride: 2,
        matches: is_stack_manipulation,
    },
];

fn is_execbase_ref(w: &Window<'_>) -> bool {
    w.immediate_load() == Some(EXEC_BASE)
}

fn is_chip_ram_ref(w: &Window<'_>) -> bool {
    w.immediate_load().is_some_and(|addr| CHIP_RAM.contains(&addr))
}

fn is_rom_ref(w: &Window<'_>) -> bool {
    w.immediate_load().is_some_and(|addr| addr >= ROM_START)
}

fn is_vector_patch(w: &Window<'_>) -> bool {
    w.immediate_load()
        .is_some_and(|addr| SYSTEM_VECTORS.contains(&addr))
}

fn is_trap_call(w: &Window<'_>) -> bool {
    matches!(w.opcode(), TRAP_0 | TRAP_1)
}

fn is_tcb_access(w: &Window<'_>) -> bool {
    if w.immediate_load().is_some_and(|addr| TCB_OFFSETS.contains(&addr)) {
        return true;
    }
    // Indexed form is only checked through A0.
    matches!(w.indexed_load(), Some((INDEXED_A0, index)) if TCB_OFFSETS.contains(&u32::from(index)))
}

fn is_list_manipulation(w: &Window<'_>) -> bool {
    if w.immediate_load().is_some_and(|addr| LIST_OFFSETS.contains(&addr)) {
        return true;
    }
    w.indexed_load()
        .is_some_and(|(_, index)| LIST_OFFSETS.contains(&u32::from(index)))
}

fn is_interrupt_manipulation(w: &Window<'_>) -> bool {
    if w.immediate_load().is_some_and(|addr| INTERRUPT_REGS.contains(&addr)) {
        return true;
    }
    w.opcode() == RTS && w.previous_opcode() == Some(RTE)
}

fn is_vbr_manipulation(w: &Window<'_>) -> bool {
    w.opcode() == RTE || w.immediate_load().is_some_and(|addr| addr <= VECTOR_PAGE_END)
}

/// Deliberately broad: every immediate below 32 MiB and every indexed
/// load through A0..A2 counts, whatever the index byte.
fn is_self_modifying(w: &Window<'_>) -> bool {
    w.immediate_load().is_some_and(|addr| addr <= CODE_SPACE_END) || w.indexed_load().is_some()
}

fn is_stack_manipulation(w: &Window<'_>) -> bool {
    matches!(w.opcode(), RTS | RTR | RTE | NOP | STOP)
}
