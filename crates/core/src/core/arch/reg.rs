//! Register Descriptors and Alias Tables.
//!
//! Every architectural register name (RAX, EAX, AX, AL, AH, SPL, R9D, ...) is a small
//! descriptor pointing at one of the sixteen register-file slots. This module provides:
//! 1. **Descriptors:** `Register` (slot, encoded id, width, bit offset) with a derived mask.
//! 2. **Alias Tables:** Legacy, REX low-byte and REX-extended lookups keyed by `(id, width)`.
//! 3. **Resolution:** `Register::by_code`, the REX-aware mapping from encoded register fields.

/// Operand / register width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    /// 8 bits.
    Byte,
    /// 16 bits.
    Word,
    /// 32 bits.
    Dword,
    /// 64 bits.
    Qword,
}

impl Width {
    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::Word => 16,
            Self::Dword => 32,
            Self::Qword => 64,
        }
    }

    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Value mask `2^bits - 1`.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Qword => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Byte => 0,
            Self::Word => 1,
            Self::Dword => 2,
            Self::Qword => 3,
        }
    }
}

/// A named view of (part of) a register-file slot.
///
/// Several descriptors alias the same slot: `AL`, `AH`, `AX`, `EAX` and `RAX` all live in slot
/// 0. `shift` is 8 for the legacy high-byte registers (AH/CH/DH/BH) and 0 otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Register {
    /// Display name.
    pub name: &'static str,
    /// Register-file slot (0-15).
    pub slot: usize,
    /// Encoded id as it appears in ModRM / opcode fields (0-7).
    pub id: u8,
    /// Width of the view.
    pub width: Width,
    /// Bit offset of the view inside the slot.
    pub shift: u32,
}

impl Register {
    const fn new(name: &'static str, slot: usize, id: u8, width: Width, shift: u32) -> Self {
        Self {
            name,
            slot,
            id,
            width,
            shift,
        }
    }

    /// Value mask of this view (`2^width - 1`).
    pub const fn mask(&self) -> u64 {
        self.width.mask()
    }

    /// Width in bits.
    pub const fn bits(&self) -> u32 {
        self.width.bits()
    }

    /// Resolves an encoded register field.
    ///
    /// * `rex_present && rex_extend` selects R8-R15 (`id + 8`) at the requested width.
    /// * `rex_present && !rex_extend` at byte width selects SPL/BPL/SIL/DIL for ids 4-7.
    /// * Otherwise the legacy table applies; byte-width ids 4-7 are AH/CH/DH/BH.
    ///
    /// # Arguments
    ///
    /// * `id` - Encoded register field; only the low three bits are used.
    /// * `width` - Requested operand width.
    /// * `rex_present` - Whether a REX prefix precedes the opcode.
    /// * `rex_extend` - The REX extension bit (R, X or B) that applies to this field.
    pub const fn by_code(id: u8, width: Width, rex_present: bool, rex_extend: bool) -> Self {
        let id = (id & 0b111) as usize;
        if rex_present && rex_extend {
            EXTENDED[id][width.index()]
        } else if rex_present && matches!(width, Width::Byte) {
            REX_BYTE[id]
        } else {
            LEGACY[id][width.index()]
        }
    }

    /// Looks up a descriptor by display name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        ALL.iter()
            .find(|reg| reg.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Every descriptor, legacy and extended.
    pub const fn all() -> &'static [Self] {
        &ALL
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

macro_rules! gpr_views {
    ($slot:expr, $id:expr, $q:ident, $d:ident, $w:ident, $b:ident) => {
        #[doc = concat!("64-bit register `", stringify!($q), "`.")]
        pub const $q: Register = Register::new(stringify!($q), $slot, $id, Width::Qword, 0);
        #[doc = concat!("32-bit register `", stringify!($d), "`.")]
        pub const $d: Register = Register::new(stringify!($d), $slot, $id, Width::Dword, 0);
        #[doc = concat!("16-bit register `", stringify!($w), "`.")]
        pub const $w: Register = Register::new(stringify!($w), $slot, $id, Width::Word, 0);
        #[doc = concat!("Low 8-bit register `", stringify!($b), "`.")]
        pub const $b: Register = Register::new(stringify!($b), $slot, $id, Width::Byte, 0);
    };
}

gpr_views!(0, 0, RAX, EAX, AX, AL);
gpr_views!(1, 1, RCX, ECX, CX, CL);
gpr_views!(2, 2, RDX, EDX, DX, DL);
gpr_views!(3, 3, RBX, EBX, BX, BL);
gpr_views!(4, 4, RSP, ESP, SP, SPL);
gpr_views!(5, 5, RBP, EBP, BP, BPL);
gpr_views!(6, 6, RSI, ESI, SI, SIL);
gpr_views!(7, 7, RDI, EDI, DI, DIL);
gpr_views!(8, 0, R8, R8D, R8W, R8B);
gpr_views!(9, 1, R9, R9D, R9W, R9B);
gpr_views!(10, 2, R10, R10D, R10W, R10B);
gpr_views!(11, 3, R11, R11D, R11W, R11B);
gpr_views!(12, 4, R12, R12D, R12W, R12B);
gpr_views!(13, 5, R13, R13D, R13W, R13B);
gpr_views!(14, 6, R14, R14D, R14W, R14B);
gpr_views!(15, 7, R15, R15D, R15W, R15B);

/// High byte (bits 8-15) of slot 0.
pub const AH: Register = Register::new("AH", 0, 4, Width::Byte, 8);
/// High byte (bits 8-15) of slot 1.
pub const CH: Register = Register::new("CH", 1, 5, Width::Byte, 8);
/// High byte (bits 8-15) of slot 2.
pub const DH: Register = Register::new("DH", 2, 6, Width::Byte, 8);
/// High byte (bits 8-15) of slot 3.
pub const BH: Register = Register::new("BH", 3, 7, Width::Byte, 8);

/// Legacy encodings, `[id][width]`.
const LEGACY: [[Register; 4]; 8] = [
    [AL, AX, EAX, RAX],
    [CL, CX, ECX, RCX],
    [DL, DX, EDX, RDX],
    [BL, BX, EBX, RBX],
    [AH, SP, ESP, RSP],
    [CH, BP, EBP, RBP],
    [DH, SI, ESI, RSI],
    [BH, DI, EDI, RDI],
];

/// Byte registers visible when any REX prefix is present, `[id]`.
const REX_BYTE: [Register; 8] = [AL, CL, DL, BL, SPL, BPL, SIL, DIL];

/// REX-extended encodings (R8-R15), `[id][width]`.
const EXTENDED: [[Register; 4]; 8] = [
    [R8B, R8W, R8D, R8],
    [R9B, R9W, R9D, R9],
    [R10B, R10W, R10D, R10],
    [R11B, R11W, R11D, R11],
    [R12B, R12W, R12D, R12],
    [R13B, R13W, R13D, R13],
    [R14B, R14W, R14D, R14],
    [R15B, R15W, R15D, R15],
];

const ALL: [Register; 68] = [
    RAX, EAX, AX, AL, AH, RCX, ECX, CX, CL, CH, RDX, EDX, DX, DL, DH, RBX, EBX, BX, BL, BH, RSP,
    ESP, SP, SPL, RBP, EBP, BP, BPL, RSI, ESI, SI, SIL, RDI, EDI, DI, DIL, R8, R8D, R8W, R8B, R9,
    R9D, R9W, R9B, R10, R10D, R10W, R10B, R11, R11D, R11W, R11B, R12, R12D, R12W, R12B, R13,
    R13D, R13W, R13B, R14, R14D, R14W, R14B, R15, R15D, R15W, R15B,
];

/// Stack pointer view for an operand or address width.
pub const fn stack_pointer(width: Width) -> Register {
    Register::by_code(4, width, false, false)
}
