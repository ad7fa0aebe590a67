//! Bit-field decomposition of opcode bytes.
//!
//! Instruction bytes are split into `x` (bits 7-6), `y` (bits 5-3) and
//! `z` (bits 2-0), with `y` further split into `p` (bits 5-4) and `q`
//! (bit 3). The same scheme applies to both opcode pages; see
//! <http://www.z80.info/decoding.htm> and the SM83 notes derived from it.

use std::fmt;

/// Prefix byte that selects the extended (bit/shift/rotate) page.
pub const CB_PREFIX: u8 = 0xCB;

/// Which of the two 256-entry opcode pages an opcode belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Primary,
    Extended,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Primary => f.write_str("primary"),
            Page::Extended => f.write_str("extended"),
        }
    }
}

/// Decoded fields of one opcode byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub byte: u8,
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub p: u8,
    pub q: u8,
}

impl Opcode {
    #[inline]
    pub const fn decode(byte: u8) -> Self {
        let y = (byte >> 3) & 0x07;
        Self {
            byte,
            x: byte >> 6,
            y,
            z: byte & 0x07,
            p: y >> 1,
            q: y & 0x01,
        }
    }
}
