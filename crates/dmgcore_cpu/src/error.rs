use thiserror::Error;

use crate::decode::Page;

/// The CPU fetched an opcode with no assigned instruction.
///
/// Returned as data from [`Cpu::step`](crate::Cpu::step). By the time it is
/// reported the program counter already points past the offending byte, and
/// nothing else in the CPU or memory has changed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unimplemented {page} opcode {opcode:#04x} at {pc:#06x}")]
pub struct UnimplementedOpcode {
    pub opcode: u8,
    /// Address of the opcode byte itself. On the extended page this is the
    /// byte after the `0xCB` prefix.
    pub pc: u16,
    pub page: Page,
}
