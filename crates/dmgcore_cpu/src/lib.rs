//! SM83 CPU core used by the Game Boy (DMG).
//!
//! The core owns only the processor state. Memory is borrowed through the
//! [`Bus`] trait for the duration of a single [`Cpu::step`] call, so a host
//! loop can interleave other components between steps without locking.

pub mod bus;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod instruction;
pub mod regs;

pub use bus::{Bus, MEMORY_SIZE};
pub use cpu::{Cpu, Executed};
pub use decode::{Opcode, Page, CB_PREFIX};
pub use error::UnimplementedOpcode;
pub use instruction::{AluOp, Cond, Indirect, Instruction, RotOp, Rp, Rp2, R8};
pub use regs::{Flags, Registers};
