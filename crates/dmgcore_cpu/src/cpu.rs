mod alu;
mod cb;
mod exec;
mod helpers;
mod init;

use crate::bus::Bus;
use crate::decode::{Opcode, Page, CB_PREFIX};
use crate::error::UnimplementedOpcode;
use crate::instruction::Instruction;
use crate::regs::{Flags, Registers};

/// Outcome of one successfully executed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Executed {
    /// Address of the first byte of the instruction (the prefix for
    /// extended-page instructions).
    pub pc: u16,
    pub instruction: Instruction,
    /// Nominal duration in T-cycles. Conditional branches report the taken
    /// or not-taken duration, whichever applied.
    pub cycles: u32,
}

/// Game Boy CPU core.
///
/// Holds the register file plus the little control state the instruction
/// set itself manipulates (`ime`, HALT and STOP). Memory is never stored
/// here; every `step` borrows it afresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
    ime: bool,
    /// EI was executed; IME turns on once the following instruction
    /// completes.
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    halted: bool,
    stopped: bool,
}

impl Cpu {
    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.regs.f.contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.regs.f.set(flag, value);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = Flags::empty();
    }

    /// Interrupt master enable, as left by DI/EI/RETI.
    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Leave HALT/STOP. The core has no interrupt source, so the host
    /// decides when this happens.
    pub fn wake(&mut self) {
        self.halted = false;
        self.stopped = false;
    }

    /// Fetch, decode and execute exactly one instruction.
    ///
    /// On success PC points at the next instruction. When the opcode has no
    /// assigned instruction the error is returned and PC has moved past the
    /// opcode (and prefix), so calling `step` again skips it; nothing else
    /// is modified.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Executed, UnimplementedOpcode> {
        let start = self.regs.pc;
        let instruction = self.fetch_instruction(bus)?;
        let cycles = self.execute(bus, instruction);
        self.apply_ime_delay();

        Ok(Executed {
            pc: start,
            instruction,
            cycles,
        })
    }

    /// Fetch the opcode (and the extended-page byte after a prefix) and
    /// decode it, advancing PC past what was read.
    fn fetch_instruction<B: Bus>(
        &mut self,
        bus: &mut B,
    ) -> Result<Instruction, UnimplementedOpcode> {
        let mut opcode_pc = self.regs.pc;
        let mut byte = self.fetch8(bus);
        let mut page = Page::Primary;

        if byte == CB_PREFIX {
            opcode_pc = self.regs.pc;
            byte = self.fetch8(bus);
            page = Page::Extended;
        }

        let op = Opcode::decode(byte);
        let decoded = match page {
            Page::Primary => Instruction::decode_primary(op),
            Page::Extended => Instruction::decode_extended(op),
        };

        decoded.ok_or(UnimplementedOpcode {
            opcode: byte,
            pc: opcode_pc,
            page,
        })
    }

    /// Apply delayed IME change requested by EI.
    #[inline]
    fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // The instruction after EI has completed.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // EI itself has completed; arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
