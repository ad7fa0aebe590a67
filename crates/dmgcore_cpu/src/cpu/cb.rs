use super::{Bus, Cpu, Flags};
use crate::instruction::Instruction;

impl Cpu {
    /// Execute an extended-page instruction (rotates, shifts and bit
    /// operations). The prefix and the opcode byte are already consumed.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B, instruction: Instruction) -> u32 {
        match instruction {
            Instruction::Rot(op, target) => {
                let value = self.read_r8(bus, target);
                let result = self.alu_rotate(op, value);
                self.write_r8(bus, target, result);
                if target.is_memory() {
                    16
                } else {
                    8
                }
            }
            Instruction::Bit(bit, target) => {
                let value = self.read_r8(bus, target);
                // Z = complement of the tested bit, N=0, H=1, C preserved.
                self.set_flag(Flags::ZERO, value & (1 << bit) == 0);
                self.set_flag(Flags::SUBTRACT, false);
                self.set_flag(Flags::HALF_CARRY, true);
                if target.is_memory() {
                    12
                } else {
                    8
                }
            }
            Instruction::Res(bit, target) => {
                let value = self.read_r8(bus, target) & !(1 << bit);
                self.write_r8(bus, target, value);
                if target.is_memory() {
                    16
                } else {
                    8
                }
            }
            Instruction::Set(bit, target) => {
                let value = self.read_r8(bus, target) | (1 << bit);
                self.write_r8(bus, target, value);
                if target.is_memory() {
                    16
                } else {
                    8
                }
            }
            other => unreachable!("{other} is not an extended-page instruction"),
        }
    }
}
