use crate::cpu::{Bus, Cpu, Flags};
use crate::instruction::{AluOp, Instruction, RotOp, Rp, R8};

impl Cpu {
    pub(super) fn exec_alu_r<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: R8) -> u32 {
        let value = self.read_r8(bus, src);
        self.alu(op, value);
        if src.is_memory() {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_alu_d8<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let value = self.fetch8(bus);
        self.alu(op, value);
        8
    }

    /// RLCA/RRCA/RLA/RRA: the extended-page rotates applied to A, except
    /// that Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, instruction: Instruction) -> u32 {
        let op = match instruction {
            Instruction::Rlca => RotOp::Rlc,
            Instruction::Rrca => RotOp::Rrc,
            Instruction::Rla => RotOp::Rl,
            Instruction::Rra => RotOp::Rr,
            other => unreachable!("{other} is not an accumulator rotate"),
        };

        self.regs.a = self.alu_rotate(op, self.regs.a);
        self.set_flag(Flags::ZERO, false);
        4
    }

    pub(super) fn exec_add_hl_rp(&mut self, rp: Rp) -> u32 {
        let value = self.read_rp(rp);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flags::HALF_CARRY, true);
        self.set_flag(Flags::SUBTRACT, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flags::CARRY, true);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::SUBTRACT, false);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.flag(Flags::CARRY);
        self.set_flag(Flags::CARRY, !carry);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::SUBTRACT, false);
        4
    }
}
