mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu};
use crate::instruction::Instruction;

impl Cpu {
    /// Execute a decoded instruction and return its duration in T-cycles.
    ///
    /// PC already points past the opcode; handlers fetch their own operand
    /// bytes. Each arm forwards the decoded selectors to one handler per
    /// instruction family.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instruction: Instruction) -> u32 {
        use Instruction::*;

        match instruction {
            Nop => 4,
            Stop => self.exec_stop(bus),
            Halt => self.exec_halt(),
            Di => self.exec_di(),
            Ei => self.exec_ei(),

            // Loads.
            Ld(dst, src) => self.exec_ld_r_r(bus, dst, src),
            LdImm8(dst) => self.exec_ld_r_d8(bus, dst),
            LdRpImm16(rp) => self.exec_ld_rp_d16(bus, rp),
            StoreA(ind) => self.exec_ld_indirect_a(bus, ind),
            LoadA(ind) => self.exec_ld_a_indirect(bus, ind),
            StoreSp => self.exec_ld_a16_sp(bus),
            StoreAAbs => self.exec_ld_a16_a(bus),
            LoadAAbs => self.exec_ld_a_a16(bus),
            StoreAHigh => self.exec_ldh_a8_a(bus),
            LoadAHigh => self.exec_ldh_a_a8(bus),
            StoreAHighC => self.exec_ldh_c_a(bus),
            LoadAHighC => self.exec_ldh_a_c(bus),
            LdSpHl => self.exec_ld_sp_hl(),
            LdHlSpOffset => self.exec_ld_hl_sp_r8(bus),

            // Stack.
            Push(rp) => self.exec_push(bus, rp),
            Pop(rp) => self.exec_pop(bus, rp),

            // Arithmetic and logic.
            Alu(op, src) => self.exec_alu_r(bus, op, src),
            AluImm8(op) => self.exec_alu_d8(bus, op),
            Inc8(reg) => self.exec_inc8(bus, reg),
            Dec8(reg) => self.exec_dec8(bus, reg),
            Inc16(rp) => self.exec_inc16(rp),
            Dec16(rp) => self.exec_dec16(rp),
            AddHl(rp) => self.exec_add_hl_rp(rp),
            AddSpOffset => self.exec_add_sp_r8(bus),
            Rlca | Rrca | Rla | Rra => self.exec_rotate_a(instruction),
            Daa => self.exec_daa(),
            Cpl => self.exec_cpl(),
            Scf => self.exec_scf(),
            Ccf => self.exec_ccf(),

            // Control flow.
            Jr(cc) => self.exec_jr(bus, cc),
            Jp(cc) => self.exec_jp(bus, cc),
            JpHl => self.exec_jp_hl(),
            Call(cc) => self.exec_call(bus, cc),
            Ret(cc) => self.exec_ret(bus, cc),
            Reti => self.exec_reti(bus),
            Rst(target) => self.exec_rst(bus, target),

            // Extended page.
            Rot(..) | Bit(..) | Res(..) | Set(..) => self.exec_cb(bus, instruction),
        }
    }
}
