use crate::cpu::{Bus, Cpu};
use crate::instruction::{Indirect, Rp, R8};

/// Base of the high page addressed by LDH.
const HIGH_PAGE: u16 = 0xFF00;

impl Cpu {
    pub(super) fn exec_ld_rp_d16<B: Bus>(&mut self, bus: &mut B, rp: Rp) -> u32 {
        let value = self.fetch16(bus);
        self.write_rp(rp, value);
        12
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, dst: R8) -> u32 {
        let value = self.fetch8(bus);
        self.write_r8(bus, dst, value);
        if dst.is_memory() {
            12
        } else {
            8
        }
    }

    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, dst: R8, src: R8) -> u32 {
        debug_assert!(
            !(dst.is_memory() && src.is_memory()),
            "LD (HL),(HL) decodes as HALT"
        );

        let value = self.read_r8(bus, src);
        self.write_r8(bus, dst, value);
        if dst.is_memory() || src.is_memory() {
            8
        } else {
            4
        }
    }

    /// Resolve the address of an `(rr)` operand, applying the HL post
    /// increment/decrement of the `(HL+)`/`(HL-)` forms.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => self.regs.hl_post_inc(),
            Indirect::HlDec => self.regs.hl_post_dec(),
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
        20
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a);
        16
    }

    pub(super) fn exec_ld_a_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        self.regs.a = bus.read8(addr);
        16
    }

    pub(super) fn exec_ldh_a8_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus) as u16;
        bus.write8(HIGH_PAGE | offset, self.regs.a);
        12
    }

    pub(super) fn exec_ldh_a_a8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus) as u16;
        self.regs.a = bus.read8(HIGH_PAGE | offset);
        12
    }

    pub(super) fn exec_ldh_c_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = HIGH_PAGE | self.regs.c as u16;
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ldh_a_c<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = HIGH_PAGE | self.regs.c as u16;
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        12
    }
}
