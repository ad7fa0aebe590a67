use crate::cpu::{Bus, Cpu};
use crate::instruction::Cond;

impl Cpu {
    /// `cc` of `None` is the unconditional form.
    #[inline]
    fn taken(&self, cc: Option<Cond>) -> bool {
        cc.map_or(true, |cc| self.condition(cc))
    }

    /// JR r8: the offset is relative to the address after the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if self.taken(cc) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            12
        } else {
            8
        }
    }

    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        let target = self.fetch16(bus);
        if self.taken(cc) {
            self.regs.pc = target;
            16
        } else {
            12
        }
    }

    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        let target = self.fetch16(bus);
        if self.taken(cc) {
            self.push_u16(bus, self.regs.pc);
            self.regs.pc = target;
            24
        } else {
            12
        }
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        match cc {
            None => {
                self.regs.pc = self.pop_u16(bus);
                16
            }
            Some(cc) if self.condition(cc) => {
                self.regs.pc = self.pop_u16(bus);
                20
            }
            Some(_) => 8,
        }
    }

    /// RETI enables interrupts immediately, without the EI delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        16
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, target: u8) -> u32 {
        self.push_u16(bus, self.regs.pc);
        self.regs.pc = target as u16;
        16
    }
}
