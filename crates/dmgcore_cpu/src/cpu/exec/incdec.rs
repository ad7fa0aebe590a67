use crate::cpu::{Bus, Cpu};
use crate::instruction::{Rp, R8};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.read_r8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_r8(bus, reg, result);
        if reg.is_memory() {
            12
        } else {
            4
        }
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.read_r8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_r8(bus, reg, result);
        if reg.is_memory() {
            12
        } else {
            4
        }
    }

    // 16-bit INC/DEC touch no flags.

    pub(super) fn exec_inc16(&mut self, rp: Rp) -> u32 {
        let value = self.read_rp(rp).wrapping_add(1);
        self.write_rp(rp, value);
        8
    }

    pub(super) fn exec_dec16(&mut self, rp: Rp) -> u32 {
        let value = self.read_rp(rp).wrapping_sub(1);
        self.write_rp(rp, value);
        8
    }
}
