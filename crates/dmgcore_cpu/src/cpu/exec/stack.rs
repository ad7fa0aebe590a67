use crate::cpu::{Bus, Cpu};
use crate::instruction::Rp2;

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, rp: Rp2) -> u32 {
        let value = self.read_rp2(rp);
        self.push_u16(bus, value);
        16
    }

    /// POP AF drops the low nibble of F.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, rp: Rp2) -> u32 {
        let value = self.pop_u16(bus);
        self.write_rp2(rp, value);
        12
    }
}
