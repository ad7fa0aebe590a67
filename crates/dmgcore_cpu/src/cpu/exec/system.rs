use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// STOP is encoded as `10 00`; the padding byte is fetched and ignored.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _ = self.fetch8(bus);
        self.stopped = true;
        4
    }

    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    /// EI takes effect after the following instruction; see `apply_ime_delay`.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_enable_pending = true;
        4
    }
}
