use super::{Cpu, Flags, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU in the power-on state: every register zero, execution starting
    /// at 0x0000 where the boot ROM is mapped.
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            halted: false,
            stopped: false,
        }
    }

    /// Reset the CPU to its power-on state.
    ///
    /// Registers, flags, SP and PC are zeroed and IME/HALT/STOP cleared.
    /// Memory belongs to the caller and is left alone.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code.
    ///
    /// Used when a cartridge is run without a boot ROM. These values follow
    /// common emulator conventions and Pan Docs.
    pub fn apply_post_boot_state(&mut self) {
        self.reset();

        // Registers (DMG mode).
        self.regs.a = 0x01;
        self.regs.f = Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY; // 0xB0
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }
}
