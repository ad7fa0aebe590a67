/// Total addressable memory for the Game Boy (64 KiB).
///
/// Every `u16` address maps to exactly one cell, so a correctly sized image
/// can never be indexed out of bounds.
pub const MEMORY_SIZE: usize = 0x10000;

/// Abstraction over the memory the CPU executes from.
///
/// The CPU only ever holds a `&mut` to the bus for one `step`; the caller
/// owns it the rest of the time.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read. The high byte comes from `addr + 1`,
    /// wrapping at the top of the address space.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write, the counterpart of [`Bus::read16`].
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}

impl Bus for [u8; MEMORY_SIZE] {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self[addr as usize]
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self[addr as usize] = value;
    }
}

impl<B: Bus + ?Sized> Bus for Box<B> {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        (**self).read8(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        (**self).write8(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_access_is_little_endian_and_wraps() {
        let mut mem = Box::new([0u8; MEMORY_SIZE]);
        mem.write16(0xC000, 0xBEEF);
        assert_eq!(mem[0xC000], 0xEF);
        assert_eq!(mem[0xC001], 0xBE);
        assert_eq!(mem.read16(0xC000), 0xBEEF);

        mem.write16(0xFFFF, 0x1234);
        assert_eq!(mem[0xFFFF], 0x34);
        assert_eq!(mem[0x0000], 0x12);
        assert_eq!(mem.read16(0xFFFF), 0x1234);
    }
}
