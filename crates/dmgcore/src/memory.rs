use dmgcore_cpu::{Bus, MEMORY_SIZE};

use crate::loader::{BootRom, Cartridge, BOOT_ROM_SIZE, CARTRIDGE_WINDOW};

/// Writing a non-zero value here unmaps the boot ROM.
const BOOT_ROM_DISABLE: u16 = 0xFF50;

/// Flat 64 KiB address space as seen by the CPU.
///
/// The cartridge occupies 0x0000-0x7FFF and is read-only. While the boot
/// ROM is mapped it shadows the first 256 bytes of the cartridge; those
/// bytes are kept aside and restored when the boot ROM unmaps itself
/// through 0xFF50. No other I/O register is decoded.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
    cartridge_head: [u8; BOOT_ROM_SIZE],
    boot_rom_mapped: bool,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; MEMORY_SIZE]),
            cartridge_head: [0; BOOT_ROM_SIZE],
            boot_rom_mapped: false,
        }
    }

    /// Map `cartridge` at 0x0000. Any boot ROM overlay is dropped and has
    /// to be mapped again afterwards.
    pub fn load_cartridge(&mut self, cartridge: &Cartridge) {
        self.bytes[..CARTRIDGE_WINDOW].copy_from_slice(cartridge.rom());
        self.boot_rom_mapped = false;
    }

    /// Overlay the boot ROM at 0x0000. The cartridge bytes underneath are
    /// preserved.
    pub fn map_boot_rom(&mut self, boot: &BootRom) {
        if !self.boot_rom_mapped {
            self.cartridge_head.copy_from_slice(&self.bytes[..BOOT_ROM_SIZE]);
        }
        self.bytes[..BOOT_ROM_SIZE].copy_from_slice(boot.as_bytes());
        self.boot_rom_mapped = true;
    }

    #[inline]
    pub fn is_boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }

    fn unmap_boot_rom(&mut self) {
        self.bytes[..BOOT_ROM_SIZE].copy_from_slice(&self.cartridge_head);
        self.boot_rom_mapped = false;
        log::info!("Boot ROM unmapped");
    }

    /// Raw view of the address space, bypassing the write rules.
    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }
}

impl Bus for Memory {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if (addr as usize) < CARTRIDGE_WINDOW {
            // ROM.
            return;
        }

        self.bytes[addr as usize] = value;
        if addr == BOOT_ROM_DISABLE && value != 0 && self.boot_rom_mapped {
            self.unmap_boot_rom();
        }
    }
}
