use std::path::Path;

use anyhow::{bail, Context, Result};

/// The DMG boot ROM is exactly 256 bytes, mapped at 0x0000.
pub const BOOT_ROM_SIZE: usize = 0x100;

/// Cartridge ROM visible without a mapper: 0x0000-0x7FFF.
pub const CARTRIDGE_WINDOW: usize = 0x8000;

const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
const CARTRIDGE_TYPE: usize = 0x0147;
const HEADER_CHECKSUM: usize = 0x014D;
const HEADER_END: usize = 0x0150;

/// A validated boot ROM image.
#[derive(Clone)]
pub struct BootRom {
    bytes: [u8; BOOT_ROM_SIZE],
}

impl BootRom {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; BOOT_ROM_SIZE] = bytes.try_into().with_context(|| {
            format!(
                "boot ROM must be exactly {BOOT_ROM_SIZE} bytes, got {}",
                bytes.len()
            )
        })?;
        Ok(Self { bytes })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read boot ROM '{}'", path.display()))?;
        let boot = Self::from_bytes(&data)
            .with_context(|| format!("invalid boot ROM '{}'", path.display()))?;
        log::info!("Loaded boot ROM '{}'", path.display());
        Ok(boot)
    }

    pub fn as_bytes(&self) -> &[u8; BOOT_ROM_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for BootRom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootRom").finish_non_exhaustive()
    }
}

/// Fields of the cartridge header at 0x0100-0x014F that the host uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    /// Checksum byte stored at 0x014D.
    pub header_checksum: u8,
    /// Checksum computed over 0x0134-0x014C.
    pub computed_checksum: u8,
}

impl CartridgeHeader {
    /// Parse the header of `rom`, which must be at least 0x150 bytes long.
    fn parse(rom: &[u8]) -> Self {
        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '?'
                }
            })
            .collect::<String>()
            .trim_end()
            .to_string();

        Self {
            title,
            cartridge_type: rom[CARTRIDGE_TYPE],
            header_checksum: rom[HEADER_CHECKSUM],
            computed_checksum: header_checksum(rom),
        }
    }

    pub fn checksum_ok(&self) -> bool {
        self.header_checksum == self.computed_checksum
    }

    /// Type 0x00: no mapper and no external RAM.
    pub fn is_rom_only(&self) -> bool {
        self.cartridge_type == 0x00
    }
}

/// The boot ROM refuses to start a cartridge when this does not match the
/// byte at 0x014D.
pub(crate) fn header_checksum(rom: &[u8]) -> u8 {
    rom[0x0134..=0x014C]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

/// A ROM-only cartridge image, zero padded to the 32 KiB window.
#[derive(Clone)]
pub struct Cartridge {
    rom: Box<[u8; CARTRIDGE_WINDOW]>,
    header: CartridgeHeader,
}

impl Cartridge {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_END {
            bail!(
                "cartridge image is {} bytes, too short to hold a header (needs {HEADER_END})",
                bytes.len()
            );
        }

        if bytes.len() > CARTRIDGE_WINDOW {
            log::warn!(
                "Cartridge image is {} bytes; only the first {} are mapped",
                bytes.len(),
                CARTRIDGE_WINDOW
            );
        }

        let header = CartridgeHeader::parse(bytes);
        if !header.checksum_ok() {
            log::warn!(
                "Header checksum mismatch: stored {:#04x}, computed {:#04x}",
                header.header_checksum,
                header.computed_checksum
            );
        }
        if !header.is_rom_only() {
            log::warn!(
                "Cartridge type {:#04x} is not ROM-only; only the first 32 KiB are mapped",
                header.cartridge_type
            );
        }

        let mut rom = Box::new([0u8; CARTRIDGE_WINDOW]);
        let len = bytes.len().min(CARTRIDGE_WINDOW);
        rom[..len].copy_from_slice(&bytes[..len]);

        Ok(Self { rom, header })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read cartridge '{}'", path.display()))?;
        let cartridge = Self::from_bytes(&data)
            .with_context(|| format!("invalid cartridge '{}'", path.display()))?;
        log::info!(
            "Loaded cartridge '{}' (title \"{}\", type {:#04x})",
            path.display(),
            cartridge.header.title,
            cartridge.header.cartridge_type
        );
        Ok(cartridge)
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn rom(&self) -> &[u8; CARTRIDGE_WINDOW] {
        &self.rom
    }
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A header-valid ROM-only image with `program` at the 0x0100 entry
    /// point.
    pub(crate) fn rom_with_entry(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; CARTRIDGE_WINDOW];
        rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
        rom[TITLE.start..TITLE.start + 8].copy_from_slice(b"TESTCART");
        rom[HEADER_CHECKSUM] = header_checksum(&rom);
        rom
    }

    #[test]
    fn boot_rom_must_be_256_bytes() {
        assert!(BootRom::from_bytes(&[0u8; BOOT_ROM_SIZE]).is_ok());

        let err = BootRom::from_bytes(&[0u8; 255]).unwrap_err();
        assert!(err.to_string().contains("exactly 256 bytes"), "{err}");
        assert!(BootRom::from_bytes(&[0u8; 257]).is_err());
    }

    #[test]
    fn short_cartridge_is_rejected() {
        let err = Cartridge::from_bytes(&[0u8; 0x14F]).unwrap_err();
        assert!(err.to_string().contains("too short"), "{err}");
    }

    #[test]
    fn header_fields_are_parsed() {
        let cartridge = Cartridge::from_bytes(&rom_with_entry(&[0x00])).unwrap();
        let header = cartridge.header();
        assert_eq!(header.title, "TESTCART");
        assert_eq!(header.cartridge_type, 0x00);
        assert!(header.is_rom_only());
        assert!(header.checksum_ok());
    }

    #[test]
    fn mapper_cartridge_maps_first_window_only() {
        // ROM+RAM, no mapper chip; still outside what the host maps.
        let mut rom = rom_with_entry(&[0x00]);
        rom[CARTRIDGE_TYPE] = 0x08;
        rom[HEADER_CHECKSUM] = header_checksum(&rom);
        rom[CARTRIDGE_WINDOW - 1] = 0x42;
        rom.resize(CARTRIDGE_WINDOW * 2, 0x99);

        let cartridge = Cartridge::from_bytes(&rom).unwrap();
        let header = cartridge.header();
        assert_eq!(header.cartridge_type, 0x08);
        assert!(!header.is_rom_only());
        assert!(header.checksum_ok());
        assert_eq!(cartridge.rom()[CARTRIDGE_WINDOW - 1], 0x42);
    }

    #[test]
    fn checksum_mismatch_is_reported_not_fatal() {
        let mut rom = rom_with_entry(&[0x00]);
        rom[HEADER_CHECKSUM] ^= 0xFF;

        let cartridge = Cartridge::from_bytes(&rom).unwrap();
        assert!(!cartridge.header().checksum_ok());
    }

    #[test]
    fn checksum_of_blank_header() {
        // 25 bytes of zero: 0 - 25 * 1 wraps to 0xE7.
        let rom = vec![0u8; HEADER_END];
        assert_eq!(header_checksum(&rom), 0xE7);
    }

    #[test]
    fn short_image_is_padded_and_long_image_truncated() {
        let mut short = rom_with_entry(&[0x3C]);
        short.truncate(HEADER_END);
        let cartridge = Cartridge::from_bytes(&short).unwrap();
        assert_eq!(cartridge.rom()[0x0100], 0x3C);
        assert!(cartridge.rom()[HEADER_END..].iter().all(|&b| b == 0));

        let mut long = rom_with_entry(&[0x00]);
        long[CARTRIDGE_WINDOW - 1] = 0x77;
        long.resize(CARTRIDGE_WINDOW * 2, 0xFF);
        let cartridge = Cartridge::from_bytes(&long).unwrap();
        assert_eq!(cartridge.rom().len(), CARTRIDGE_WINDOW);
        assert_eq!(cartridge.rom()[CARTRIDGE_WINDOW - 1], 0x77);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = Cartridge::load(Path::new("does/not/exist.gb")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.gb"), "{err:#}");
    }
}
