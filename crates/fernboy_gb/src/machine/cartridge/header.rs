use crate::GbError;

/// Smallest image that still holds a complete header.
const HEADER_END: usize = 0x0150;

/// Bank-switching controller named by header byte 0x0147.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum MapperKind {
    None,
    Mbc1,
    Mbc3,
    Mbc5,
}

/// Fields of the cartridge header the machine acts on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CartridgeHeader {
    pub(crate) title: String,
    pub(crate) cgb: bool,
    pub(crate) mapper: MapperKind,
    pub(crate) battery: bool,
    pub(crate) rom_banks: usize,
    pub(crate) ram_banks: usize,
}

impl CartridgeHeader {
    pub(crate) fn parse(rom: &[u8]) -> Result<Self, GbError> {
        if rom.len() < HEADER_END {
            return Err(GbError::RomTooSmall {
                expected: HEADER_END,
                actual: rom.len(),
            });
        }

        let title = rom[0x0134..0x0143]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_owned();

        let cgb = match rom[0x0143] {
            0x80 | 0xC0 => true,
            0x00 => false,
            other => {
                log::warn!("GB MBC: unknown CGB flag 0x{other:02X}, running as DMG");
                false
            }
        };

        let (mapper, battery) = match rom[0x0147] {
            0x00 => (MapperKind::None, false),
            0x01 => (MapperKind::Mbc1, false),
            0x03 => (MapperKind::Mbc1, true),
            0x13 => (MapperKind::Mbc3, true),
            0x1B => (MapperKind::Mbc5, true),
            other => return Err(GbError::UnsupportedMapper(other)),
        };

        let rom_code = rom[0x0148];
        if rom_code > 0x08 {
            return Err(GbError::UnknownRomSize(rom_code));
        }
        let rom_size = 0x8000usize << rom_code;
        if rom.len() < rom_size {
            return Err(GbError::RomTooSmall {
                expected: rom_size,
                actual: rom.len(),
            });
        }

        let ram_banks = match rom[0x0149] {
            0x00 | 0x01 => 0,
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            other => return Err(GbError::UnknownRamSize(other)),
        };

        Ok(Self {
            title,
            cgb,
            mapper,
            battery,
            rom_banks: rom_size / 0x4000,
            ram_banks,
        })
    }
}
