mod header;
mod mbc1;
mod mbc3;
mod mbc5;

pub(crate) use header::{CartridgeHeader, MapperKind};
use mbc1::Mbc1;
use mbc3::Mbc3;
use mbc5::Mbc5;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// ROM image and external RAM owned by every mapper variant.
pub(super) struct Banks {
    rom: Vec<u8>,
    ram: Vec<u8>,
    battery: bool,
}

impl Banks {
    fn new(rom: &[u8], header: &CartridgeHeader) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0; header.ram_banks * RAM_BANK_SIZE],
            battery: header.battery,
        }
    }

    /// Byte at `addr` (taken modulo 16 KiB) inside ROM bank `bank`.
    ///
    /// Banks past the end of the image wrap the way unconnected address
    /// lines do on a real board.
    fn rom_byte(&self, bank: usize, addr: u16) -> u8 {
        let count = (self.rom.len() / ROM_BANK_SIZE).max(1);
        let index = (bank % count) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1));
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    fn ram_index(&self, bank: usize, addr: u16) -> Option<usize> {
        let count = self.ram.len() / RAM_BANK_SIZE;
        if count == 0 {
            return None;
        }
        Some((bank % count) * RAM_BANK_SIZE + (addr as usize & (RAM_BANK_SIZE - 1)))
    }

    fn ram_byte(&self, bank: usize, addr: u16) -> u8 {
        self.ram_index(bank, addr)
            .and_then(|i| self.ram.get(i).copied())
            .unwrap_or(0xFF)
    }

    fn set_ram_byte(&mut self, bank: usize, addr: u16, value: u8) {
        if let Some(i) = self.ram_index(bank, addr) {
            self.ram[i] = value;
        }
    }
}

/// Closed set of supported mappers.
pub(super) enum Cartridge {
    None(Banks),
    Mbc1(Mbc1),
    Mbc3(Mbc3),
    Mbc5(Mbc5),
}

impl Default for Cartridge {
    /// An empty slot: every ROM and SRAM read returns 0xFF.
    fn default() -> Self {
        Cartridge::None(Banks {
            rom: Vec::new(),
            ram: Vec::new(),
            battery: false,
        })
    }
}

impl Cartridge {
    pub(super) fn new(rom: &[u8], header: &CartridgeHeader) -> Self {
        let banks = Banks::new(rom, header);
        match header.mapper {
            MapperKind::None => Cartridge::None(banks),
            MapperKind::Mbc1 => Cartridge::Mbc1(Mbc1::new(banks)),
            MapperKind::Mbc3 => Cartridge::Mbc3(Mbc3::new(banks)),
            MapperKind::Mbc5 => Cartridge::Mbc5(Mbc5::new(banks, false)),
        }
    }

    fn banks(&self) -> &Banks {
        match self {
            Cartridge::None(b) => b,
            Cartridge::Mbc1(m) => &m.banks,
            Cartridge::Mbc3(m) => &m.banks,
            Cartridge::Mbc5(m) => &m.banks,
        }
    }

    fn banks_mut(&mut self) -> &mut Banks {
        match self {
            Cartridge::None(b) => b,
            Cartridge::Mbc1(m) => &mut m.banks,
            Cartridge::Mbc3(m) => &mut m.banks,
            Cartridge::Mbc5(m) => &mut m.banks,
        }
    }

    pub(super) fn read_rom(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 { 0 } else { self.rom_bank() };
        self.banks().rom_byte(bank, addr)
    }

    pub(super) fn write_rom(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::None(_) => {}
            Cartridge::Mbc1(m) => m.write_register(addr, value),
            Cartridge::Mbc3(m) => m.write_register(addr, value),
            Cartridge::Mbc5(m) => m.write_register(addr, value),
        }
    }

    pub(super) fn read_sram(&self, addr: u16) -> u8 {
        match self {
            Cartridge::None(_) => 0xFF,
            Cartridge::Mbc1(m) => m.read_sram(addr),
            Cartridge::Mbc3(m) => m.read_sram(addr),
            Cartridge::Mbc5(m) => m.read_sram(addr),
        }
    }

    pub(super) fn write_sram(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::None(_) => {}
            Cartridge::Mbc1(m) => m.write_sram(addr, value),
            Cartridge::Mbc3(m) => m.write_sram(addr, value),
            Cartridge::Mbc5(m) => m.write_sram(addr, value),
        }
    }

    /// Bank currently mapped at 0x4000-0x7FFF.
    pub(super) fn rom_bank(&self) -> usize {
        match self {
            Cartridge::None(_) => 1,
            Cartridge::Mbc1(m) => m.rom_bank(),
            Cartridge::Mbc3(m) => m.rom_bank(),
            Cartridge::Mbc5(m) => m.rom_bank(),
        }
    }

    /// Raw external RAM for battery-backed carts, empty otherwise.
    pub(super) fn sram_serialize(&self) -> Vec<u8> {
        let banks = self.banks();
        if banks.battery {
            banks.ram.clone()
        } else {
            Vec::new()
        }
    }

    /// Restore external RAM from a previously serialised image.
    pub(super) fn load_sram(&mut self, data: &[u8]) {
        let ram = &mut self.banks_mut().ram;
        if data.len() != ram.len() {
            log::warn!(
                "GB MBC: save image is {} bytes, cartridge RAM is {} bytes",
                data.len(),
                ram.len()
            );
        }
        let len = data.len().min(ram.len());
        ram[..len].copy_from_slice(&data[..len]);
    }

    /// Forward elapsed machine cycles to mappers that keep time.
    pub(super) fn advance(&mut self, cycles: u32) {
        if let Cartridge::Mbc3(m) = self {
            m.advance(cycles);
        }
    }
}
