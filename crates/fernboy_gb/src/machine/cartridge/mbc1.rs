use super::Banks;

/// MBC1: 5-bit low ROM bank register plus a 2-bit register shared between
/// the ROM bank high bits and the RAM bank, switched by the banking mode.
pub(in super::super) struct Mbc1 {
    pub(super) banks: Banks,
    ram_enable: bool,
    rom_bank_low5: u8,
    bank_high2: u8,
    /// Set: the 2-bit register selects the RAM bank.
    ram_banking: bool,
}

impl Mbc1 {
    pub(super) fn new(banks: Banks) -> Self {
        Self {
            banks,
            ram_enable: false,
            rom_bank_low5: 1,
            bank_high2: 0,
            ram_banking: false,
        }
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value == 0x0A,
            0x2000..=0x3FFF => {
                // Bank 0 cannot be selected here; hardware substitutes 1.
                self.rom_bank_low5 = value & 0x1F;
                if self.rom_bank_low5 == 0 {
                    self.rom_bank_low5 = 1;
                }
            }
            0x4000..=0x5FFF => self.bank_high2 = value & 0x03,
            0x6000..=0x7FFF => self.ram_banking = value & 0x01 != 0,
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        let low = self.rom_bank_low5 as usize;
        if self.ram_banking {
            low
        } else {
            low | (self.bank_high2 as usize) << 5
        }
    }

    fn ram_bank(&self) -> usize {
        if self.ram_banking {
            self.bank_high2 as usize
        } else {
            0
        }
    }

    pub(super) fn read_sram(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        self.banks.ram_byte(self.ram_bank(), addr)
    }

    pub(super) fn write_sram(&mut self, addr: u16, value: u8) {
        if self.ram_enable {
            self.banks.set_ram_byte(self.ram_bank(), addr, value);
        }
    }
}
