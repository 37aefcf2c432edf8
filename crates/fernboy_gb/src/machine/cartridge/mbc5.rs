use super::Banks;

/// MBC5: 9-bit ROM bank and 4-bit RAM bank, no bank-0 quirk.
pub(in super::super) struct Mbc5 {
    pub(super) banks: Banks,
    ram_enable: bool,
    rom_bank: u16,
    ram_bank: u8,
    /// Rumble carts wire RAM bank bit 3 to the motor instead.
    rumble: bool,
    motor_on: bool,
}

impl Mbc5 {
    pub(super) fn new(banks: Banks, rumble: bool) -> Self {
        Self {
            banks,
            ram_enable: false,
            rom_bank: 1,
            ram_bank: 0,
            rumble,
            motor_on: false,
        }
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x2FFF => self.rom_bank = (self.rom_bank & 0x100) | value as u16,
            0x3000..=0x3FFF => {
                self.rom_bank = (self.rom_bank & 0xFF) | ((value as u16 & 0x01) << 8)
            }
            0x4000..=0x5FFF => {
                if self.rumble {
                    let motor_on = value & 0x08 != 0;
                    if motor_on != self.motor_on {
                        log::trace!("GB MBC: rumble motor {}", if motor_on { "on" } else { "off" });
                    }
                    self.motor_on = motor_on;
                    self.ram_bank = value & 0x07;
                } else {
                    self.ram_bank = value & 0x0F;
                }
            }
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    pub(super) fn read_sram(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        self.banks.ram_byte(self.ram_bank as usize, addr)
    }

    pub(super) fn write_sram(&mut self, addr: u16, value: u8) {
        if self.ram_enable {
            self.banks.set_ram_byte(self.ram_bank as usize, addr, value);
        }
    }

    #[cfg(test)]
    pub(super) fn motor_on(&self) -> bool {
        self.motor_on
    }
}
