use super::Banks;

/// Machine cycles in one emulated second (4.194304 MHz / 4).
const CYCLES_PER_SECOND: u32 = 1_048_576;

const DH_DAY_HIGH: u8 = 0x01;
const DH_HALT: u8 = 0x40;
const DH_DAY_CARRY: u8 = 0x80;

/// Real-time clock registers in select order: S, M, H, DL, DH.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
struct RtcRegisters([u8; 5]);

impl RtcRegisters {
    const MASKS: [u8; 5] = [0x3F, 0x3F, 0x1F, 0xFF, 0xC1];

    fn day(&self) -> u16 {
        self.0[3] as u16 | ((self.0[4] & DH_DAY_HIGH) as u16) << 8
    }

    fn set_day(&mut self, day: u16) {
        self.0[3] = day as u8;
        self.0[4] = (self.0[4] & !DH_DAY_HIGH) | ((day >> 8) as u8 & DH_DAY_HIGH);
    }

    fn halted(&self) -> bool {
        self.0[4] & DH_HALT != 0
    }

    fn tick_second(&mut self) {
        let [s, m, h, ..] = &mut self.0;
        *s += 1;
        if *s < 60 {
            return;
        }
        *s = 0;
        *m += 1;
        if *m < 60 {
            return;
        }
        *m = 0;
        *h += 1;
        if *h < 24 {
            return;
        }
        *h = 0;

        let day = self.day() + 1;
        if day > 0x1FF {
            self.set_day(0);
            self.0[4] |= DH_DAY_CARRY;
        } else {
            self.set_day(day);
        }
    }
}

/// MBC3: 7-bit ROM bank, RAM banks 0-3 and a latched real-time clock.
pub(in super::super) struct Mbc3 {
    pub(super) banks: Banks,
    ram_enable: bool,
    rom_bank: u8,
    /// 0x00-0x03 select a RAM bank, 0x08-0x0C an RTC register.
    select: u8,
    rtc: RtcRegisters,
    latched: RtcRegisters,
    last_latch_write: u8,
    subsecond: u32,
}

impl Mbc3 {
    pub(super) fn new(banks: Banks) -> Self {
        Self {
            banks,
            ram_enable: false,
            rom_bank: 1,
            select: 0,
            rtc: RtcRegisters::default(),
            latched: RtcRegisters::default(),
            last_latch_write: 0xFF,
            subsecond: 0,
        }
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = value & 0x7F;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
            }
            0x4000..=0x5FFF => self.select = value & 0x0F,
            0x6000..=0x7FFF => {
                if self.last_latch_write == 0x00 && value == 0x01 {
                    self.latched = self.rtc;
                }
                self.last_latch_write = value;
            }
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    fn rtc_index(&self) -> Option<usize> {
        match self.select {
            0x08..=0x0C => Some((self.select - 0x08) as usize),
            _ => None,
        }
    }

    pub(super) fn read_sram(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        match (self.select, self.rtc_index()) {
            (_, Some(reg)) => self.latched.0[reg],
            (0x00..=0x03, None) => self.banks.ram_byte(self.select as usize, addr),
            _ => 0xFF,
        }
    }

    pub(super) fn write_sram(&mut self, addr: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        match (self.select, self.rtc_index()) {
            (_, Some(reg)) => {
                self.rtc.0[reg] = value & RtcRegisters::MASKS[reg];
                if reg == 0 {
                    self.subsecond = 0;
                }
            }
            (0x00..=0x03, None) => self.banks.set_ram_byte(self.select as usize, addr, value),
            _ => {}
        }
    }

    /// Run the live clock forward by `cycles` machine cycles.
    pub(super) fn advance(&mut self, cycles: u32) {
        if self.rtc.halted() {
            return;
        }
        self.subsecond += cycles;
        while self.subsecond >= CYCLES_PER_SECOND {
            self.subsecond -= CYCLES_PER_SECOND;
            self.rtc.tick_second();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mbc3() -> Mbc3 {
        let mut mbc = Mbc3::new(Banks {
            rom: vec![0; 0x8000],
            ram: vec![0; 4 * 0x2000],
            battery: true,
        });
        mbc.write_register(0x0000, 0x0A);
        mbc
    }

    fn latch(mbc: &mut Mbc3) {
        mbc.write_register(0x6000, 0x00);
        mbc.write_register(0x6000, 0x01);
    }

    fn read_rtc(mbc: &mut Mbc3, reg: u8) -> u8 {
        mbc.write_register(0x4000, reg);
        mbc.read_sram(0xA000)
    }

    #[test]
    fn zero_rom_bank_maps_to_one() {
        let mut mbc = mbc3();
        mbc.write_register(0x2000, 0x00);
        assert_eq!(mbc.rom_bank(), 1);
        mbc.write_register(0x2000, 0xFF);
        assert_eq!(mbc.rom_bank(), 0x7F);
    }

    #[test]
    fn clock_reads_come_from_the_latch() {
        let mut mbc = mbc3();
        mbc.advance(CYCLES_PER_SECOND * 75);
        assert_eq!(read_rtc(&mut mbc, 0x08), 0);

        latch(&mut mbc);
        assert_eq!(read_rtc(&mut mbc, 0x08), 15);
        assert_eq!(read_rtc(&mut mbc, 0x09), 1);

        // The latch holds while the live clock keeps running.
        mbc.advance(CYCLES_PER_SECOND);
        assert_eq!(read_rtc(&mut mbc, 0x08), 15);
    }

    #[test]
    fn latch_needs_zero_then_one() {
        let mut mbc = mbc3();
        mbc.advance(CYCLES_PER_SECOND * 3);
        mbc.write_register(0x6000, 0x01);
        assert_eq!(read_rtc(&mut mbc, 0x08), 0);
        latch(&mut mbc);
        assert_eq!(read_rtc(&mut mbc, 0x08), 3);
    }

    #[test]
    fn halt_bit_stops_the_clock() {
        let mut mbc = mbc3();
        mbc.write_register(0x4000, 0x0C);
        mbc.write_sram(0xA000, DH_HALT);
        mbc.advance(CYCLES_PER_SECOND * 10);
        latch(&mut mbc);
        assert_eq!(read_rtc(&mut mbc, 0x08), 0);
        assert_eq!(read_rtc(&mut mbc, 0x0C), DH_HALT);
    }

    #[test]
    fn day_counter_overflow_sets_carry() {
        let mut mbc = mbc3();
        // 511 days, 23:59:59
        for (reg, value) in [(0x08, 59), (0x09, 59), (0x0A, 23), (0x0B, 0xFF), (0x0C, 0x01)] {
            mbc.write_register(0x4000, reg);
            mbc.write_sram(0xA000, value);
        }
        mbc.advance(CYCLES_PER_SECOND);
        latch(&mut mbc);

        assert_eq!(read_rtc(&mut mbc, 0x0A), 0);
        assert_eq!(read_rtc(&mut mbc, 0x0B), 0);
        assert_eq!(read_rtc(&mut mbc, 0x0C), DH_DAY_CARRY);
    }

    #[test]
    fn ram_banks_are_separate_from_rtc_registers() {
        let mut mbc = mbc3();
        mbc.write_register(0x4000, 0x02);
        mbc.write_sram(0xA123, 0x5A);
        mbc.write_register(0x4000, 0x08);
        mbc.write_sram(0xA123, 30);
        mbc.write_register(0x4000, 0x02);
        assert_eq!(mbc.read_sram(0xA123), 0x5A);

        mbc.write_register(0x0000, 0x00);
        assert_eq!(mbc.read_sram(0xA123), 0xFF);
    }
}
