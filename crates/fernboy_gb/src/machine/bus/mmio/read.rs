use super::super::super::io::palette_read;
use super::super::{GameBoyBus, VRAM_BANK_SIZE, WRAM_BANK_SIZE};
use super::is_cgb_only;

impl GameBoyBus {
    pub(in super::super) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.read_rom(addr),

            0x8000..=0x9FFF => {
                if !self.vram_accessible() {
                    return 0xFF;
                }
                self.vram[self.vram_bank() * VRAM_BANK_SIZE + (addr - 0x8000) as usize]
            }

            0xA000..=0xBFFF => self.cartridge.read_sram(addr),

            0xC000..=0xCFFF => self.wram[(addr - 0xC000) as usize],
            0xD000..=0xDFFF => {
                self.wram[self.wram_bank() * WRAM_BANK_SIZE + (addr - 0xD000) as usize]
            }

            // Echo RAM mirrors 0xC000-0xDDFF.
            0xE000..=0xFDFF => self.read8_mmio(addr - 0x2000),

            0xFE00..=0xFE9F => {
                if !self.oam_accessible() {
                    return 0xFF;
                }
                self.oam[(addr - 0xFE00) as usize]
            }

            0xFEA0..=0xFEFF => 0xFF,

            0xFF00..=0xFF7F => self.read_io(addr),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],

            0xFFFF => self.io.ie,
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        if is_cgb_only(addr) && !self.cgb {
            return 0xFF;
        }

        let io = &self.io;
        match addr {
            0xFF00 => self.read_joyp(),
            0xFF01 => self.serial.sb,
            0xFF02 => self.serial.sc(),

            0xFF04 => self.timer.div,
            0xFF05 => self.timer.tima,
            0xFF06 => self.timer.tma,
            0xFF07 => self.timer.tac(),

            // Upper three IF bits are unused and read as 1.
            0xFF0F => io.iflag.bits() | 0xE0,

            0xFF10..=0xFF3F => io.sound[(addr - 0xFF10) as usize],

            0xFF40 => io.lcdc.bits(),
            0xFF41 => self.read_stat(),
            0xFF42 => io.scy,
            0xFF43 => io.scx,
            0xFF44 => io.ly,
            0xFF45 => io.lyc,
            0xFF46 => io.dma,
            0xFF47 => io.bgp,
            0xFF48 => io.obp0,
            0xFF49 => io.obp1,
            0xFF4A => io.wy,
            0xFF4B => io.wx,

            0xFF4D => io.key1(),
            0xFF4F => 0xFE | io.vbk,
            0xFF55 => io.hdma5,
            0xFF68 => io.bgpi,
            0xFF69 => palette_read(io.bgpi, &io.bg_palette),
            0xFF6A => io.obpi,
            0xFF6B => palette_read(io.obpi, &io.obj_palette),
            0xFF70 => 0xF8 | io.svbk,

            _ => 0xFF,
        }
    }

    /// STAT with the live mode and LYC=LY bits merged in.
    pub(in super::super) fn read_stat(&self) -> u8 {
        let coincidence = u8::from(self.io.ly == self.io.lyc) << 2;
        0x80 | self.io.stat | coincidence | self.clock.mode as u8
    }
}
