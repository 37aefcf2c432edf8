use super::super::super::clock::PpuMode;
use super::super::super::io::{palette_write, Lcdc};
use super::super::super::Interrupts;
use super::super::{GameBoyBus, VRAM_BANK_SIZE, WRAM_BANK_SIZE};
use super::is_cgb_only;
use crate::GbError;

impl GameBoyBus {
    pub(in super::super) fn write8_mmio(&mut self, addr: u16, value: u8) -> Result<(), GbError> {
        match addr {
            // Writes into ROM space program the mapper.
            0x0000..=0x7FFF => self.cartridge.write_rom(addr, value),

            0x8000..=0x9FFF => {
                if self.vram_accessible() {
                    let index = self.vram_bank() * VRAM_BANK_SIZE + (addr - 0x8000) as usize;
                    self.vram[index] = value;
                } else {
                    log::warn!(
                        "GB MMU: VRAM write 0x{addr:04X}=0x{value:02X} dropped during mode 3"
                    );
                }
            }

            0xA000..=0xBFFF => self.cartridge.write_sram(addr, value),

            0xC000..=0xCFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xD000..=0xDFFF => {
                let index = self.wram_bank() * WRAM_BANK_SIZE + (addr - 0xD000) as usize;
                self.wram[index] = value;
            }

            0xE000..=0xFDFF => return self.write8_mmio(addr - 0x2000, value),

            0xFE00..=0xFE9F => {
                if self.oam_accessible() {
                    self.oam[(addr - 0xFE00) as usize] = value;
                } else {
                    log::warn!(
                        "GB MMU: OAM write 0x{addr:04X}=0x{value:02X} dropped in mode {}",
                        self.clock.mode as u8
                    );
                }
            }

            0xFEA0..=0xFEFF => {}

            0xFF00..=0xFF7F => return self.write_io(addr, value),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,

            0xFFFF => self.io.ie = value,
        }
        Ok(())
    }

    fn write_io(&mut self, addr: u16, value: u8) -> Result<(), GbError> {
        if is_cgb_only(addr) && !self.cgb {
            log::warn!(
                "GB MMU: CGB register 0x{addr:04X} written in DMG mode (0x{value:02X}), ignored"
            );
            return Ok(());
        }

        let io = &mut self.io;
        match addr {
            0xFF00 => self.write_joyp(value),

            0xFF01 => self.serial.sb = value,
            0xFF02 => self.serial.write_sc(value),

            0xFF04 => self.timer.write_div(),
            0xFF05 => self.timer.tima = value,
            0xFF06 => self.timer.tma = value,
            0xFF07 => self.timer.write_tac(value),

            0xFF0F => io.iflag = Interrupts::from_bits_truncate(value),

            0xFF10..=0xFF3F => io.sound[(addr - 0xFF10) as usize] = value,

            0xFF40 => self.write_lcdc(value),
            0xFF41 => io.stat = value & 0x78,
            0xFF42 => io.scy = value,
            0xFF43 => io.scx = value,
            0xFF44 => log::debug!("GB PPU: write to read-only LY ignored"),
            0xFF45 => io.lyc = value,
            0xFF46 => self.oam_dma(value),
            0xFF47 => io.bgp = value,
            0xFF48 => io.obp0 = value,
            0xFF49 => io.obp1 = value,
            0xFF4A => io.wy = value,
            0xFF4B => io.wx = value,

            0xFF4D => io.key1_armed = value & 0x01 != 0,
            0xFF4F => io.vbk = value & 0x01,
            0xFF51 => io.hdma_src = (io.hdma_src & 0x00FF) | (value as u16) << 8,
            0xFF52 => io.hdma_src = (io.hdma_src & 0xFF00) | (value & 0xF0) as u16,
            0xFF53 => io.hdma_dst = (io.hdma_dst & 0x00FF) | ((value & 0x1F) as u16) << 8,
            0xFF54 => io.hdma_dst = (io.hdma_dst & 0xFF00) | (value & 0xF0) as u16,
            0xFF55 => return self.start_hdma(value),
            0xFF68 => io.bgpi = value & 0xBF,
            0xFF69 => palette_write(&mut io.bgpi, &mut io.bg_palette, value),
            0xFF6A => io.obpi = value & 0xBF,
            0xFF6B => palette_write(&mut io.obpi, &mut io.obj_palette, value),
            0xFF70 => io.svbk = value & 0x07,

            _ => log::trace!("GB MMU: write to unmapped I/O 0x{addr:04X}=0x{value:02X}"),
        }
        Ok(())
    }

    /// LCDC. Switching the PPU off parks LY at 0 and blanks the screen;
    /// switching it on restarts the frame from line 0.
    fn write_lcdc(&mut self, value: u8) {
        let was_on = self.io.lcdc.contains(Lcdc::PPU_ENABLE);
        self.io.lcdc = Lcdc::from_bits_retain(value);
        let is_on = self.io.lcdc.contains(Lcdc::PPU_ENABLE);

        if was_on == is_on {
            return;
        }

        self.io.ly = 0;
        self.clock.dot = 0;
        self.clock.lyc_armed = true;
        if is_on {
            self.clock.mode = PpuMode::OamScan;
            self.video.start_frame();
            log::debug!("GB PPU: LCD on");
        } else {
            self.clock.mode = PpuMode::HBlank;
            self.video.blank();
            log::debug!("GB PPU: LCD off");
        }
    }
}
