use super::{GameBoyBus, OAM_SIZE, VRAM_BANK_SIZE};
use crate::GbError;

const HDMA_BLOCK: u16 = 0x10;

impl GameBoyBus {
    /// OAM DMA: copy 160 bytes from `value << 8` into OAM.
    ///
    /// The copy happens at once; its bus time is queued on the scheduler,
    /// one cycle per byte, or per two bytes at double speed.
    pub(super) fn oam_dma(&mut self, value: u8) {
        self.io.dma = value;
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE {
            self.oam[i] = self.read8_mmio(base.wrapping_add(i as u16));
        }

        let slots = if self.io.double_speed { OAM_SIZE / 2 } else { OAM_SIZE };
        self.clock.pending.extend(std::iter::repeat(1).take(slots));
        log::trace!("GB MMU: OAM DMA from 0x{base:04X}");
    }

    /// HDMA5 write. Bit 7 clear runs a general-purpose transfer of
    /// `(value & 0x7F) + 1` blocks of 16 bytes into the selected VRAM bank.
    pub(super) fn start_hdma(&mut self, value: u8) -> Result<(), GbError> {
        if value & 0x80 != 0 {
            log::error!("GB MMU: HBlank HDMA requested (HDMA5=0x{value:02X})");
            return Err(GbError::Unsupported("HBlank-mode HDMA"));
        }

        let blocks = (value & 0x7F) as u16 + 1;
        let bank_base = self.vram_bank() * VRAM_BANK_SIZE;
        let cost = if self.io.double_speed { 16 } else { 8 };
        log::trace!(
            "GB MMU: GDMA {blocks} blocks 0x{:04X} -> 0x{:04X}",
            self.io.hdma_src,
            0x8000 | self.io.hdma_dst
        );

        for _ in 0..blocks {
            for i in 0..HDMA_BLOCK {
                let byte = self.read8_mmio(self.io.hdma_src.wrapping_add(i));
                let dst = (self.io.hdma_dst.wrapping_add(i) & 0x1FFF) as usize;
                self.vram[bank_base + dst] = byte;
            }
            self.io.hdma_src = self.io.hdma_src.wrapping_add(HDMA_BLOCK);
            self.io.hdma_dst = self.io.hdma_dst.wrapping_add(HDMA_BLOCK) & 0x1FF0;
            self.clock.pending.push_back(cost);
        }

        self.io.hdma5 = 0xFF;
        Ok(())
    }
}
