use super::super::clock::PpuMode;
use super::super::io::Lcdc;
use super::GameBoyBus;

impl GameBoyBus {
    fn ppu_enabled(&self) -> bool {
        self.io.lcdc.contains(Lcdc::PPU_ENABLE)
    }

    /// VRAM belongs to the PPU during pixel transfer (mode 3).
    pub(super) fn vram_accessible(&self) -> bool {
        !self.ppu_enabled() || self.clock.mode != PpuMode::Draw
    }

    /// OAM is only open to the CPU in HBlank and VBlank.
    pub(super) fn oam_accessible(&self) -> bool {
        !self.ppu_enabled() || matches!(self.clock.mode, PpuMode::HBlank | PpuMode::VBlank)
    }
}
