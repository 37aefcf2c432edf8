use super::cartridge::Cartridge;
use super::clock::Clock;
use super::io::IoRegisters;
use super::serial::Serial;
use super::timer::Timer;
use super::video::PixelPipeline;
use super::{InputSource, MachineConfig, NullPresenter, Presenter};
use fernboy_common::Buttons;

mod access;
mod dma;
mod init;
mod joypad;
mod mmio;
mod timing;
mod traits;

pub(super) const VRAM_BANK_SIZE: usize = 0x2000;
pub(super) const WRAM_BANK_SIZE: usize = 0x1000;
pub(super) const OAM_SIZE: usize = 0xA0;
const HRAM_SIZE: usize = 0x7F;

/// The console's address space and everything clocked alongside the CPU.
pub(crate) struct GameBoyBus {
    pub(super) cgb: bool,
    vram: Vec<u8>,
    wram: Vec<u8>,
    oam: [u8; OAM_SIZE],
    hram: [u8; HRAM_SIZE],
    pub(super) io: IoRegisters,
    pub(super) timer: Timer,
    pub(super) serial: Serial,
    pub(super) clock: Clock,
    pub(super) video: PixelPipeline,
    pub(super) cartridge: Cartridge,
    presenter: Box<dyn Presenter>,
    input: Box<dyn InputSource>,
}

impl GameBoyBus {
    pub(super) fn new(config: &MachineConfig) -> Self {
        let mut bus = Self {
            cgb: false,
            vram: vec![0; 2 * VRAM_BANK_SIZE],
            wram: vec![0; 8 * WRAM_BANK_SIZE],
            oam: [0; OAM_SIZE],
            hram: [0; HRAM_SIZE],
            io: IoRegisters::default(),
            timer: Timer::new(),
            serial: Serial::default(),
            clock: Clock::default(),
            video: PixelPipeline::new(config),
            cartridge: Cartridge::default(),
            presenter: Box::new(NullPresenter),
            input: Box::new(Buttons::empty()),
        };
        bus.reset(false);
        bus
    }

    /// Swap in a freshly parsed cartridge, dropping the previous one.
    pub(super) fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = cartridge;
    }

    pub(super) fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = presenter;
    }

    pub(super) fn set_input(&mut self, input: Box<dyn InputSource>) {
        self.input = input;
    }

    /// VRAM bank selected by VBK.
    fn vram_bank(&self) -> usize {
        if self.cgb {
            (self.io.vbk & 0x01) as usize
        } else {
            0
        }
    }

    /// WRAM bank mapped at 0xD000; SVBK value 0 selects bank 1.
    fn wram_bank(&self) -> usize {
        if self.cgb {
            ((self.io.svbk & 0x07) as usize).max(1)
        } else {
            1
        }
    }

    #[cfg(test)]
    pub(super) fn oam(&self) -> &[u8] {
        &self.oam
    }

    #[cfg(test)]
    pub(super) fn vram(&self) -> &[u8] {
        &self.vram
    }
}
