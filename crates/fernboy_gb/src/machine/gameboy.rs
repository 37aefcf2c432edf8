use fernboy_common::Color;

use super::cartridge::{Cartridge, CartridgeHeader};
use super::{GameBoyBus, GameBoyModel, InputSource, MachineConfig, Presenter};
use crate::cpu::Cpu;
use crate::GbError;

/// Machine cycles in one frame (154 lines of 456 dots, 4 dots per cycle).
const CYCLES_PER_FRAME: u64 = 17_556;

/// High-level Game Boy machine: the CPU core plus its bus.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: MachineConfig,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(&config),
            config,
        }
    }

    /// Insert a cartridge image and reset to the post-boot state.
    ///
    /// The header decides the mapper and, unless the config forces a
    /// model, whether the machine runs in color mode.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), GbError> {
        let header = CartridgeHeader::parse(rom)?;
        let cgb = match self.config.model {
            Some(model) => model == GameBoyModel::Cgb,
            None => header.cgb,
        };

        self.bus.reset(cgb);
        self.bus.insert_cartridge(Cartridge::new(rom, &header));
        self.cpu.reset(cgb);

        log::info!(
            "GB MBC: loaded \"{}\" ({:?}, {} ROM banks, {} RAM banks{}) in {} mode",
            header.title,
            header.mapper,
            header.rom_banks,
            header.ram_banks,
            if header.battery { ", battery" } else { "" },
            if cgb { "CGB" } else { "DMG" },
        );
        Ok(())
    }

    pub fn model(&self) -> GameBoyModel {
        if self.bus.cgb {
            GameBoyModel::Cgb
        } else {
            GameBoyModel::Dmg
        }
    }

    /// Execute one instruction, or one idle cycle while halted.
    pub fn step(&mut self) -> Result<(), GbError> {
        self.cpu.step(&mut self.bus)
    }

    /// Run until the PPU enters VBlank.
    ///
    /// With the LCD off no VBlank comes, so this also returns after one
    /// frame's worth of cycles.
    pub fn step_frame(&mut self) -> Result<(), GbError> {
        self.bus.clock.frame_ready = false;
        let start = self.bus.clock.total_cycles;
        while !self.bus.clock.frame_ready
            && self.bus.clock.total_cycles - start < CYCLES_PER_FRAME
        {
            self.step()?;
        }
        Ok(())
    }

    /// The 160x144 framebuffer, row-major.
    pub fn framebuffer(&self) -> &[Color] {
        self.bus.video.frame()
    }

    /// Copy the framebuffer into `buffer` as packed RGB24.
    pub fn video_frame(&self, buffer: &mut [u8]) {
        for (dst, color) in buffer.chunks_exact_mut(3).zip(self.framebuffer()) {
            let (r, g, b) = color.rgb();
            dst.copy_from_slice(&[r, g, b]);
        }
    }

    /// Battery-backed cartridge RAM, or an empty vector when the cart has
    /// no battery.
    pub fn sram_serialize(&self) -> Vec<u8> {
        self.bus.cartridge.sram_serialize()
    }

    pub fn load_sram(&mut self, data: &[u8]) {
        self.bus.cartridge.load_sram(data);
    }

    /// Bytes the game has sent over the serial port since the last load.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.bus.set_presenter(presenter);
    }

    pub fn set_input(&mut self, input: Box<dyn InputSource>) {
        self.bus.set_input(input);
    }

    /// Machine cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.bus.clock.total_cycles
    }
}
