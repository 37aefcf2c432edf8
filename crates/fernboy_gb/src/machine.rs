use bitflags::bitflags;
use fernboy_common::{Button, Buttons, Color};
use typed_builder::TypedBuilder;

mod bus;
mod cartridge;
mod clock;
mod gameboy;
mod io;
mod serial;
mod timer;
mod video;

pub(crate) use bus::GameBoyBus;
pub use gameboy::GameBoy;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum GameBoyModel {
    #[default]
    Dmg,
    Cgb,
}

bitflags! {
    /// Interrupt request/enable bits shared by IF (FF0F) and IE (FFFF).
    ///
    /// Bit order is also dispatch priority: VBlank first, Joypad last.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Interrupts: u8 {
        const VBLANK = 0x01;
        const STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Machine-level options fixed at construction.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    /// Force a hardware model; `None` follows the cartridge header.
    #[builder(default, setter(strip_option))]
    pub model: Option<GameBoyModel>,
    /// Drop sprites past the tenth on a scanline, as the hardware does.
    #[builder(default = false)]
    pub sprite_limit: bool,
    /// Colors for DMG shades 0-3, lightest first.
    #[builder(default = DMG_SHADES)]
    pub dmg_shades: [Color; 4],
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

const DMG_SHADES: [Color; 4] = [
    Color::gray(255),
    Color::gray(192),
    Color::gray(112),
    Color::gray(12),
];

/// Receives video output as the pixel pipeline produces it.
pub trait Presenter {
    /// One finished scanline of 160 pixels.
    fn present_line(&mut self, _ly: u8, _line: &[Color]) {}

    /// Whole frame, delivered when the PPU enters VBlank.
    fn present_frame(&mut self, _frame: &[Color]) {}
}

/// Presenter used until a frontend installs its own.
pub(crate) struct NullPresenter;

impl Presenter for NullPresenter {}

/// Button state queried when the game reads JOYP.
pub trait InputSource {
    fn button_held(&self, button: Button) -> bool;
}

impl InputSource for Buttons {
    fn button_held(&self, button: Button) -> bool {
        self.held(button)
    }
}
