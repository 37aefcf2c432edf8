pub mod cpu;
mod error;
pub mod machine;

pub use error::GbError;
pub use machine::{GameBoy, GameBoyModel, InputSource, MachineConfig, Presenter};

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
