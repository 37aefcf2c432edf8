use thiserror::Error;

/// Fatal conditions that end an emulation session.
///
/// Recoverable oddities (gated VRAM/OAM writes, CGB-only registers poked in
/// DMG mode) are logged and ignored instead of surfacing here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GbError {
    #[error("unsupported cartridge mapper type {0:#04X} in header byte 0x0147")]
    UnsupportedMapper(u8),

    #[error("unknown ROM size code {0:#04X} in header byte 0x0148")]
    UnknownRomSize(u8),

    #[error("unknown RAM size code {0:#04X} in header byte 0x0149")]
    UnknownRamSize(u8),

    #[error("ROM image is {actual} bytes but the header declares {expected}")]
    RomTooSmall { expected: usize, actual: usize },

    #[error("invalid opcode {opcode:#04X} at PC={pc:#06X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    #[error("unimplemented opcode {opcode:#04X} at PC={pc:#06X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },

    #[error("unsupported ROM behaviour: {0}")]
    Unsupported(&'static str),
}
