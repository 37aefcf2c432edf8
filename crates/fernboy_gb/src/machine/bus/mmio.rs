mod read;
mod write;

/// Registers that only exist on color hardware.
///
/// In DMG mode they read as 0xFF and writes are ignored with a warning.
fn is_cgb_only(addr: u16) -> bool {
    matches!(addr, 0xFF4D | 0xFF4F | 0xFF51..=0xFF55 | 0xFF68..=0xFF6B | 0xFF70)
}
