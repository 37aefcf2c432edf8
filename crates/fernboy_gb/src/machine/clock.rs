use std::collections::VecDeque;

/// Dots in one scanline (mode 2 + 3 + 0).
pub(super) const DOTS_PER_LINE: u32 = 456;
/// End of OAM scan within a line.
pub(super) const OAM_SCAN_END: u32 = 80;
/// End of pixel transfer within a line.
pub(super) const DRAW_END: u32 = 252;
/// Lines per frame including VBlank.
pub(super) const LINES_PER_FRAME: u8 = 154;
/// First VBlank line.
pub(super) const VBLANK_LINE: u8 = 144;

/// PPU mode as reported in STAT bits 0-1.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(super) enum PpuMode {
    #[default]
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Draw = 3,
}

impl PpuMode {
    /// Mode for a position inside the frame.
    pub(super) fn at(ly: u8, dot: u32) -> Self {
        if ly >= VBLANK_LINE {
            PpuMode::VBlank
        } else if dot < OAM_SCAN_END {
            PpuMode::OamScan
        } else if dot < DRAW_END {
            PpuMode::Draw
        } else {
            PpuMode::HBlank
        }
    }

    /// STAT bit that enables an interrupt on entering this mode.
    pub(super) fn stat_source(self) -> Option<u8> {
        match self {
            PpuMode::HBlank => Some(0x08),
            PpuMode::VBlank => Some(0x10),
            PpuMode::OamScan => Some(0x20),
            PpuMode::Draw => None,
        }
    }
}

/// Scheduler bookkeeping.
///
/// Cycle requests go through `pending` so that work queued while a tick is
/// in progress (interrupt dispatch, DMA) runs after the current request,
/// in arrival order, from one loop.
#[derive(Default)]
pub(super) struct Clock {
    pub(super) dot: u32,
    pub(super) mode: PpuMode,
    /// Armed at each new line; disarmed once the LYC interrupt fires.
    pub(super) lyc_armed: bool,
    pub(super) pending: VecDeque<u32>,
    pub(super) ticking: bool,
    pub(super) frame_ready: bool,
    /// Machine cycles processed since power-on.
    pub(super) total_cycles: u64,
}

impl Clock {
    pub(super) fn reset(&mut self) {
        *self = Self {
            lyc_armed: true,
            ..Self::default()
        };
    }
}
