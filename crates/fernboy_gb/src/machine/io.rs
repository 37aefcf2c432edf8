use bitflags::bitflags;

use super::Interrupts;

bitflags! {
    /// LCDC (FF40).
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub(super) struct Lcdc: u8 {
        /// DMG: background and window on. CGB: background master priority.
        const BG_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        const OBJ_TALL = 0x04;
        const BG_MAP_HIGH = 0x08;
        /// Tiles addressed from 0x8000 (unsigned) instead of 0x9000 (signed).
        const TILE_DATA_LOW = 0x10;
        const WINDOW_ENABLE = 0x20;
        const WINDOW_MAP_HIGH = 0x40;
        const PPU_ENABLE = 0x80;
    }
}

/// Register file behind 0xFF00-0xFF7F and IE.
///
/// Registers owned by a sub-unit (timer, serial) live in that unit; this
/// holds the PPU, interrupt, CGB and inert sound registers.
pub(super) struct IoRegisters {
    pub(super) joyp_select: u8,
    pub(super) iflag: Interrupts,
    pub(super) ie: u8,
    /// NR10-NR52 and wave RAM (FF10-FF3F), stored without synthesis.
    pub(super) sound: [u8; 0x30],

    pub(super) lcdc: Lcdc,
    /// Writable part of STAT (bits 3-6); mode and coincidence are derived.
    pub(super) stat: u8,
    pub(super) scy: u8,
    pub(super) scx: u8,
    pub(super) ly: u8,
    pub(super) lyc: u8,
    pub(super) dma: u8,
    pub(super) bgp: u8,
    pub(super) obp0: u8,
    pub(super) obp1: u8,
    pub(super) wy: u8,
    pub(super) wx: u8,

    pub(super) key1_armed: bool,
    pub(super) double_speed: bool,
    pub(super) vbk: u8,
    pub(super) svbk: u8,
    pub(super) hdma_src: u16,
    pub(super) hdma_dst: u16,
    pub(super) hdma5: u8,
    pub(super) bgpi: u8,
    pub(super) obpi: u8,
    pub(super) bg_palette: [u8; 64],
    pub(super) obj_palette: [u8; 64],
}

impl Default for IoRegisters {
    fn default() -> Self {
        Self {
            joyp_select: 0x30,
            iflag: Interrupts::empty(),
            ie: 0,
            sound: [0; 0x30],
            lcdc: Lcdc::empty(),
            stat: 0,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            dma: 0xFF,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            key1_armed: false,
            double_speed: false,
            vbk: 0,
            svbk: 1,
            hdma_src: 0,
            hdma_dst: 0,
            hdma5: 0xFF,
            bgpi: 0,
            obpi: 0,
            bg_palette: [0xFF; 64],
            obj_palette: [0xFF; 64],
        }
    }
}

/// Values the boot ROM leaves in the sound registers, FF10 upwards.
const SOUND_POST_BOOT: [(u16, u8); 21] = [
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
];

impl IoRegisters {
    /// Register state at PC=0x0100 after the boot ROM.
    pub(super) fn post_boot() -> Self {
        let mut io = Self {
            lcdc: Lcdc::from_bits_retain(0x91),
            // STAT reads back as 0x85 once mode and LYC=LY are merged in.
            stat: 0x00,
            bgp: 0xFC,
            iflag: Interrupts::VBLANK,
            ..Self::default()
        };
        for (addr, value) in SOUND_POST_BOOT {
            io.sound[(addr - 0xFF10) as usize] = value;
        }
        io
    }

    pub(super) fn key1(&self) -> u8 {
        (u8::from(self.double_speed) << 7) | 0x7E | u8::from(self.key1_armed)
    }
}

/// Read through a BGPD/OBPD data port.
pub(super) fn palette_read(index: u8, ram: &[u8; 64]) -> u8 {
    ram[(index & 0x3F) as usize]
}

/// Write through a BGPD/OBPD data port, bumping the index when bit 7 of
/// the index register asks for auto-increment.
pub(super) fn palette_write(index: &mut u8, ram: &mut [u8; 64], value: u8) {
    ram[(*index & 0x3F) as usize] = value;
    if *index & 0x80 != 0 {
        *index = 0x80 | (index.wrapping_add(1) & 0x3F);
    }
}
