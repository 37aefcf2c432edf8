use fernboy_common::Color;

use super::io::{IoRegisters, Lcdc};
use super::MachineConfig;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

mod sprites;

const VRAM_BANK_SIZE: usize = 0x2000;

/// Memory the pipeline reads while composing a line.
pub(super) struct LineInputs<'a> {
    pub(super) vram: &'a [u8],
    pub(super) oam: &'a [u8],
    pub(super) io: &'a IoRegisters,
    pub(super) cgb: bool,
}

impl LineInputs<'_> {
    fn vram_byte(&self, bank: usize, addr: u16) -> u8 {
        let offset = (addr as usize).wrapping_sub(0x8000) & (VRAM_BANK_SIZE - 1);
        self.vram[bank * VRAM_BANK_SIZE + offset]
    }

    /// The two bit-planes of one 8-pixel tile row.
    fn tile_row(&self, bank: usize, tile_addr: u16, row: u16) -> (u8, u8) {
        let addr = tile_addr.wrapping_add(row * 2);
        (self.vram_byte(bank, addr), self.vram_byte(bank, addr.wrapping_add(1)))
    }

    fn bg_color(&self, shades: &[Color; 4], palette: u8, index: u8) -> Color {
        if self.cgb {
            cgb_color(&self.io.bg_palette, palette, index)
        } else {
            dmg_color(shades, self.io.bgp, index)
        }
    }
}

/// Color index (0-3) of column `col` in a tile row.
#[inline]
fn pixel_index((lo, hi): (u8, u8), col: u8, x_flip: bool) -> u8 {
    let bit = if x_flip { col } else { 7 - col };
    ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1)
}

#[inline]
fn dmg_color(shades: &[Color; 4], palette: u8, index: u8) -> Color {
    shades[((palette >> (index * 2)) & 0x03) as usize]
}

#[inline]
fn cgb_color(ram: &[u8; 64], palette: u8, index: u8) -> Color {
    let offset = ((palette & 0x07) as usize * 4 + index as usize) * 2;
    Color::from_rgb555(u16::from_le_bytes([ram[offset], ram[offset + 1]]))
}

/// Scanline compositor and the framebuffer it fills.
pub(super) struct PixelPipeline {
    framebuffer: Vec<Color>,
    /// Background/window color index per column of the current line.
    bg_index: [u8; SCREEN_WIDTH],
    /// Window row to fetch next; advances only on lines showing the window.
    window_line: u8,
    shades: [Color; 4],
    sprite_limit: bool,
}

impl PixelPipeline {
    pub(super) fn new(config: &MachineConfig) -> Self {
        Self {
            framebuffer: vec![config.dmg_shades[0]; SCREEN_WIDTH * SCREEN_HEIGHT],
            bg_index: [0; SCREEN_WIDTH],
            window_line: 0,
            shades: config.dmg_shades,
            sprite_limit: config.sprite_limit,
        }
    }

    pub(super) fn frame(&self) -> &[Color] {
        &self.framebuffer
    }

    pub(super) fn line(&self, ly: u8) -> &[Color] {
        let start = ly as usize * SCREEN_WIDTH;
        &self.framebuffer[start..start + SCREEN_WIDTH]
    }

    #[cfg(test)]
    pub(super) fn window_line(&self) -> u8 {
        self.window_line
    }

    pub(super) fn start_frame(&mut self) {
        self.window_line = 0;
    }

    /// Fill the whole screen with the blank color, as when the LCD is off.
    pub(super) fn blank(&mut self) {
        self.framebuffer.fill(self.shades[0]);
        self.window_line = 0;
    }

    /// Compose visible line `ly` into the framebuffer.
    pub(super) fn render_line(&mut self, ly: u8, inputs: &LineInputs) {
        let y = ly as usize;
        if y >= SCREEN_HEIGHT {
            return;
        }

        let lcdc = inputs.io.lcdc;
        if !lcdc.contains(Lcdc::PPU_ENABLE) {
            let blank = self.shades[0];
            self.line_mut(ly).fill(blank);
            return;
        }

        // On DMG, LCDC bit 0 blanks background and window together.
        let bg_visible = inputs.cgb || lcdc.contains(Lcdc::BG_ENABLE);
        if bg_visible {
            self.draw_background(ly, inputs);
        } else {
            self.bg_index = [0; SCREEN_WIDTH];
            let white = self.shades[0];
            self.line_mut(ly).fill(white);
        }

        if lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.draw_sprites(ly, inputs);
        }

        if bg_visible {
            self.draw_window(ly, inputs);
        }
    }

    fn line_mut(&mut self, ly: u8) -> &mut [Color] {
        let start = ly as usize * SCREEN_WIDTH;
        &mut self.framebuffer[start..start + SCREEN_WIDTH]
    }

    /// Color index and CGB attributes of the map pixel at (`mx`, `my`).
    fn map_pixel(&self, inputs: &LineInputs, map_base: u16, mx: u8, my: u8) -> (u8, u8) {
        let map_addr = map_base + (my as u16 / 8) * 32 + mx as u16 / 8;
        let tile = inputs.vram_byte(0, map_addr);
        let attrs = if inputs.cgb { inputs.vram_byte(1, map_addr) } else { 0 };

        let tile_addr = if inputs.io.lcdc.contains(Lcdc::TILE_DATA_LOW) {
            0x8000 + tile as u16 * 16
        } else {
            0x9000u16.wrapping_add_signed(tile as i8 as i16 * 16)
        };

        let mut row = (my % 8) as u16;
        if attrs & 0x40 != 0 {
            row = 7 - row;
        }
        let bank = usize::from(attrs & 0x08 != 0);
        let planes = inputs.tile_row(bank, tile_addr, row);
        (pixel_index(planes, mx % 8, attrs & 0x20 != 0), attrs)
    }

    fn draw_background(&mut self, ly: u8, inputs: &LineInputs) {
        let io = inputs.io;
        let map_base = if io.lcdc.contains(Lcdc::BG_MAP_HIGH) { 0x9C00 } else { 0x9800 };
        let my = ly.wrapping_add(io.scy);

        for x in 0..SCREEN_WIDTH {
            let mx = (x as u8).wrapping_add(io.scx);
            let (index, attrs) = self.map_pixel(inputs, map_base, mx, my);
            self.bg_index[x] = index;
            let color = inputs.bg_color(&self.shades, attrs, index);
            self.line_mut(ly)[x] = color;
        }
    }

    fn draw_window(&mut self, ly: u8, inputs: &LineInputs) {
        let io = inputs.io;
        if !io.lcdc.contains(Lcdc::WINDOW_ENABLE) || ly < io.wy || io.wx > 166 {
            return;
        }

        let map_base = if io.lcdc.contains(Lcdc::WINDOW_MAP_HIGH) { 0x9C00 } else { 0x9800 };
        let left = io.wx as i16 - 7;
        let my = self.window_line;

        for x in left.max(0)..SCREEN_WIDTH as i16 {
            let mx = (x - left) as u8;
            let (index, attrs) = self.map_pixel(inputs, map_base, mx, my);
            let color = inputs.bg_color(&self.shades, attrs, index);
            self.line_mut(ly)[x as usize] = color;
        }
        self.window_line = self.window_line.wrapping_add(1);
    }
}
