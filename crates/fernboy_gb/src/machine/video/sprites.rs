use super::{cgb_color, dmg_color, pixel_index, LineInputs, PixelPipeline};
use crate::machine::io::Lcdc;
use crate::SCREEN_WIDTH;

const OAM_ENTRIES: usize = 40;
const SPRITES_PER_LINE: usize = 10;

const ATTR_CGB_PALETTE: u8 = 0x07;
const ATTR_CGB_BANK: u8 = 0x08;
const ATTR_DMG_PALETTE: u8 = 0x10;
const ATTR_X_FLIP: u8 = 0x20;
const ATTR_Y_FLIP: u8 = 0x40;
const ATTR_BEHIND_BG: u8 = 0x80;

impl PixelPipeline {
    /// Overlay sprites in OAM order; the first sprite to claim a column
    /// keeps it.
    pub(super) fn draw_sprites(&mut self, ly: u8, inputs: &LineInputs) {
        let io = inputs.io;
        let height: i16 = if io.lcdc.contains(Lcdc::OBJ_TALL) { 16 } else { 8 };
        // CGB with LCDC bit 0 clear puts every sprite above the background.
        let bg_can_win = !inputs.cgb || io.lcdc.contains(Lcdc::BG_ENABLE);
        let line = ly as i16;

        let mut claimed = [false; SCREEN_WIDTH];
        let mut on_line = 0;

        for entry in inputs.oam.chunks_exact(4).take(OAM_ENTRIES) {
            let top = entry[0] as i16 - 16;
            let left = entry[1] as i16 - 8;
            let attrs = entry[3];

            if line < top || line >= top + height {
                continue;
            }
            if self.sprite_limit {
                if on_line == SPRITES_PER_LINE {
                    break;
                }
                on_line += 1;
            }
            if left <= -8 || left >= SCREEN_WIDTH as i16 {
                continue;
            }

            let mut row = line - top;
            if attrs & ATTR_Y_FLIP != 0 {
                row = height - 1 - row;
            }
            let tile = if height == 16 { entry[2] & 0xFE } else { entry[2] };
            let bank = usize::from(inputs.cgb && attrs & ATTR_CGB_BANK != 0);
            let planes = inputs.tile_row(bank, 0x8000 + tile as u16 * 16, row as u16);

            for col in 0..8u8 {
                let x = left + col as i16;
                if !(0..SCREEN_WIDTH as i16).contains(&x) {
                    continue;
                }
                let x = x as usize;
                if claimed[x] {
                    continue;
                }

                let index = pixel_index(planes, col, attrs & ATTR_X_FLIP != 0);
                if index == 0 {
                    continue;
                }
                claimed[x] = true;

                if bg_can_win && attrs & ATTR_BEHIND_BG != 0 && self.bg_index[x] != 0 {
                    continue;
                }

                let color = if inputs.cgb {
                    cgb_color(&io.obj_palette, attrs & ATTR_CGB_PALETTE, index)
                } else {
                    let palette = if attrs & ATTR_DMG_PALETTE != 0 { io.obp1 } else { io.obp0 };
                    dmg_color(&self.shades, palette, index)
                };
                self.line_mut(ly)[x] = color;
            }
        }
    }
}
