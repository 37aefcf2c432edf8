use fernboy_common::Button;

use super::GameBoyBus;

impl GameBoyBus {
    /// JOYP: bits 5/4 select buttons/d-pad (0 = selected), a held button
    /// reads as 0 in the low nibble, bits 7-6 read as 1.
    pub(super) fn read_joyp(&self) -> u8 {
        let select = self.io.joyp_select & 0x30;
        let mut low = 0x0F;

        for button in Button::ALL {
            let group_selected = if button.is_direction() {
                select & 0x10 == 0
            } else {
                select & 0x20 == 0
            };
            if group_selected && self.input.button_held(button) {
                low &= !(1 << button.joyp_bit());
            }
        }

        0xC0 | select | low
    }

    pub(super) fn write_joyp(&mut self, value: u8) {
        self.io.joyp_select = value & 0x30;
    }
}
