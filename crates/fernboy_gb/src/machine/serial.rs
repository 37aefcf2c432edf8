/// Serial port reduced to SB/SC plus a capture of every byte sent.
///
/// Link-cable peers are not emulated: a transfer started with the internal
/// clock (SC bits 7 and 0) completes at once, appending SB to `output`.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Serial {
    pub(super) fn init_post_boot(&mut self) {
        self.sb = 0x00;
        self.sc = 0x7E;
    }

    pub(super) fn sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(super) fn write_sc(&mut self, value: u8) {
        self.sc = value;
        if self.sc & 0x81 == 0x81 {
            self.output.push(self.sb);
            self.sc &= !0x80;
        }
    }
}
