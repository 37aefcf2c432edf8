use super::super::clock::PpuMode;
use super::super::io::IoRegisters;
use super::GameBoyBus;

impl GameBoyBus {
    /// Put every register and memory region in its post-boot state.
    ///
    /// Called at power-on and on each ROM load. The cartridge, presenter
    /// and input source are left alone.
    pub(in super::super) fn reset(&mut self, cgb: bool) {
        self.cgb = cgb;
        self.io = IoRegisters::post_boot();
        self.timer.init_post_boot();
        self.serial.init_post_boot();
        self.serial.output.clear();

        // The boot ROM hands over in VBlank; LY restarts from 0.
        self.clock.reset();
        self.clock.mode = PpuMode::VBlank;
        self.video.blank();

        self.vram.fill(0);
        self.oam.fill(0);
        self.randomize_internal_ram();
    }

    /// Fill WRAM and HRAM from a fixed xorshift sequence, since power-on
    /// contents are undefined on hardware.
    fn randomize_internal_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };

        for byte in self.wram.iter_mut().chain(self.hram.iter_mut()) {
            *byte = next_byte();
        }
    }
}
