use super::{Cpu, Registers};

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self::default();
        cpu.reset(false);
        cpu
    }

    /// Put the registers in the state the boot ROM leaves them in when it
    /// jumps to 0x0100.
    ///
    /// Values follow Pan Docs ("Power Up Sequence"); `cgb` selects the
    /// color-mode set, which is how games detect the hardware.
    pub fn reset(&mut self, cgb: bool) {
        let mut regs = Registers {
            sp: 0xFFFE,
            pc: 0x0100,
            ..Registers::default()
        };

        if cgb {
            regs.set_af(0x1180);
            regs.set_bc(0x0000);
            regs.set_de(0xFF56);
            regs.set_hl(0x000D);
        } else {
            regs.set_af(0x01B0);
            regs.set_bc(0x0013);
            regs.set_de(0x00D8);
            regs.set_hl(0x014D);
        }

        self.regs = regs;
        self.ime_pending = false;
        self.opcode = 0;
    }
}
