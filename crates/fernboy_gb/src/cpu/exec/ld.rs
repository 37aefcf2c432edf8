use crate::cpu::{Bus, Cpu, Operand8};
use crate::GbError;

impl Cpu {
    /// LD r,r' over rows 0x4_-0x7_. The destination is encoded by the row
    /// and the mode bit: row 4 mode 0 is B, row 4 mode 1 is C, and so on.
    pub(in crate::cpu) fn family_ld(
        &mut self,
        bus: &mut dyn Bus,
        src: Operand8,
        mode: bool,
    ) -> Result<(), GbError> {
        let row = (self.opcode >> 4) - 4;
        let dst = Operand8::decode(row * 2 + u8::from(mode));
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value)?;

        let cycles = if src.is_memory() || dst.is_memory() { 2 } else { 1 };
        self.finish(bus, 1, cycles)
    }

    pub(in crate::cpu) fn exec_ld_rr_d16(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let value = self.read_pc16(bus, 1);
        self.regs.set_pair_sp(self.opcode >> 4, value);
        self.finish(bus, 3, 3)
    }

    pub(in crate::cpu) fn exec_ld_r_d8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let dst = Operand8::decode(self.opcode >> 3);
        let value = self.read_pc(bus, 1);
        self.write_operand(bus, dst, value)?;
        self.finish(bus, 2, if dst.is_memory() { 3 } else { 2 })
    }

    /// Address for the (BC)/(DE)/(HL+)/(HL-) forms, applying the HL
    /// post-increment or post-decrement.
    fn indirect_address(&mut self) -> u16 {
        match (self.opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(in crate::cpu) fn exec_ld_indirect_a(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let addr = self.indirect_address();
        bus.write8(addr, self.regs.a)?;
        self.finish(bus, 1, 2)
    }

    pub(in crate::cpu) fn exec_ld_a_indirect(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let addr = self.indirect_address();
        self.regs.a = bus.read8(addr);
        self.finish(bus, 1, 2)
    }

    pub(in crate::cpu) fn exec_ld_a16_sp(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let addr = self.read_pc16(bus, 1);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo)?;
        bus.write8(addr.wrapping_add(1), hi)?;
        self.finish(bus, 3, 5)
    }

    /// LDH (a8),A and LDH A,(a8).
    pub(in crate::cpu) fn exec_ldh_a8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let addr = 0xFF00 | self.read_pc(bus, 1) as u16;
        if self.opcode == 0xE0 {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr);
        }
        self.finish(bus, 2, 3)
    }

    /// LD (C),A and LD A,(C).
    pub(in crate::cpu) fn exec_ldh_c(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let addr = 0xFF00 | self.regs.c as u16;
        if self.opcode == 0xE2 {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr);
        }
        self.finish(bus, 1, 2)
    }

    /// LD (a16),A and LD A,(a16).
    pub(in crate::cpu) fn exec_ld_a16_a(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let addr = self.read_pc16(bus, 1);
        if self.opcode == 0xEA {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr);
        }
        self.finish(bus, 3, 4)
    }

    pub(in crate::cpu) fn exec_ld_hl_sp_r8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let offset = self.read_pc(bus, 1);
        let value = self.alu_sp_offset(offset);
        self.regs.set_hl(value);
        self.finish(bus, 2, 3)
    }

    pub(in crate::cpu) fn exec_ld_sp_hl(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.regs.sp = self.regs.hl();
        self.finish(bus, 1, 2)
    }
}
