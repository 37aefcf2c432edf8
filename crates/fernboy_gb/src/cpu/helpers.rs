use super::{Bus, Cpu, Flag, Operand8};
use crate::GbError;

impl Cpu {
    /// Operand byte at PC + `offset`; PC itself is not moved.
    #[inline]
    pub(super) fn read_pc(&self, bus: &mut dyn Bus, offset: u16) -> u8 {
        bus.read8(self.regs.pc.wrapping_add(offset))
    }

    #[inline]
    pub(super) fn read_pc16(&self, bus: &mut dyn Bus, offset: u16) -> u16 {
        let lo = self.read_pc(bus, offset);
        let hi = self.read_pc(bus, offset.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn read_operand(&self, bus: &mut dyn Bus, operand: Operand8) -> u8 {
        match operand {
            Operand8::Reg(reg) => self.regs.get(reg),
            Operand8::HlIndirect => bus.read8(self.regs.hl()),
        }
    }

    #[inline]
    pub(super) fn write_operand(
        &mut self,
        bus: &mut dyn Bus,
        operand: Operand8,
        value: u8,
    ) -> Result<(), GbError> {
        match operand {
            Operand8::Reg(reg) => {
                self.regs.set(reg, value);
                Ok(())
            }
            Operand8::HlIndirect => bus.write8(self.regs.hl(), value),
        }
    }

    pub(super) fn push16(&mut self, bus: &mut dyn Bus, value: u16) -> Result<(), GbError> {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo)
    }

    pub(super) fn pop16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Step PC over an instruction of `len` bytes and charge its cycles.
    ///
    /// PC must be final before the tick: an interrupt dispatched inside the
    /// scheduler pushes whatever PC holds at that point.
    #[inline]
    pub(super) fn finish(
        &mut self,
        bus: &mut dyn Bus,
        len: u16,
        cycles: u32,
    ) -> Result<(), GbError> {
        self.regs.pc = self.regs.pc.wrapping_add(len);
        bus.tick(&mut self.regs, cycles)
    }

    /// Transfer control to `target` and charge `cycles`.
    #[inline]
    pub(super) fn jump(
        &mut self,
        bus: &mut dyn Bus,
        target: u16,
        cycles: u32,
    ) -> Result<(), GbError> {
        self.regs.pc = target;
        bus.tick(&mut self.regs, cycles)
    }

    /// Condition code in bits 3-4: NZ, Z, NC, C.
    #[inline]
    pub(super) fn condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }
}
