use super::{Cpu, Flag};

impl Cpu {
    /// ADD/ADC into A. `with_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, with_carry: bool) {
        let a = self.regs.a;
        let carry = u8::from(with_carry && self.get_flag(Flag::C));
        let wide = a as u16 + value as u16 + carry as u16;
        let result = wide as u8;
        let half = (a & 0x0F) + (value & 0x0F) + carry > 0x0F;

        self.regs.a = result;
        self.set_flags(result == 0, false, half, wide > 0xFF);
    }

    /// SUB/SBC from A. `with_carry` selects SBC.
    pub(super) fn alu_sub(&mut self, value: u8, with_carry: bool) {
        let result = self.alu_sub_flags(value, with_carry);
        self.regs.a = result;
    }

    /// Flags as for `A - value` without storing the difference.
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.alu_sub_flags(value, false);
    }

    fn alu_sub_flags(&mut self, value: u8, with_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry = u8::from(with_carry && self.get_flag(Flag::C));
        let result = a.wrapping_sub(value).wrapping_sub(carry);
        let half = (a & 0x0F) < (value & 0x0F) + carry;
        let borrow = (a as u16) < value as u16 + carry as u16;

        self.set_flags(result == 0, true, half, borrow);
        result
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_flags(self.regs.a == 0, false, true, false);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    /// BCD correction of A after an add or subtract.
    ///
    /// N is left untouched; H is cleared; C is set whenever the 0x60 term
    /// contributed to the correction.
    pub(super) fn alu_daa(&mut self) {
        let a = self.regs.a;
        let subtract = self.get_flag(Flag::N);
        let mut correction = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };

        if self.get_flag(Flag::H) || (!subtract && (a & 0x0F) > 0x09) {
            correction |= 0x06;
        }
        if self.get_flag(Flag::C) || (!subtract && a > 0x99) {
            correction |= 0x60;
        }

        let result = if subtract {
            a.wrapping_sub(correction)
        } else {
            a.wrapping_add(correction)
        };

        self.regs.a = result;
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, ((correction as u16) << 2) & 0x100 != 0);
    }

    /// INC for 8-bit operands. C is preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, value & 0x0F == 0x0F);
        result
    }

    /// DEC for 8-bit operands. C is preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, value & 0x0F == 0x00);
        result
    }

    /// ADD HL,rr. Z is preserved.
    pub(super) fn alu_add_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// SP plus a signed immediate, as used by `ADD SP,r8` and `LD HL,SP+r8`.
    ///
    /// H and C come from the unsigned low-byte addition; Z and N are cleared.
    pub(super) fn alu_sp_offset(&mut self, offset: u8) -> u16 {
        let sp = self.regs.sp;
        let low = (sp & 0x00FF) as u8;
        let half = (low & 0x0F) + (offset & 0x0F) > 0x0F;
        let carry = low.checked_add(offset).is_none();
        self.set_flags(false, false, half, carry);
        sp.wrapping_add(offset as i8 as u16)
    }

    /// Shared body of the CB rotate/shift group. `kind` is bits 3-5 of the
    /// CB opcode; Z reflects the result.
    pub(super) fn alu_shift(&mut self, kind: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match kind & 0x07 {
            // RLC
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            // RR
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            // SLA
            4 => (value << 1, value & 0x80 != 0),
            // SRA
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            // SWAP
            6 => (value.rotate_left(4), false),
            // SRL
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.set_flags(result == 0, false, false, carry_out);
        result
    }
}
