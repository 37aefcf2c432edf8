use crate::cpu::{Bus, Cpu, Flag, Operand8};
use crate::GbError;

impl Cpu {
    #[inline]
    fn operand_cycles(operand: Operand8) -> u32 {
        if operand.is_memory() {
            2
        } else {
            1
        }
    }

    pub(in crate::cpu) fn family_add_adc(
        &mut self,
        bus: &mut dyn Bus,
        src: Operand8,
        with_carry: bool,
    ) -> Result<(), GbError> {
        let value = self.read_operand(bus, src);
        self.alu_add(value, with_carry);
        self.finish(bus, 1, Self::operand_cycles(src))
    }

    pub(in crate::cpu) fn family_sub_sbc(
        &mut self,
        bus: &mut dyn Bus,
        src: Operand8,
        with_carry: bool,
    ) -> Result<(), GbError> {
        let value = self.read_operand(bus, src);
        self.alu_sub(value, with_carry);
        self.finish(bus, 1, Self::operand_cycles(src))
    }

    pub(in crate::cpu) fn family_and_xor(
        &mut self,
        bus: &mut dyn Bus,
        src: Operand8,
        xor: bool,
    ) -> Result<(), GbError> {
        let value = self.read_operand(bus, src);
        if xor {
            self.alu_xor(value);
        } else {
            self.alu_and(value);
        }
        self.finish(bus, 1, Self::operand_cycles(src))
    }

    pub(in crate::cpu) fn family_or_cp(
        &mut self,
        bus: &mut dyn Bus,
        src: Operand8,
        cp: bool,
    ) -> Result<(), GbError> {
        let value = self.read_operand(bus, src);
        if cp {
            self.alu_cp(value);
        } else {
            self.alu_or(value);
        }
        self.finish(bus, 1, Self::operand_cycles(src))
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP with an immediate byte.
    pub(in crate::cpu) fn exec_alu_d8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let value = self.read_pc(bus, 1);
        match (self.opcode >> 3) & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
        self.finish(bus, 2, 2)
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotates on A, except Z is always cleared.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let kind = (self.opcode >> 3) & 0x03;
        self.regs.a = self.alu_shift(kind, self.regs.a);
        self.set_flag(Flag::Z, false);
        self.finish(bus, 1, 1)
    }

    pub(in crate::cpu) fn exec_add_hl_rr(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let value = self.regs.pair_sp(self.opcode >> 4);
        self.alu_add_hl(value);
        self.finish(bus, 1, 2)
    }

    pub(in crate::cpu) fn exec_add_sp_r8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let offset = self.read_pc(bus, 1);
        self.regs.sp = self.alu_sp_offset(offset);
        self.finish(bus, 2, 4)
    }

    pub(in crate::cpu) fn exec_daa(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.alu_daa();
        self.finish(bus, 1, 1)
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        self.finish(bus, 1, 1)
    }

    pub(in crate::cpu) fn exec_scf(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        self.finish(bus, 1, 1)
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        self.finish(bus, 1, 1)
    }
}
