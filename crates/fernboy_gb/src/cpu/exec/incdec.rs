use crate::cpu::{Bus, Cpu, Operand8};
use crate::GbError;

impl Cpu {
    pub(in crate::cpu) fn exec_inc8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let operand = Operand8::decode(self.opcode >> 3);
        let value = self.read_operand(bus, operand);
        let result = self.alu_inc8(value);
        self.write_operand(bus, operand, result)?;
        self.finish(bus, 1, if operand.is_memory() { 3 } else { 1 })
    }

    pub(in crate::cpu) fn exec_dec8(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let operand = Operand8::decode(self.opcode >> 3);
        let value = self.read_operand(bus, operand);
        let result = self.alu_dec8(value);
        self.write_operand(bus, operand, result)?;
        self.finish(bus, 1, if operand.is_memory() { 3 } else { 1 })
    }

    pub(in crate::cpu) fn exec_inc16(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let index = self.opcode >> 4;
        let value = self.regs.pair_sp(index).wrapping_add(1);
        self.regs.set_pair_sp(index, value);
        self.finish(bus, 1, 2)
    }

    pub(in crate::cpu) fn exec_dec16(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let index = self.opcode >> 4;
        let value = self.regs.pair_sp(index).wrapping_sub(1);
        self.regs.set_pair_sp(index, value);
        self.finish(bus, 1, 2)
    }
}
