use crate::cpu::{Bus, Cpu};
use crate::GbError;

impl Cpu {
    pub(in crate::cpu) fn exec_push(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let value = self.regs.pair_af(self.opcode >> 4);
        self.push16(bus, value)?;
        self.finish(bus, 1, 4)
    }

    /// POP rr. POP AF drops the low nibble of F.
    pub(in crate::cpu) fn exec_pop(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let value = self.pop16(bus);
        self.regs.set_pair_af(self.opcode >> 4, value);
        self.finish(bus, 1, 3)
    }
}
