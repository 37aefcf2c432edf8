use crate::cpu::{Bus, Cpu};
use crate::GbError;

impl Cpu {
    /// Target of a JR: signed displacement from the following instruction.
    #[inline]
    fn relative_target(&self, bus: &mut dyn Bus) -> u16 {
        let offset = self.read_pc(bus, 1) as i8;
        self.regs.pc.wrapping_add(2).wrapping_add(offset as u16)
    }

    pub(in crate::cpu) fn exec_jr(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let target = self.relative_target(bus);
        self.jump(bus, target, 3)
    }

    pub(in crate::cpu) fn exec_jr_cc(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        if self.condition(self.opcode) {
            let target = self.relative_target(bus);
            self.jump(bus, target, 3)
        } else {
            self.finish(bus, 2, 2)
        }
    }

    pub(in crate::cpu) fn exec_jp_a16(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let target = self.read_pc16(bus, 1);
        self.jump(bus, target, 4)
    }

    pub(in crate::cpu) fn exec_jp_cc(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        if self.condition(self.opcode) {
            let target = self.read_pc16(bus, 1);
            self.jump(bus, target, 4)
        } else {
            self.finish(bus, 3, 3)
        }
    }

    pub(in crate::cpu) fn exec_jp_hl(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let target = self.regs.hl();
        self.jump(bus, target, 1)
    }

    pub(in crate::cpu) fn exec_call_a16(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let target = self.read_pc16(bus, 1);
        self.push16(bus, self.regs.pc.wrapping_add(3))?;
        self.jump(bus, target, 6)
    }

    pub(in crate::cpu) fn exec_call_cc(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        if self.condition(self.opcode) {
            self.exec_call_a16(bus)
        } else {
            self.finish(bus, 3, 3)
        }
    }

    pub(in crate::cpu) fn exec_ret(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let target = self.pop16(bus);
        self.jump(bus, target, 4)
    }

    pub(in crate::cpu) fn exec_ret_cc(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        if self.condition(self.opcode) {
            let target = self.pop16(bus);
            self.jump(bus, target, 5)
        } else {
            self.finish(bus, 1, 2)
        }
    }

    pub(in crate::cpu) fn exec_reti(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let target = self.pop16(bus);
        self.regs.ime = true;
        self.jump(bus, target, 4)
    }

    pub(in crate::cpu) fn exec_rst(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.push16(bus, self.regs.pc.wrapping_add(1))?;
        let target = (self.opcode & 0x38) as u16;
        self.jump(bus, target, 4)
    }
}
