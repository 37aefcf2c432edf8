use crate::cpu::{Bus, Cpu, RunState};
use crate::GbError;

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.finish(bus, 1, 1)
    }

    /// HALT parks the CPU; `step` keeps the scheduler running until an
    /// enabled interrupt is requested.
    pub(in crate::cpu) fn exec_halt(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.regs.state = RunState::Halted;
        self.finish(bus, 1, 1)
    }

    /// STOP only covers the CGB speed switch. The low-power mode proper
    /// needs joypad wake-up, which is not modelled.
    pub(in crate::cpu) fn exec_stop(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        if bus.speed_switch() {
            return self.finish(bus, 2, 1);
        }

        let pc = self.regs.pc;
        log::error!("GB CPU: STOP low-power mode at PC=0x{pc:04X} is not supported");
        Err(GbError::UnimplementedOpcode { opcode: self.opcode, pc })
    }

    pub(in crate::cpu) fn exec_di(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.regs.ime = false;
        self.ime_pending = false;
        self.finish(bus, 1, 1)
    }

    pub(in crate::cpu) fn exec_ei(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        self.ime_pending = true;
        self.finish(bus, 1, 1)
    }

    pub(in crate::cpu) fn exec_invalid(&mut self, _bus: &mut dyn Bus) -> Result<(), GbError> {
        let regs = &self.regs;
        log::error!(
            "GB CPU: invalid opcode 0x{:02X} at PC=0x{:04X} \
             (SP=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X})",
            self.opcode,
            regs.pc,
            regs.sp,
            regs.af(),
            regs.bc(),
            regs.de(),
            regs.hl(),
        );
        Err(GbError::InvalidOpcode {
            opcode: self.opcode,
            pc: regs.pc,
        })
    }
}
