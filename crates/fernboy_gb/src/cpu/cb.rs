use super::{Bus, Cpu, Flag, Operand8};
use crate::GbError;

impl Cpu {
    /// 0xCB prefix: decode the following byte as x/y/z fields.
    ///
    /// x=0 rotate/shift/swap (kind y), x=1 BIT y, x=2 RES y, x=3 SET y, each
    /// over operand z. Two bytes long; 2 cycles on registers, 4 on (HL)
    /// except BIT (HL) which only reads and takes 3.
    pub(super) fn exec_cb_prefix(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let cb = self.read_pc(bus, 1);
        let operand = Operand8::decode(cb);
        let y = (cb >> 3) & 0x07;
        let value = self.read_operand(bus, operand);

        let cycles = match cb >> 6 {
            0 => {
                let result = self.alu_shift(y, value);
                self.write_operand(bus, operand, result)?;
                if operand.is_memory() { 4 } else { 2 }
            }
            1 => {
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                if operand.is_memory() { 3 } else { 2 }
            }
            2 => {
                self.write_operand(bus, operand, value & !(1 << y))?;
                if operand.is_memory() { 4 } else { 2 }
            }
            _ => {
                self.write_operand(bus, operand, value | (1 << y))?;
                if operand.is_memory() { 4 } else { 2 }
            }
        };

        self.finish(bus, 2, cycles)
    }
}
