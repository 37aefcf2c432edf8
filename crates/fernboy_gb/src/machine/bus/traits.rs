use crate::cpu::{Bus, Registers};
use crate::GbError;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), GbError> {
        self.write8_mmio(addr, value)
    }

    /// Queue `cycles` and, unless a tick is already running further up the
    /// stack, drain the queue in arrival order.
    fn tick(&mut self, regs: &mut Registers, cycles: u32) -> Result<(), GbError> {
        self.clock.pending.push_back(cycles);
        if self.clock.ticking {
            return Ok(());
        }

        self.clock.ticking = true;
        let mut result = Ok(());
        while let Some(cycles) = self.clock.pending.pop_front() {
            result = self.advance(regs, cycles);
            if result.is_err() {
                self.clock.pending.clear();
                break;
            }
        }
        self.clock.ticking = false;
        result
    }

    fn pending_interrupts(&mut self) -> u8 {
        self.io.iflag.bits() & self.io.ie & 0x1F
    }

    fn speed_switch(&mut self) -> bool {
        if !self.cgb || !self.io.key1_armed {
            return false;
        }
        self.io.key1_armed = false;
        self.io.double_speed = !self.io.double_speed;
        log::info!(
            "GB CPU: switched to {} speed",
            if self.io.double_speed { "double" } else { "normal" }
        );
        true
    }
}
