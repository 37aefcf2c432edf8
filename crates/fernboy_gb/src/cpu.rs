mod alu;
mod cb;
mod dispatch;
mod exec;
mod helpers;
mod init;
mod regs;

pub use regs::{Flag, Operand8, Reg8, Registers, RunState};

use crate::GbError;

/// The CPU's view of the rest of the machine.
///
/// Handlers only touch memory through this trait and report the machine
/// cycles they consumed through [`Bus::tick`]. The production
/// implementation is the Game Boy bus, which runs the scheduler inside
/// `tick`; tests use a flat 64 KiB array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), GbError>;

    /// Advance the machine by `cycles` machine cycles (4 dots each).
    ///
    /// Interrupt dispatch happens in here, which is why the register file
    /// is passed along: dispatch pushes PC, redirects it to a vector and
    /// clears IME.
    fn tick(&mut self, regs: &mut Registers, cycles: u32) -> Result<(), GbError>;

    /// IF & IE, masked to the five interrupt sources.
    fn pending_interrupts(&mut self) -> u8 {
        0
    }

    /// Perform a CGB speed switch if KEY1 has one armed.
    ///
    /// Returns `true` when the switch happened and STOP should resume
    /// immediately.
    fn speed_switch(&mut self) -> bool {
        false
    }
}

/// LR35902 core: register file plus the small amount of decode state that
/// survives between instructions.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    /// Set by EI; IME turns on at the start of the next `step`.
    ime_pending: bool,
    /// Opcode byte of the instruction currently executing.
    opcode: u8,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.set_flag(flag, value);
    }

    /// Overwrite all four flags at once.
    #[inline]
    pub(crate) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = (u8::from(z) << Flag::Z as u8)
            | (u8::from(n) << Flag::N as u8)
            | (u8::from(h) << Flag::H as u8)
            | (u8::from(c) << Flag::C as u8);
    }

    pub fn is_halted(&self) -> bool {
        self.regs.state == RunState::Halted
    }
}

#[cfg(test)]
mod tests;
