use super::super::clock::{PpuMode, DOTS_PER_LINE, LINES_PER_FRAME, VBLANK_LINE};
use super::super::io::Lcdc;
use super::super::video::LineInputs;
use super::super::Interrupts;
use super::GameBoyBus;
use crate::cpu::{Bus, Registers, RunState};
use crate::GbError;

/// Handler addresses in priority order.
const VECTORS: [(Interrupts, u16); 5] = [
    (Interrupts::VBLANK, 0x40),
    (Interrupts::STAT, 0x48),
    (Interrupts::TIMER, 0x50),
    (Interrupts::SERIAL, 0x58),
    (Interrupts::JOYPAD, 0x60),
];

/// Extra machine cycles an interrupt dispatch takes.
const DISPATCH_CYCLES: u32 = 5;

impl GameBoyBus {
    /// Run every clocked unit forward by one queued request.
    pub(super) fn advance(&mut self, regs: &mut Registers, cycles: u32) -> Result<(), GbError> {
        self.clock.total_cycles += cycles as u64;

        if self.timer.advance(cycles) {
            self.io.iflag |= Interrupts::TIMER;
        }
        self.cartridge.advance(cycles);
        self.advance_ppu(cycles);

        self.dispatch_interrupt(regs)
    }

    fn advance_ppu(&mut self, cycles: u32) {
        if !self.io.lcdc.contains(Lcdc::PPU_ENABLE) {
            self.io.ly = 0;
            self.clock.dot = 0;
            return;
        }

        self.clock.dot += cycles * 4;
        while self.clock.dot >= DOTS_PER_LINE {
            self.clock.dot -= DOTS_PER_LINE;
            self.finish_line();
        }

        let mode = PpuMode::at(self.io.ly, self.clock.dot);
        if mode != self.clock.mode {
            self.clock.mode = mode;
            if let Some(source) = mode.stat_source() {
                if self.io.stat & source != 0 {
                    self.io.iflag |= Interrupts::STAT;
                }
            }
        }

        if self.clock.lyc_armed && self.io.stat & 0x40 != 0 && self.io.ly == self.io.lyc {
            self.clock.lyc_armed = false;
            self.io.iflag |= Interrupts::STAT;
        }
    }

    /// Close out the current line: draw it if visible, then move LY on.
    fn finish_line(&mut self) {
        let line = self.io.ly;
        if line < VBLANK_LINE {
            let inputs = LineInputs {
                vram: &self.vram,
                oam: &self.oam,
                io: &self.io,
                cgb: self.cgb,
            };
            self.video.render_line(line, &inputs);
            self.presenter.present_line(line, self.video.line(line));
        }

        self.io.ly = (line + 1) % LINES_PER_FRAME;
        self.clock.lyc_armed = true;

        match self.io.ly {
            VBLANK_LINE => {
                self.io.iflag |= Interrupts::VBLANK;
                self.clock.frame_ready = true;
                self.presenter.present_frame(self.video.frame());
                log::trace!("GB PPU: VBlank at cycle {}", self.clock.total_cycles);
            }
            0 => self.video.start_frame(),
            _ => {}
        }
    }

    /// Service the highest-priority requested and enabled interrupt.
    fn dispatch_interrupt(&mut self, regs: &mut Registers) -> Result<(), GbError> {
        if !regs.ime {
            return Ok(());
        }

        let pending = self.io.iflag & Interrupts::from_bits_truncate(self.io.ie);
        let Some(&(flag, vector)) = VECTORS.iter().find(|(flag, _)| pending.contains(*flag)) else {
            return Ok(());
        };

        if flag == Interrupts::SERIAL {
            log::error!("GB CPU: serial interrupt dispatch at PC=0x{:04X}", regs.pc);
            return Err(GbError::Unsupported("serial interrupt"));
        }
        if flag == Interrupts::JOYPAD {
            log::error!("GB CPU: joypad interrupt dispatch at PC=0x{:04X}", regs.pc);
            return Err(GbError::Unsupported("joypad interrupt"));
        }

        self.io.iflag.remove(flag);
        regs.ime = false;
        regs.state = RunState::Running;

        let [hi, lo] = regs.pc.to_be_bytes();
        regs.sp = regs.sp.wrapping_sub(1);
        self.write8(regs.sp, hi)?;
        regs.sp = regs.sp.wrapping_sub(1);
        self.write8(regs.sp, lo)?;

        log::debug!("GB CPU: interrupt {flag:?} from PC=0x{:04X}", regs.pc);
        regs.pc = vector;
        self.tick(regs, DISPATCH_CYCLES)
    }
}
