/// DIV/TIMA/TMA/TAC unit, advanced in machine cycles.
///
/// DIV counts up every 64 cycles. While TAC bit 2 is set, TIMA counts at
/// the TAC-selected period and reloads from TMA when it wraps.
pub(super) struct Timer {
    pub(super) div: u8,
    pub(super) tima: u8,
    pub(super) tma: u8,
    tac: u8,
    div_cycles: u32,
    tima_cycles: u32,
}

const DIV_PERIOD: u32 = 64;
const TIMA_PERIODS: [u32; 4] = [256, 4, 16, 64];

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            div: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            div_cycles: 0,
            tima_cycles: 0,
        }
    }

    /// Register state the boot ROM hands over at 0x0100: DIV=AB, TAC=F8.
    pub(super) fn init_post_boot(&mut self) {
        *self = Self::new();
        self.div = 0xAB;
    }

    pub(super) fn tac(&self) -> u8 {
        self.tac | 0xF8
    }

    pub(super) fn write_tac(&mut self, value: u8) {
        self.tac = value & 0x07;
    }

    /// Any write to DIV clears it along with its sub-counter.
    pub(super) fn write_div(&mut self) {
        self.div = 0;
        self.div_cycles = 0;
    }

    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Advance by `cycles`; returns true when TIMA overflowed and the
    /// timer interrupt should be requested.
    pub(super) fn advance(&mut self, cycles: u32) -> bool {
        self.div_cycles += cycles;
        while self.div_cycles >= DIV_PERIOD {
            self.div_cycles -= DIV_PERIOD;
            self.div = self.div.wrapping_add(1);
        }

        if !self.enabled() {
            return false;
        }

        let period = TIMA_PERIODS[(self.tac & 0x03) as usize];
        let mut overflow = false;
        self.tima_cycles += cycles;
        while self.tima_cycles >= period {
            self.tima_cycles -= period;
            let (next, wrapped) = self.tima.overflowing_add(1);
            self.tima = if wrapped { self.tma } else { next };
            overflow |= wrapped;
        }
        overflow
    }
}

#[cfg(test)]
mod tests {
    use super::Timer;

    #[test]
    fn div_counts_every_64_cycles() {
        let mut timer = Timer::new();
        assert!(!timer.advance(63));
        assert_eq!(timer.div, 0);
        timer.advance(1);
        assert_eq!(timer.div, 1);
        timer.advance(64 * 255);
        assert_eq!(timer.div, 0);
    }

    #[test]
    fn div_write_resets_the_phase() {
        let mut timer = Timer::new();
        timer.advance(60);
        timer.write_div();
        timer.advance(60);
        assert_eq!(timer.div, 0);
    }

    #[test]
    fn tima_period_follows_tac() {
        for (tac, period) in [(0x04, 256), (0x05, 4), (0x06, 16), (0x07, 64)] {
            let mut timer = Timer::new();
            timer.write_tac(tac);
            timer.advance(period * 3 - 1);
            assert_eq!(timer.tima, 2, "TAC={tac:02X}");
        }
    }

    #[test]
    fn tima_stops_when_disabled() {
        let mut timer = Timer::new();
        timer.write_tac(0x01);
        timer.advance(1000);
        assert_eq!(timer.tima, 0);
        assert_eq!(timer.tac(), 0xF9);
    }

    #[test]
    fn overflow_reloads_from_tma() {
        let mut timer = Timer::new();
        timer.write_tac(0x05);
        timer.tima = 0xFF;
        timer.tma = 0x80;
        assert!(timer.advance(4));
        assert_eq!(timer.tima, 0x80);
        assert!(!timer.advance(4));
        assert_eq!(timer.tima, 0x81);
    }
}
