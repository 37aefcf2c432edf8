use super::{Bus, Cpu, Operand8, RunState};
use crate::GbError;

/// Handler for a fully decoded opcode.
pub(super) type OpFn = fn(&mut Cpu, &mut dyn Bus) -> Result<(), GbError>;

/// Handler for an opcode family sharing the register/(HL) operand pattern.
///
/// Receives the operand from the low three bits and bit 3 as a mode
/// selector (e.g. ADD vs ADC).
pub(super) type FamilyFn = fn(&mut Cpu, &mut dyn Bus, Operand8, bool) -> Result<(), GbError>;

/// Documented opcode holes that lock up real hardware.
pub(super) const INVALID_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

static OPCODES: [Option<OpFn>; 256] = opcode_table();
static FAMILIES: [Option<FamilyFn>; 16] = family_table();

const fn fill(
    mut table: [Option<OpFn>; 256],
    opcodes: &[u8],
    handler: OpFn,
) -> [Option<OpFn>; 256] {
    let mut i = 0;
    while i < opcodes.len() {
        table[opcodes[i] as usize] = Some(handler);
        i += 1;
    }
    table
}

const fn opcode_table() -> [Option<OpFn>; 256] {
    let mut t: [Option<OpFn>; 256] = [None; 256];

    // Control and system.
    t = fill(t, &[0x00], Cpu::exec_nop);
    t = fill(t, &[0x10], Cpu::exec_stop);
    t = fill(t, &[0x76], Cpu::exec_halt);
    t = fill(t, &[0xF3], Cpu::exec_di);
    t = fill(t, &[0xFB], Cpu::exec_ei);
    t = fill(t, &[0xCB], Cpu::exec_cb_prefix);
    t = fill(t, &INVALID_OPCODES, Cpu::exec_invalid);

    // Loads.
    t = fill(t, &[0x01, 0x11, 0x21, 0x31], Cpu::exec_ld_rr_d16);
    t = fill(t, &[0x06, 0x0E, 0x16, 0x1E, 0x26, 0x2E, 0x36, 0x3E], Cpu::exec_ld_r_d8);
    t = fill(t, &[0x02, 0x12, 0x22, 0x32], Cpu::exec_ld_indirect_a);
    t = fill(t, &[0x0A, 0x1A, 0x2A, 0x3A], Cpu::exec_ld_a_indirect);
    t = fill(t, &[0x08], Cpu::exec_ld_a16_sp);
    t = fill(t, &[0xE0, 0xF0], Cpu::exec_ldh_a8);
    t = fill(t, &[0xE2, 0xF2], Cpu::exec_ldh_c);
    t = fill(t, &[0xEA, 0xFA], Cpu::exec_ld_a16_a);
    t = fill(t, &[0xF8], Cpu::exec_ld_hl_sp_r8);
    t = fill(t, &[0xF9], Cpu::exec_ld_sp_hl);

    // 8/16-bit arithmetic.
    t = fill(t, &[0x04, 0x0C, 0x14, 0x1C, 0x24, 0x2C, 0x34, 0x3C], Cpu::exec_inc8);
    t = fill(t, &[0x05, 0x0D, 0x15, 0x1D, 0x25, 0x2D, 0x35, 0x3D], Cpu::exec_dec8);
    t = fill(t, &[0x03, 0x13, 0x23, 0x33], Cpu::exec_inc16);
    t = fill(t, &[0x0B, 0x1B, 0x2B, 0x3B], Cpu::exec_dec16);
    t = fill(t, &[0x09, 0x19, 0x29, 0x39], Cpu::exec_add_hl_rr);
    t = fill(t, &[0xE8], Cpu::exec_add_sp_r8);
    t = fill(t, &[0xC6, 0xCE, 0xD6, 0xDE, 0xE6, 0xEE, 0xF6, 0xFE], Cpu::exec_alu_d8);
    t = fill(t, &[0x07, 0x0F, 0x17, 0x1F], Cpu::exec_rotate_a);
    t = fill(t, &[0x27], Cpu::exec_daa);
    t = fill(t, &[0x2F], Cpu::exec_cpl);
    t = fill(t, &[0x37], Cpu::exec_scf);
    t = fill(t, &[0x3F], Cpu::exec_ccf);

    // Jumps, calls and returns.
    t = fill(t, &[0x18], Cpu::exec_jr);
    t = fill(t, &[0x20, 0x28, 0x30, 0x38], Cpu::exec_jr_cc);
    t = fill(t, &[0xC3], Cpu::exec_jp_a16);
    t = fill(t, &[0xC2, 0xCA, 0xD2, 0xDA], Cpu::exec_jp_cc);
    t = fill(t, &[0xE9], Cpu::exec_jp_hl);
    t = fill(t, &[0xCD], Cpu::exec_call_a16);
    t = fill(t, &[0xC4, 0xCC, 0xD4, 0xDC], Cpu::exec_call_cc);
    t = fill(t, &[0xC9], Cpu::exec_ret);
    t = fill(t, &[0xC0, 0xC8, 0xD0, 0xD8], Cpu::exec_ret_cc);
    t = fill(t, &[0xD9], Cpu::exec_reti);
    t = fill(t, &[0xC7, 0xCF, 0xD7, 0xDF, 0xE7, 0xEF, 0xF7, 0xFF], Cpu::exec_rst);

    // Stack.
    t = fill(t, &[0xC5, 0xD5, 0xE5, 0xF5], Cpu::exec_push);
    t = fill(t, &[0xC1, 0xD1, 0xE1, 0xF1], Cpu::exec_pop);

    t
}

/// Rows 0x4_-0xB_ are left empty in the main table and land here.
const fn family_table() -> [Option<FamilyFn>; 16] {
    let mut t: [Option<FamilyFn>; 16] = [None; 16];
    t[0x4] = Some(Cpu::family_ld as FamilyFn);
    t[0x5] = Some(Cpu::family_ld as FamilyFn);
    t[0x6] = Some(Cpu::family_ld as FamilyFn);
    t[0x7] = Some(Cpu::family_ld as FamilyFn);
    t[0x8] = Some(Cpu::family_add_adc as FamilyFn);
    t[0x9] = Some(Cpu::family_sub_sbc as FamilyFn);
    t[0xA] = Some(Cpu::family_and_xor as FamilyFn);
    t[0xB] = Some(Cpu::family_or_cp as FamilyFn);
    t
}

impl Cpu {
    /// Run one instruction, or one idle cycle while halted.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        if self.regs.state == RunState::Halted {
            bus.tick(&mut self.regs, 1)?;
            if bus.pending_interrupts() != 0 {
                self.regs.state = RunState::Running;
            }
            return Ok(());
        }

        if self.ime_pending {
            self.ime_pending = false;
            self.regs.ime = true;
        }

        self.execute_opcode(bus)
    }

    /// Decode the byte at PC and run its handler.
    pub fn execute_opcode(&mut self, bus: &mut dyn Bus) -> Result<(), GbError> {
        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        self.opcode = opcode;

        if let Some(handler) = OPCODES[opcode as usize] {
            return handler(self, bus);
        }
        if let Some(handler) = FAMILIES[(opcode >> 4) as usize] {
            return handler(self, bus, Operand8::decode(opcode), opcode & 0x08 != 0);
        }

        log::error!("GB CPU: unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X}");
        Err(GbError::UnimplementedOpcode { opcode, pc })
    }
}

/// Whether `opcode` resolves to a handler through either table.
#[cfg(test)]
pub(super) fn is_decoded(opcode: u8) -> bool {
    OPCODES[opcode as usize].is_some() || FAMILIES[(opcode >> 4) as usize].is_some()
}
