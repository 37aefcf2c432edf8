use super::dispatch::{is_decoded, INVALID_OPCODES};
use super::*;

struct TestBus {
    memory: [u8; 0x10000],
    cycles: u32,
    pending: u8,
    speed_switch_armed: bool,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            cycles: 0,
            pending: 0,
            speed_switch_armed: false,
        }
    }
}

impl TestBus {
    fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        let start = origin as usize;
        bus.memory[start..start + program.len()].copy_from_slice(program);
        bus
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), GbError> {
        self.memory[addr as usize] = value;
        Ok(())
    }

    fn tick(&mut self, _regs: &mut Registers, cycles: u32) -> Result<(), GbError> {
        self.cycles += cycles;
        Ok(())
    }

    fn pending_interrupts(&mut self) -> u8 {
        self.pending
    }

    fn speed_switch(&mut self) -> bool {
        std::mem::take(&mut self.speed_switch_armed)
    }
}

fn cpu_at(pc: u16) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.regs.pc = pc;
    cpu
}

/// Step once and return the machine cycles the instruction charged.
fn step_cycles(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    let before = bus.cycles;
    cpu.step(bus).expect("instruction should execute");
    bus.cycles - before
}

#[test]
fn nop_advances_pc() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x00]);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 1);
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn register_pairs_round_trip_every_value() {
    let mut regs = Registers::default();
    for x in 0..=u16::MAX {
        regs.set_bc(x);
        regs.set_de(x);
        regs.set_hl(x);
        assert_eq!(regs.bc(), x);
        assert_eq!(regs.de(), x);
        assert_eq!(regs.hl(), x);
    }
}

#[test]
fn af_keeps_low_nibble_of_f_clear() {
    let mut regs = Registers::default();
    regs.set_af(0x12FF);
    assert_eq!(regs.a, 0x12);
    assert_eq!(regs.f, 0xF0);
    assert_eq!(regs.af(), 0x12F0);
}

#[test]
fn post_boot_registers_match_model() {
    let dmg = Cpu::new();
    assert_eq!(dmg.regs.af(), 0x01B0);
    assert_eq!(dmg.regs.bc(), 0x0013);
    assert_eq!(dmg.regs.de(), 0x00D8);
    assert_eq!(dmg.regs.hl(), 0x014D);
    assert_eq!(dmg.regs.sp, 0xFFFE);
    assert_eq!(dmg.regs.pc, 0x0100);
    assert!(!dmg.regs.ime);

    let mut cgb = Cpu::new();
    cgb.reset(true);
    assert_eq!(cgb.regs.a, 0x11);
    assert_eq!(cgb.regs.pc, 0x0100);
}

#[test]
fn every_opcode_is_decoded_or_invalid() {
    for opcode in 0..=0xFFu8 {
        assert!(is_decoded(opcode), "opcode {opcode:02X} has no handler");
    }
}

#[test]
fn invalid_opcodes_are_fatal() {
    for &opcode in &INVALID_OPCODES {
        let mut cpu = cpu_at(0xC000);
        let mut bus = TestBus::with_program(0xC000, &[opcode]);
        let err = cpu.step(&mut bus).unwrap_err();
        assert_eq!(err, GbError::InvalidOpcode { opcode, pc: 0xC000 });
        assert_eq!(bus.cycles, 0);
    }
}

#[test]
fn inc_of_ff_wraps_and_sets_half_carry() {
    // INC B
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x04]);
    cpu.regs.b = 0xFF;
    cpu.set_flag(Flag::C, true);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 1);
    assert_eq!(cpu.regs.b, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    // C is untouched by INC.
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn dec_of_zero_wraps_and_sets_half_carry() {
    // DEC C
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x0D]);
    cpu.regs.c = 0x00;
    cpu.set_flag(Flag::C, false);

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.c, 0xFF);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn inc_and_dec_on_hl_memory_take_three_cycles() {
    // INC (HL); DEC (HL); DEC (HL)
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x34, 0x35, 0x35]);
    cpu.regs.set_hl(0xC123);
    bus.memory[0xC123] = 0x0F;

    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(bus.memory[0xC123], 0x10);
    assert!(cpu.get_flag(Flag::H));

    step_cycles(&mut cpu, &mut bus);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC123], 0x0E);
}

#[test]
fn ld_immediates_and_indirect_forms() {
    let program = [
        0x01, 0x34, 0x12, // LD BC,0x1234
        0x31, 0xFE, 0xDF, // LD SP,0xDFFE
        0x21, 0x00, 0xC0, // LD HL,0xC000
        0x3E, 0x5A, // LD A,0x5A
        0x22, // LD (HL+),A
        0x32, // LD (HL-),A
        0x36, 0x77, // LD (HL),0x77
        0x2A, // LD A,(HL+)
    ];
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &program);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.bc(), 0x1234);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.sp, 0xDFFE);
    step_cycles(&mut cpu, &mut bus);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x5A);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(bus.memory[0xC000], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC001);

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC001], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(bus.memory[0xC000], 0x77);

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.regs.hl(), 0xC001);
    assert_eq!(cpu.regs.pc, program.len() as u16);
}

#[test]
fn ld_family_moves_between_registers_and_hl() {
    // LD D,B; LD (HL),D; LD E,(HL); LD A,E
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x50, 0x72, 0x5E, 0x7B]);
    cpu.regs.b = 0xAB;
    cpu.regs.set_hl(0xC010);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 1);
    assert_eq!(cpu.regs.d, 0xAB);
    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(bus.memory[0xC010], 0xAB);
    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.e, 0xAB);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xAB);
}

#[test]
fn alu_families_use_mode_bit() {
    // ADD A,B; ADC A,B; SUB A,C; SBC A,C; AND D; XOR A; OR E; CP E
    let program = [0x80, 0x88, 0x91, 0x99, 0xA2, 0xAF, 0xB3, 0xBB];
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &program);

    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x10;
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));

    // ADC picks up the carry from the previous ADD.
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x11);
    assert!(!cpu.get_flag(Flag::C));

    cpu.regs.c = 0x12;
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xFF);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    // SBC with borrow in: 0xFF - 0x12 - 1
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xEC);
    assert!(!cpu.get_flag(Flag::C));

    cpu.regs.d = 0x0F;
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x0C);
    assert!(cpu.get_flag(Flag::H));

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));

    cpu.regs.e = 0x42;
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x42);

    // CP leaves A alone.
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn alu_immediate_costs_two_cycles() {
    // SUB 0x01; CP 0x10
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xD6, 0x01, 0xFE, 0x10]);
    cpu.regs.a = 0x10;

    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x0F);
    assert!(cpu.get_flag(Flag::H));

    step_cycles(&mut cpu, &mut bus);
    assert!(cpu.get_flag(Flag::C));
    assert_eq!(cpu.regs.pc, 4);
}

#[test]
fn daa_corrects_after_add_and_subtract() {
    // ADD A,B; DAA
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x80, 0x27]);
    cpu.regs.a = 0x45;
    cpu.regs.b = 0x38;
    step_cycles(&mut cpu, &mut bus);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));

    // 99 + 01 = 100: A becomes 00 with carry out.
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x80, 0x27]);
    cpu.regs.a = 0x99;
    cpu.regs.b = 0x01;
    step_cycles(&mut cpu, &mut bus);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::H));

    // SUB A,B; DAA: 42 - 15 = 27
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x90, 0x27]);
    cpu.regs.a = 0x42;
    cpu.regs.b = 0x15;
    step_cycles(&mut cpu, &mut bus);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x27);
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn cpl_scf_ccf_and_rotates_on_a() {
    // CPL; SCF; CCF; RLCA; RRA
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x2F, 0x37, 0x3F, 0x07, 0x1F]);
    cpu.regs.a = 0x35;

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xCA);
    assert!(cpu.get_flag(Flag::N) && cpu.get_flag(Flag::H));

    step_cycles(&mut cpu, &mut bus);
    assert!(cpu.get_flag(Flag::C));
    step_cycles(&mut cpu, &mut bus);
    assert!(!cpu.get_flag(Flag::C));

    // RLCA: 0xCA -> 0x95, C=1, Z always cleared.
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x95);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));

    // RRA: carry rotates into bit 7.
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xCA);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn cb_prefix_covers_shift_bit_res_set() {
    let program = [
        0xCB, 0x37, // SWAP A
        0xCB, 0x20, // SLA B
        0xCB, 0x7E, // BIT 7,(HL)
        0xCB, 0x86, // RES 0,(HL)
        0xCB, 0xFF, // SET 7,A
        0xCB, 0x19, // RR C
    ];
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &program);
    cpu.regs.a = 0x1F;
    cpu.regs.b = 0x81;
    cpu.regs.c = 0x01;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;

    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0xF1);

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0x02);
    assert!(cpu.get_flag(Flag::C));

    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    // BIT leaves C alone.
    assert!(cpu.get_flag(Flag::C));

    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert_eq!(bus.memory[0xC000], 0x0E);

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xF1);

    // RR C with C set: 0x01 -> 0x80, carry out 1.
    cpu.set_flag(Flag::C, true);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.c, 0x80);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
    assert_eq!(cpu.regs.pc, 12);
}

#[test]
fn add_hl_and_sp_offsets() {
    // ADD HL,DE; ADD SP,-2; LD HL,SP+1
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x19, 0xE8, 0xFE, 0xF8, 0x01]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_de(0x0001);
    cpu.set_flag(Flag::Z, true);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::Z));

    cpu.regs.sp = 0xFFF8;
    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.sp, 0xFFF6);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));

    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.hl(), 0xFFF7);
    assert_eq!(cpu.regs.sp, 0xFFF6);
}

#[test]
fn jumps_charge_taken_and_untaken_costs() {
    let program = [
        0x20, 0x02, // JR NZ,+2 (not taken, Z set)
        0x28, 0x02, // JR Z,+2 (taken)
        0x00, 0x00, // skipped
        0xC3, 0x00, 0x02, // JP 0x0200
    ];
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &program);
    cpu.set_flag(Flag::Z, true);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.pc, 0x0006);
    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn jr_with_negative_offset_loops_back() {
    // 0x0010: JR -2 (jumps to itself)
    let mut cpu = cpu_at(0x0010);
    let mut bus = TestBus::with_program(0x0010, &[0x18, 0xFE]);
    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0010);
}

#[test]
fn call_ret_and_rst_use_the_stack() {
    let mut cpu = cpu_at(0x0100);
    let mut bus = TestBus::with_program(0x0100, &[0xCD, 0x00, 0x40]); // CALL 0x4000
    bus.memory[0x4000] = 0xC9; // RET
    bus.memory[0x0103] = 0xDF; // RST 18
    cpu.regs.sp = 0xDFFE;

    assert_eq!(step_cycles(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.regs.pc, 0x4000);
    assert_eq!(cpu.regs.sp, 0xDFFC);
    assert_eq!(bus.memory[0xDFFC], 0x03);
    assert_eq!(bus.memory[0xDFFD], 0x01);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xDFFE);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0018);
    assert_eq!(bus.memory[0xDFFC], 0x04);
}

#[test]
fn conditional_call_and_ret_costs() {
    // CALL NC,0x3000 (not taken, C set); RET C (taken)
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xD4, 0x00, 0x30, 0xD8]);
    cpu.regs.sp = 0xC100;
    bus.memory[0xC100] = 0x34;
    bus.memory[0xC101] = 0x12;
    cpu.set_flag(Flag::C, true);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(step_cycles(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn push_pop_round_trip_and_pop_af_masks_flags() {
    // PUSH BC; POP AF
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xC5, 0xF1]);
    cpu.regs.sp = 0xFFFE;
    cpu.regs.set_bc(0x12FF);

    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(step_cycles(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn ei_takes_effect_before_the_next_instruction() {
    // EI; NOP
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xFB, 0x00]);

    step_cycles(&mut cpu, &mut bus);
    assert!(!cpu.regs.ime);
    step_cycles(&mut cpu, &mut bus);
    assert!(cpu.regs.ime);
}

#[test]
fn di_cancels_a_pending_ei() {
    // EI; DI; NOP
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xFB, 0xF3, 0x00]);
    for _ in 0..3 {
        step_cycles(&mut cpu, &mut bus);
    }
    assert!(!cpu.regs.ime);
}

#[test]
fn reti_enables_interrupts_immediately() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xD9]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x50;

    assert_eq!(step_cycles(&mut cpu, &mut bus), 4);
    assert!(cpu.regs.ime);
    assert_eq!(cpu.regs.pc, 0x0050);
}

#[test]
fn halt_keeps_ticking_until_an_interrupt_is_pending() {
    // HALT; NOP
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x76, 0x00]);

    step_cycles(&mut cpu, &mut bus);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0001);

    for _ in 0..10 {
        assert_eq!(step_cycles(&mut cpu, &mut bus), 1);
        assert!(cpu.is_halted());
    }
    assert_eq!(cpu.regs.pc, 0x0001);

    bus.pending = 0x04;
    step_cycles(&mut cpu, &mut bus);
    assert!(!cpu.is_halted());

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn stop_switches_speed_or_fails() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x10, 0x00, 0x10, 0x00]);
    bus.speed_switch_armed = true;

    step_cycles(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0002);

    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        GbError::UnimplementedOpcode {
            opcode: 0x10,
            pc: 0x0002
        }
    );
}
