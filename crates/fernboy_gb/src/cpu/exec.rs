//! Opcode handlers, grouped the same way as the dispatch table.
//!
//! Every handler reads its operands relative to PC, applies its effect,
//! then calls `finish` or `jump` so PC is final before the scheduler runs.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
