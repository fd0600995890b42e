//! Model of one disassembled JVM bytecode instruction, as printed by javap.
//!
//! Instructions are accumulated with an [`InstructionBuilder`] while a
//! disassembly listing is scanned, then sealed into an immutable
//! [`BytecodeInstruction`] that renders itself back to aligned text.

pub mod builder;
pub mod error;
pub mod format;
pub mod instruction;
pub mod param;
pub mod switch;

pub use builder::InstructionBuilder;
pub use error::BuildError;
pub use instruction::{
    BytecodeInstruction, INTERFACE_METHOD_COMMENT, METHOD_COMMENT, strip_member_prefix,
};
pub use jitwatch_isa::{Opcode, OpcodeCatalog};
pub use param::InstructionParam;
pub use switch::{CaseLabel, SwitchCase, SwitchTable};
