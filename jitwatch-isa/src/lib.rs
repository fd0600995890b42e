//! JVM opcode definitions.
//!
//! This crate provides the static opcode table for the JVM instruction set
//! together with the category flags (invoke family, switch family) that the
//! disassembly model needs for layout decisions.

mod catalog;
mod opcode;

pub use bitflags;

pub use catalog::{OpcodeCatalog, lookup, lookup_mnemonic, opcode_count, opcode_table};
pub use opcode::{Opcode, OpcodeFlags, OpcodeInfo, UnknownMnemonic};
