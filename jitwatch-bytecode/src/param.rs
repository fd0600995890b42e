use std::fmt;

use crate::switch::SwitchTable;

/// An operand attached to a [`BytecodeInstruction`](crate::BytecodeInstruction).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InstructionParam {
    /// Operand already rendered as text (`#12`, `5`, `int`, ...).
    Value(String),
    /// Case table of a `tableswitch` / `lookupswitch`.
    Switch(SwitchTable),
}

impl InstructionParam {
    pub fn value(text: impl Into<String>) -> Self {
        InstructionParam::Value(text.into())
    }

    /// Constant pool reference, rendered as `#index`.
    pub fn constant(index: u16) -> Self {
        InstructionParam::Value(format!("#{index}"))
    }

    pub fn numeric(value: i64) -> Self {
        InstructionParam::Value(value.to_string())
    }

    pub fn as_switch(&self) -> Option<&SwitchTable> {
        match self {
            InstructionParam::Switch(table) => Some(table),
            InstructionParam::Value(_) => None,
        }
    }
}

impl From<SwitchTable> for InstructionParam {
    fn from(table: SwitchTable) -> Self {
        InstructionParam::Switch(table)
    }
}

impl fmt::Display for InstructionParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionParam::Value(text) => f.write_str(text),
            InstructionParam::Switch(table) => fmt::Display::fmt(table, f),
        }
    }
}
