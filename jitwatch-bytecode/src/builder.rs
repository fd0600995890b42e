//! Incremental construction of instructions while a listing is scanned.

use jitwatch_isa::{Opcode, OpcodeCatalog};

use crate::error::BuildError;
use crate::instruction::BytecodeInstruction;
use crate::param::InstructionParam;
use crate::switch::{CaseLabel, SwitchCase, SwitchTable};

/// Accumulates the pieces of one instruction.
///
/// The opcode may be unknown while the line is being parsed; [`build`]
/// refuses to seal an instruction without one.
///
/// [`build`]: InstructionBuilder::build
#[derive(Clone, Debug, Default)]
pub struct InstructionBuilder {
    offset: u32,
    opcode: Option<Opcode>,
    parameters: Vec<InstructionParam>,
    comment: Option<String>,
}

impl InstructionBuilder {
    pub fn new(offset: u32) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn set_offset(&mut self, offset: u32) -> &mut Self {
        self.offset = offset;
        self
    }

    pub fn set_opcode(&mut self, opcode: Opcode) -> &mut Self {
        self.opcode = Some(opcode);
        self
    }

    /// Set the opcode from its javap mnemonic, looked up in `catalog`.
    pub fn set_mnemonic(
        &mut self,
        catalog: &OpcodeCatalog,
        mnemonic: &str,
    ) -> Result<&mut Self, BuildError> {
        let opcode = catalog
            .by_mnemonic(mnemonic)
            .ok_or_else(|| BuildError::UnknownMnemonic(mnemonic.to_owned()))?;
        Ok(self.set_opcode(opcode))
    }

    pub fn add_parameter(&mut self, param: impl Into<InstructionParam>) -> &mut Self {
        self.parameters.push(param.into());
        self
    }

    /// Append a `label: target` line of a switch body to the instruction's
    /// case table, starting a table if there is none yet.
    pub fn add_case(&mut self, label: &str, target: u32) -> Result<&mut Self, BuildError> {
        let label: CaseLabel = label.parse()?;
        let case = SwitchCase { label, target };
        let table = self.parameters.iter_mut().rev().find_map(|p| match p {
            InstructionParam::Switch(table) => Some(table),
            InstructionParam::Value(_) => None,
        });
        match table {
            Some(table) => table.push(case),
            None => self.parameters.push(SwitchTable::new(vec![case]).into()),
        }
        Ok(self)
    }

    /// Assign the trailing comment. An empty string still counts as a
    /// comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn opcode(&self) -> Option<Opcode> {
        self.opcode
    }

    /// False until an opcode is set.
    pub fn is_invoke(&self) -> bool {
        self.opcode.is_some_and(Opcode::is_invoke)
    }

    /// False until an opcode is set.
    pub fn is_switch(&self) -> bool {
        self.opcode.is_some_and(Opcode::is_switch)
    }

    /// Seal the instruction.
    pub fn build(self) -> Result<BytecodeInstruction, BuildError> {
        let opcode = self.opcode.ok_or(BuildError::MissingOpcode(self.offset))?;
        Ok(BytecodeInstruction::from_parts(
            self.offset,
            opcode,
            self.parameters,
            self.comment,
        ))
    }
}
