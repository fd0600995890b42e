use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("instruction at offset {0} has no opcode")]
    MissingOpcode(u32),

    #[error("unknown opcode mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error("invalid switch case label `{0}`")]
    InvalidCaseLabel(String),
}
