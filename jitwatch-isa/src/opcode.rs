use std::fmt;
use std::str::FromStr;

use crate::catalog::{JVM_OPCODES, OpcodeCatalog};

bitflags::bitflags! {
    /// Category flags attached to every opcode in the table.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OpcodeFlags: u8 {
        /// Method invocation (`invokevirtual`, `invokedynamic`, ...).
        const INVOKE = 1 << 0;
        /// Multi-way branch carrying a switch table.
        const SWITCH = 1 << 1;
    }
}

/// A JVM opcode.
///
/// `Opcode` is a copyable handle into the static opcode table, so every value
/// refers to a real table entry. Obtain one through [`OpcodeCatalog`],
/// [`lookup`](crate::lookup), [`FromStr`] or the associated constants.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(u8);

impl Opcode {
    pub const ALOAD_0: Self = Self(0x2a);
    pub const GOTO: Self = Self(0xa7);
    pub const TABLESWITCH: Self = Self(0xaa);
    pub const LOOKUPSWITCH: Self = Self(0xab);
    pub const RETURN: Self = Self(0xb1);
    pub const GETFIELD: Self = Self(0xb4);
    pub const INVOKEVIRTUAL: Self = Self(0xb6);
    pub const INVOKESPECIAL: Self = Self(0xb7);
    pub const INVOKESTATIC: Self = Self(0xb8);
    pub const INVOKEINTERFACE: Self = Self(0xb9);
    pub const INVOKEDYNAMIC: Self = Self(0xba);

    /// Only called with codes known to be inside the table.
    pub(crate) const fn from_raw(code: u8) -> Self {
        Self(code)
    }

    /// Numeric opcode value as it appears in a class file.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Full table entry for this opcode.
    #[inline]
    pub fn info(self) -> &'static OpcodeInfo {
        &JVM_OPCODES[self.0 as usize]
    }

    #[inline]
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    #[inline]
    pub fn flags(self) -> OpcodeFlags {
        self.info().flags
    }

    #[inline]
    pub fn has_flag(self, flag: OpcodeFlags) -> bool {
        self.flags().contains(flag)
    }

    /// True for the method invocation family.
    #[inline]
    pub fn is_invoke(self) -> bool {
        self.has_flag(OpcodeFlags::INVOKE)
    }

    /// True for `tableswitch` and `lookupswitch`.
    #[inline]
    pub fn is_switch(self) -> bool {
        self.has_flag(OpcodeFlags::SWITCH)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:#04x} {})", self.0, self.mnemonic())
    }
}

/// Error from parsing an [`Opcode`] out of a mnemonic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode mnemonic `{0}`")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Opcode {
    type Err = UnknownMnemonic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpcodeCatalog::jvm()
            .by_mnemonic(s)
            .ok_or_else(|| UnknownMnemonic(s.to_owned()))
    }
}

/// One row of the opcode table.
#[derive(Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub(crate) opcode: Opcode,
    pub(crate) mnemonic: &'static str,
    pub(crate) flags: OpcodeFlags,
}

impl OpcodeInfo {
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub const fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    pub const fn flags(&self) -> OpcodeFlags {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_table() {
        assert_eq!(Opcode::ALOAD_0.mnemonic(), "aload_0");
        assert_eq!(Opcode::GOTO.mnemonic(), "goto");
        assert_eq!(Opcode::TABLESWITCH.mnemonic(), "tableswitch");
        assert_eq!(Opcode::LOOKUPSWITCH.mnemonic(), "lookupswitch");
        assert_eq!(Opcode::RETURN.mnemonic(), "return");
        assert_eq!(Opcode::GETFIELD.mnemonic(), "getfield");
        assert_eq!(Opcode::INVOKEVIRTUAL.mnemonic(), "invokevirtual");
        assert_eq!(Opcode::INVOKESPECIAL.mnemonic(), "invokespecial");
        assert_eq!(Opcode::INVOKESTATIC.mnemonic(), "invokestatic");
        assert_eq!(Opcode::INVOKEINTERFACE.mnemonic(), "invokeinterface");
        assert_eq!(Opcode::INVOKEDYNAMIC.mnemonic(), "invokedynamic");
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(Opcode::ALOAD_0.to_string(), "aload_0");
        assert_eq!(format!("{:?}", Opcode::ALOAD_0), "Opcode(0x2a aload_0)");
    }

    #[test]
    fn parse_mnemonic() {
        assert_eq!("invokestatic".parse::<Opcode>(), Ok(Opcode::INVOKESTATIC));
        assert_eq!(
            "invokefoo".parse::<Opcode>(),
            Err(UnknownMnemonic("invokefoo".into()))
        );
    }
}
