use crate::opcode::{Opcode, OpcodeFlags, OpcodeInfo};

macro_rules! op {
    ($code:expr, $mnemonic:expr) => {
        OpcodeInfo {
            opcode: Opcode::from_raw($code),
            mnemonic: $mnemonic,
            flags: OpcodeFlags::empty(),
        }
    };
    ($code:expr, $mnemonic:expr, $flag:ident) => {
        OpcodeInfo {
            opcode: Opcode::from_raw($code),
            mnemonic: $mnemonic,
            flags: OpcodeFlags::$flag,
        }
    };
}

/// JVM opcodes `0x00..=0xc9`, indexed by opcode value.
pub(crate) static JVM_OPCODES: [OpcodeInfo; 202] = [
    op!(0x00, "nop"),
    op!(0x01, "aconst_null"),
    op!(0x02, "iconst_m1"),
    op!(0x03, "iconst_0"),
    op!(0x04, "iconst_1"),
    op!(0x05, "iconst_2"),
    op!(0x06, "iconst_3"),
    op!(0x07, "iconst_4"),
    op!(0x08, "iconst_5"),
    op!(0x09, "lconst_0"),
    op!(0x0a, "lconst_1"),
    op!(0x0b, "fconst_0"),
    op!(0x0c, "fconst_1"),
    op!(0x0d, "fconst_2"),
    op!(0x0e, "dconst_0"),
    op!(0x0f, "dconst_1"),
    op!(0x10, "bipush"),
    op!(0x11, "sipush"),
    op!(0x12, "ldc"),
    op!(0x13, "ldc_w"),
    op!(0x14, "ldc2_w"),
    op!(0x15, "iload"),
    op!(0x16, "lload"),
    op!(0x17, "fload"),
    op!(0x18, "dload"),
    op!(0x19, "aload"),
    op!(0x1a, "iload_0"),
    op!(0x1b, "iload_1"),
    op!(0x1c, "iload_2"),
    op!(0x1d, "iload_3"),
    op!(0x1e, "lload_0"),
    op!(0x1f, "lload_1"),
    op!(0x20, "lload_2"),
    op!(0x21, "lload_3"),
    op!(0x22, "fload_0"),
    op!(0x23, "fload_1"),
    op!(0x24, "fload_2"),
    op!(0x25, "fload_3"),
    op!(0x26, "dload_0"),
    op!(0x27, "dload_1"),
    op!(0x28, "dload_2"),
    op!(0x29, "dload_3"),
    op!(0x2a, "aload_0"),
    op!(0x2b, "aload_1"),
    op!(0x2c, "aload_2"),
    op!(0x2d, "aload_3"),
    op!(0x2e, "iaload"),
    op!(0x2f, "laload"),
    op!(0x30, "faload"),
    op!(0x31, "daload"),
    op!(0x32, "aaload"),
    op!(0x33, "baload"),
    op!(0x34, "caload"),
    op!(0x35, "saload"),
    op!(0x36, "istore"),
    op!(0x37, "lstore"),
    op!(0x38, "fstore"),
    op!(0x39, "dstore"),
    op!(0x3a, "astore"),
    op!(0x3b, "istore_0"),
    op!(0x3c, "istore_1"),
    op!(0x3d, "istore_2"),
    op!(0x3e, "istore_3"),
    op!(0x3f, "lstore_0"),
    op!(0x40, "lstore_1"),
    op!(0x41, "lstore_2"),
    op!(0x42, "lstore_3"),
    op!(0x43, "fstore_0"),
    op!(0x44, "fstore_1"),
    op!(0x45, "fstore_2"),
    op!(0x46, "fstore_3"),
    op!(0x47, "dstore_0"),
    op!(0x48, "dstore_1"),
    op!(0x49, "dstore_2"),
    op!(0x4a, "dstore_3"),
    op!(0x4b, "astore_0"),
    op!(0x4c, "astore_1"),
    op!(0x4d, "astore_2"),
    op!(0x4e, "astore_3"),
    op!(0x4f, "iastore"),
    op!(0x50, "lastore"),
    op!(0x51, "fastore"),
    op!(0x52, "dastore"),
    op!(0x53, "aastore"),
    op!(0x54, "bastore"),
    op!(0x55, "castore"),
    op!(0x56, "sastore"),
    op!(0x57, "pop"),
    op!(0x58, "pop2"),
    op!(0x59, "dup"),
    op!(0x5a, "dup_x1"),
    op!(0x5b, "dup_x2"),
    op!(0x5c, "dup2"),
    op!(0x5d, "dup2_x1"),
    op!(0x5e, "dup2_x2"),
    op!(0x5f, "swap"),
    op!(0x60, "iadd"),
    op!(0x61, "ladd"),
    op!(0x62, "fadd"),
    op!(0x63, "dadd"),
    op!(0x64, "isub"),
    op!(0x65, "lsub"),
    op!(0x66, "fsub"),
    op!(0x67, "dsub"),
    op!(0x68, "imul"),
    op!(0x69, "lmul"),
    op!(0x6a, "fmul"),
    op!(0x6b, "dmul"),
    op!(0x6c, "idiv"),
    op!(0x6d, "ldiv"),
    op!(0x6e, "fdiv"),
    op!(0x6f, "ddiv"),
    op!(0x70, "irem"),
    op!(0x71, "lrem"),
    op!(0x72, "frem"),
    op!(0x73, "drem"),
    op!(0x74, "ineg"),
    op!(0x75, "lneg"),
    op!(0x76, "fneg"),
    op!(0x77, "dneg"),
    op!(0x78, "ishl"),
    op!(0x79, "lshl"),
    op!(0x7a, "ishr"),
    op!(0x7b, "lshr"),
    op!(0x7c, "iushr"),
    op!(0x7d, "lushr"),
    op!(0x7e, "iand"),
    op!(0x7f, "land"),
    op!(0x80, "ior"),
    op!(0x81, "lor"),
    op!(0x82, "ixor"),
    op!(0x83, "lxor"),
    op!(0x84, "iinc"),
    op!(0x85, "i2l"),
    op!(0x86, "i2f"),
    op!(0x87, "i2d"),
    op!(0x88, "l2i"),
    op!(0x89, "l2f"),
    op!(0x8a, "l2d"),
    op!(0x8b, "f2i"),
    op!(0x8c, "f2l"),
    op!(0x8d, "f2d"),
    op!(0x8e, "d2i"),
    op!(0x8f, "d2l"),
    op!(0x90, "d2f"),
    op!(0x91, "i2b"),
    op!(0x92, "i2c"),
    op!(0x93, "i2s"),
    op!(0x94, "lcmp"),
    op!(0x95, "fcmpl"),
    op!(0x96, "fcmpg"),
    op!(0x97, "dcmpl"),
    op!(0x98, "dcmpg"),
    op!(0x99, "ifeq"),
    op!(0x9a, "ifne"),
    op!(0x9b, "iflt"),
    op!(0x9c, "ifge"),
    op!(0x9d, "ifgt"),
    op!(0x9e, "ifle"),
    op!(0x9f, "if_icmpeq"),
    op!(0xa0, "if_icmpne"),
    op!(0xa1, "if_icmplt"),
    op!(0xa2, "if_icmpge"),
    op!(0xa3, "if_icmpgt"),
    op!(0xa4, "if_icmple"),
    op!(0xa5, "if_acmpeq"),
    op!(0xa6, "if_acmpne"),
    op!(0xa7, "goto"),
    op!(0xa8, "jsr"),
    op!(0xa9, "ret"),
    op!(0xaa, "tableswitch", SWITCH),
    op!(0xab, "lookupswitch", SWITCH),
    op!(0xac, "ireturn"),
    op!(0xad, "lreturn"),
    op!(0xae, "freturn"),
    op!(0xaf, "dreturn"),
    op!(0xb0, "areturn"),
    op!(0xb1, "return"),
    op!(0xb2, "getstatic"),
    op!(0xb3, "putstatic"),
    op!(0xb4, "getfield"),
    op!(0xb5, "putfield"),
    op!(0xb6, "invokevirtual", INVOKE),
    op!(0xb7, "invokespecial", INVOKE),
    op!(0xb8, "invokestatic", INVOKE),
    op!(0xb9, "invokeinterface", INVOKE),
    op!(0xba, "invokedynamic", INVOKE),
    op!(0xbb, "new"),
    op!(0xbc, "newarray"),
    op!(0xbd, "anewarray"),
    op!(0xbe, "arraylength"),
    op!(0xbf, "athrow"),
    op!(0xc0, "checkcast"),
    op!(0xc1, "instanceof"),
    op!(0xc2, "monitorenter"),
    op!(0xc3, "monitorexit"),
    op!(0xc4, "wide"),
    op!(0xc5, "multianewarray"),
    op!(0xc6, "ifnull"),
    op!(0xc7, "ifnonnull"),
    op!(0xc8, "goto_w"),
    op!(0xc9, "jsr_w"),
];

/// Read-only view of an opcode table.
///
/// The catalog is passed explicitly to code that turns disassembly text into
/// instructions, rather than being reached through global state.
#[derive(Clone, Copy, Debug)]
pub struct OpcodeCatalog {
    table: &'static [OpcodeInfo],
}

impl OpcodeCatalog {
    /// The JVM instruction set.
    pub const fn jvm() -> Self {
        Self {
            table: &JVM_OPCODES,
        }
    }

    /// Look up an opcode by its numeric value.
    pub fn lookup(&self, code: u8) -> Option<Opcode> {
        self.table
            .get(code as usize)
            .filter(|info| info.opcode.raw() == code)
            .map(|info| info.opcode)
    }

    /// Look up an opcode by mnemonic. Matching is exact (mnemonics are
    /// lowercase, as javap prints them).
    pub fn by_mnemonic(&self, mnemonic: &str) -> Option<Opcode> {
        self.table
            .iter()
            .find(|info| info.mnemonic == mnemonic)
            .map(|info| info.opcode)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static OpcodeInfo> + use<> {
        self.table.iter()
    }
}

impl Default for OpcodeCatalog {
    fn default() -> Self {
        Self::jvm()
    }
}

/// Look up a JVM opcode by numeric value.
pub fn lookup(code: u8) -> Option<Opcode> {
    OpcodeCatalog::jvm().lookup(code)
}

/// Look up a JVM opcode by mnemonic.
pub fn lookup_mnemonic(mnemonic: &str) -> Option<Opcode> {
    OpcodeCatalog::jvm().by_mnemonic(mnemonic)
}

/// The full JVM opcode table, ordered by opcode value.
pub fn opcode_table() -> &'static [OpcodeInfo] {
    &JVM_OPCODES
}

pub fn opcode_count() -> usize {
    JVM_OPCODES.len()
}
