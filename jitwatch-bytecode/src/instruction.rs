use std::fmt;

use jitwatch_isa::Opcode;

use crate::builder::InstructionBuilder;
use crate::format::{align_left, align_right, decimal_width};
use crate::param::InstructionParam;
use crate::switch::SwitchTable;

/// javap comment prefix on `invokevirtual`/`invokespecial`/`invokestatic`.
pub const METHOD_COMMENT: &str = "// Method";
/// javap comment prefix on `invokeinterface`.
pub const INTERFACE_METHOD_COMMENT: &str = "// InterfaceMethod";

const MNEMONIC_WIDTH: usize = 16;
const PARAMS_WIDTH: usize = 5;

/// Strip a leading member-reference prefix (`// Method`,
/// `// InterfaceMethod`) and the whitespace around what follows it.
///
/// Text without a recognised prefix is returned unchanged. Applying the
/// function to its own output is a no-op.
pub fn strip_member_prefix(comment: &str) -> &str {
    let mut current = comment;
    loop {
        let rest = current
            .strip_prefix(INTERFACE_METHOD_COMMENT)
            .or_else(|| current.strip_prefix(METHOD_COMMENT));
        match rest {
            Some(rest) => current = rest.trim(),
            None => return current,
        }
    }
}

/// A single disassembled instruction.
///
/// Built through [`InstructionBuilder`]; once sealed it has no mutators.
/// Equality and hashing are structural, so two instructions built from the
/// same disassembly line compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BytecodeInstruction {
    offset: u32,
    opcode: Opcode,
    parameters: Vec<InstructionParam>,
    comment: Option<String>,
}

impl BytecodeInstruction {
    pub(crate) fn from_parts(
        offset: u32,
        opcode: Opcode,
        parameters: Vec<InstructionParam>,
        comment: Option<String>,
    ) -> Self {
        Self {
            offset,
            opcode,
            parameters,
            comment,
        }
    }

    /// Start building the instruction at `offset`.
    pub fn builder(offset: u32) -> InstructionBuilder {
        InstructionBuilder::new(offset)
    }

    /// Byte offset within the method's code.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn parameters(&self) -> &[InstructionParam] {
        &self.parameters
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// True when a comment was assigned, even an empty one.
    pub fn has_comment(&self) -> bool {
        self.comment.is_some()
    }

    /// The comment with any `// Method` / `// InterfaceMethod` prefix removed.
    pub fn comment_with_member_prefix_stripped(&self) -> Option<&str> {
        self.comment.as_deref().map(strip_member_prefix)
    }

    pub fn is_invoke(&self) -> bool {
        self.opcode.is_invoke()
    }

    pub fn is_switch(&self) -> bool {
        self.opcode.is_switch()
    }

    /// The case table, when the parameters are exactly one switch table.
    pub fn switch_table(&self) -> Option<&SwitchTable> {
        match self.parameters.as_slice() {
            [param] => param.as_switch(),
            _ => None,
        }
    }

    /// Number of listing lines this instruction occupies.
    ///
    /// A switch spans its header line, one line per case and a closing brace.
    /// Everything else, including a switch without a usable case table, is a
    /// single line.
    pub fn label_lines(&self) -> usize {
        match self.switch_table() {
            Some(table) if self.is_switch() => 2 + table.len(),
            _ => 1,
        }
    }

    /// Render listing line `line` (in `0..label_lines()`), with the offset
    /// column sized for `max_offset`, the largest offset in the method.
    ///
    /// Malformed input is logged and produces a partial or empty line.
    pub fn render_line(&self, max_offset: u32, line: usize) -> String {
        let lines = self.label_lines();
        if line >= lines {
            log::error!(
                "line {line} out of range for {} at offset {} ({lines} lines)",
                self.opcode,
                self.offset
            );
            return String::new();
        }

        let offset_width = decimal_width(max_offset);
        if self.is_switch() {
            self.render_switch_line(offset_width, line, lines)
        } else {
            self.render_plain(offset_width)
        }
    }

    /// Render every listing line, joined with `\n`.
    pub fn render(&self, max_offset: u32) -> String {
        (0..self.label_lines())
            .map(|line| self.render_line(max_offset, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_plain(&self, offset_width: usize) -> String {
        let mut out = format!("{}: ", align_right(self.offset, offset_width));
        out.push_str(&align_left(self.opcode.mnemonic(), MNEMONIC_WIDTH));

        if self.has_parameters() {
            let params = self
                .parameters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&align_left(params, PARAMS_WIDTH));
        }

        if let Some(comment) = &self.comment {
            out.push_str(comment);
        }

        out
    }

    fn render_switch_line(&self, offset_width: usize, line: usize, lines: usize) -> String {
        if line == 0 {
            let mut out = format!(
                "{}: {} {{",
                align_right(self.offset, offset_width),
                self.opcode.mnemonic()
            );
            if let Some(comment) = &self.comment {
                out.push(' ');
                out.push_str(comment);
            }
            if self.switch_table().is_none() {
                log::error!(
                    "bad parameters on {} at offset {}, cannot render case table",
                    self.opcode,
                    self.offset
                );
            }
            return out;
        }

        if line == lines - 1 {
            return align_right("}", offset_width + 3);
        }

        // lines > 1 only when the table is present.
        match self
            .switch_table()
            .and_then(|table| table.render_case(line - 1, offset_width))
        {
            Some(case) => case,
            None => {
                log::error!(
                    "missing case {} on {} at offset {}",
                    line - 1,
                    self.opcode,
                    self.offset
                );
                String::new()
            }
        }
    }
}

impl fmt::Display for BytecodeInstruction {
    /// First listing line with a one-digit offset column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_line(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_method_prefix() {
        assert_eq!(
            strip_member_prefix("// Method java/lang/Object.\"<init>\":()V"),
            "java/lang/Object.\"<init>\":()V"
        );
        assert_eq!(
            strip_member_prefix("// InterfaceMethod java/util/List.size:()I  "),
            "java/util/List.size:()I"
        );
    }

    #[test]
    fn strip_leaves_other_comments() {
        assert_eq!(strip_member_prefix("// Field count:I"), "// Field count:I");
        assert_eq!(strip_member_prefix("  // Method x"), "  // Method x");
        assert_eq!(strip_member_prefix(""), "");
    }

    #[test]
    fn strip_is_idempotent() {
        for comment in [
            "// Method a.b:()V",
            "// InterfaceMethod // Method c:()V",
            "// String hello",
            "// Method",
            " padded ",
        ] {
            let once = strip_member_prefix(comment);
            assert_eq!(strip_member_prefix(once), once, "{comment:?}");
        }
    }
}
