//! Case tables carried by `tableswitch` and `lookupswitch`.

use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// Label of one switch case: a literal key or the default branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseLabel {
    Value(i32),
    Default,
}

impl fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseLabel::Value(v) => fmt::Display::fmt(v, f),
            CaseLabel::Default => f.pad("default"),
        }
    }
}

impl FromStr for CaseLabel {
    type Err = BuildError;

    /// Parses a javap case label: an integer key or `default`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "default" {
            return Ok(CaseLabel::Default);
        }
        s.parse()
            .map(CaseLabel::Value)
            .map_err(|_| BuildError::InvalidCaseLabel(s.to_owned()))
    }
}

/// One `label: target` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwitchCase {
    pub label: CaseLabel,
    /// Bytecode offset the case branches to.
    pub target: u32,
}

impl SwitchCase {
    pub const fn new(key: i32, target: u32) -> Self {
        Self {
            label: CaseLabel::Value(key),
            target,
        }
    }

    pub const fn default_branch(target: u32) -> Self {
        Self {
            label: CaseLabel::Default,
            target,
        }
    }
}

/// Ordered case table of a switch instruction.
///
/// Entries keep the order the disassembler listed them in, including the
/// position of the default branch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SwitchTable {
    cases: Vec<SwitchCase>,
}

impl SwitchTable {
    pub fn new(cases: Vec<SwitchCase>) -> Self {
        Self { cases }
    }

    pub fn push(&mut self, case: SwitchCase) {
        self.cases.push(case);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[SwitchCase] {
        &self.cases
    }

    pub fn get(&self, index: usize) -> Option<&SwitchCase> {
        self.cases.get(index)
    }

    /// Target of the default branch, if the table lists one.
    pub fn default_target(&self) -> Option<u32> {
        self.cases
            .iter()
            .find(|c| c.label == CaseLabel::Default)
            .map(|c| c.target)
    }

    fn label_width(&self) -> usize {
        self.cases
            .iter()
            .map(|c| c.label.to_string().len())
            .max()
            .unwrap_or(0)
    }

    /// Render case `index` as one listing line.
    ///
    /// Labels are indented past the `offset: ` column of the owning
    /// instruction and right-aligned against each other, so the colons line
    /// up the way javap prints them.
    pub fn render_case(&self, index: usize, offset_width: usize) -> Option<String> {
        let case = self.cases.get(index)?;
        let indent = offset_width + 4;
        let label_width = self.label_width();
        Some(format!(
            "{:indent$}{:>label_width$}: {}",
            "", case.label, case.target
        ))
    }
}

impl FromIterator<SwitchCase> for SwitchTable {
    fn from_iter<I: IntoIterator<Item = SwitchCase>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for SwitchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cases.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, case) in self.cases.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", case.label, case.target)?;
        }
        f.write_str(" }")
    }
}
