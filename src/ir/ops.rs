//! # Stream Ops
//!
//! A formatted ticket is a flat sequence of ops. Style changes are macros
//! from the fixed table; bitmaps are carried already encoded so that a
//! program holds everything needed to produce its bytes.

use crate::protocol::commands::Macro;

/// One chunk of a formatted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Formatting escape sequence from the macro table.
    Macro(Macro),

    /// Literal text, sent as UTF-8.
    Text(String),

    /// Line feed.
    Newline,

    /// Encoded bitmap bands (header + data per band).
    Bitmap(Vec<u8>),
}

/// An ordered, ready-to-send stream of ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program starting with the reset macro.
    pub fn with_reset() -> Self {
        Self {
            ops: vec![Op::Macro(Macro::Reset)],
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Append a macro.
    pub fn style(&mut self, m: Macro) {
        self.push(Op::Macro(m));
    }

    /// Append literal text.
    pub fn text(&mut self, s: impl Into<String>) {
        self.push(Op::Text(s.into()));
    }

    /// Append a line feed.
    pub fn newline(&mut self) {
        self.push(Op::Newline);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
