//! # Code Generation
//!
//! Converts programs to printer bytes.

use super::ops::{Op, Program};
use crate::protocol::commands::LF;

impl Program {
    /// Compile the program to the bytes sent to the printer.
    ///
    /// The completion marker is not included; the transport appends it.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for op in &self.ops {
            match op {
                Op::Macro(m) => out.extend_from_slice(m.bytes()),
                Op::Text(s) => out.extend_from_slice(s.as_bytes()),
                Op::Newline => out.push(LF),
                Op::Bitmap(bands) => out.extend_from_slice(bands),
            }
        }
        out
    }

    /// Number of bytes [`to_bytes`](Self::to_bytes) will produce.
    pub fn byte_len(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Macro(m) => m.bytes().len(),
                Op::Text(s) => s.len(),
                Op::Newline => 1,
                Op::Bitmap(bands) => bands.len(),
            })
            .sum()
    }
}
