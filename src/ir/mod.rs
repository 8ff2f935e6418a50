//! # Formatted Streams
//!
//! A ticket is formatted into a [`Program`]: an ordered list of [`Op`]s
//! (text, line feeds, macros, encoded bitmaps) that compiles to the exact
//! byte stream written to the printer.
//!
//! ```text
//! ┌────────────┐     ┌─────────────┐     ┌──────────┐     ┌───────────┐
//! │ TicketJob  │ ──► │   Program   │ ──► │ Codegen  │ ──► │ Transport │
//! │            │     │  (Vec<Op>)  │     │ (bytes)  │     │ (+marker) │
//! └────────────┘     └─────────────┘     └──────────┘     └───────────┘
//! ```
//!
//! Keeping the ops around instead of writing bytes directly makes ticket
//! output inspectable in tests (`{:#?}`) without decoding escape codes.
//!
//! ## Example
//!
//! ```
//! use usdx_printer::ir::{Op, Program};
//! use usdx_printer::protocol::commands::Macro;
//!
//! let mut program = Program::with_reset();
//! program.push(Op::Macro(Macro::Center));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::Macro(Macro::Cut));
//!
//! let bytes = program.to_bytes();
//! assert_eq!(bytes.last(), Some(&0x0C));
//! ```

mod codegen;
mod ops;

pub use ops::*;
