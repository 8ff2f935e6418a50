//! # Ticket Printer Protocol
//!
//! Low-level byte builders for the serial ticket printer.
//!
//! ## Module Structure
//!
//! - [`commands`]: Control bytes, the formatting macro table and the job
//!   completion marker
//! - [`graphics`]: Banded bitmap transfer
//!
//! ## Usage Example
//!
//! ```
//! use usdx_printer::protocol::{commands::{Macro, COMPLETION_MARKER}, graphics};
//! use usdx_printer::render::Bitmap;
//!
//! let mut data = Vec::new();
//! data.extend(Macro::Reset.bytes());
//! data.extend(Macro::Center.bytes());
//! data.extend(graphics::encode(&Bitmap::from_fn(16, 16, |_, _| true))?);
//! data.extend(Macro::Cut.bytes());
//! data.extend(COMPLETION_MARKER);
//! # Ok::<(), usdx_printer::PrinterError>(())
//! ```

pub mod commands;
pub mod graphics;
