//! # usdx-printer - Registration Ticket Printing
//!
//! Turns "print a ticket for ID 42 / PIN 0007" into the byte stream a serial
//! ESC/POS-style thermal printer understands, and writes it to the device.
//!
//! - **Protocol**: the formatting macro table and banded bitmap transfer
//! - **Rendering**: QR codes rasterized at a fixed scale
//! - **Tickets**: the fixed desk ticket layout
//! - **Transport**: raw serial line, completion marker, acknowledgement frames
//! - **Printer**: a lock-guarded façade with a no-op variant
//!
//! ## Quick Start
//!
//! ```no_run
//! use usdx_printer::printer::{self, PrinterConfig};
//! use usdx_printer::ticket::registration_url;
//!
//! let printer = printer::open(&PrinterConfig::serial("/dev/ttyUSB0"))?;
//!
//! let base = "http://karaoke.example";
//! printer.print("42", "0007", base, &registration_url(base, "42", "0007"))?;
//! # Ok::<(), usdx_printer::PrinterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Macros, completion marker, bitmap bands |
//! | [`render`] | Monochrome rasters and QR codes |
//! | [`ir`] | Formatted streams (ops → bytes) |
//! | [`ticket`] | Ticket jobs and the formatter |
//! | [`transport`] | Serial link and acknowledgement framing |
//! | [`printer`] | Printer trait, serial and null variants, config |
//! | [`error`] | Error types |

pub mod error;
pub mod ir;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod ticket;
pub mod transport;

// Re-exports for convenience
pub use error::PrinterError;
pub use printer::{NullPrinter, Printer, PrinterConfig, SerialPrinter};
pub use ticket::{Formatter, TicketJob};
pub use transport::SerialTransport;
