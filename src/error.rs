//! # Error Types
//!
//! This module defines the error type shared by the encoder, formatter,
//! transport and printer façade. Every kind propagates synchronously to the
//! caller of [`Printer::print`](crate::printer::Printer::print); nothing is
//! retried.

use std::io;

use thiserror::Error;

/// Main error type for ticket printing
#[derive(Debug, Error)]
pub enum PrinterError {
    /// Raster is wider than the printer line buffer allows
    #[error("Image too wide: {width} dots exceeds maximum of {max}")]
    WidthExceeded { width: usize, max: usize },

    /// Ticket rendering failed (QR generation, layout)
    #[error("Format error: {0}")]
    Format(String),

    /// Writing to the device failed; the job is considered lost
    #[error("Write failed: {0}")]
    Write(#[source] io::Error),

    /// Connection closed in the middle of an acknowledgement frame
    #[error("Short read: connection closed while reading {0}")]
    ShortRead(&'static str),

    /// Acknowledgement length prefix too small to cover itself
    #[error("Invalid frame: length prefix {0} is smaller than 2")]
    InvalidFrame(u16),

    /// Device could not be opened or configured
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
