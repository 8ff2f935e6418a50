//! # Printer Transport Layer
//!
//! This module provides the link between formatted tickets and the device.
//!
//! ## Available Transports
//!
//! - [`serial`]: Raw serial line (USB adapter, 19200 8N1)
//!
//! ## Framing
//!
//! - [`ack`]: Length-framed acknowledgement reader with DC1 filtering

pub mod ack;
pub mod serial;

pub use ack::{AckFrame, FlowControlFilter};
pub use serial::{SerialSettings, SerialTransport};

use crate::error::PrinterError;

/// A byte link to one printer.
///
/// Implementations are owned by a single [`SerialPrinter`], which serializes
/// access, so methods take `&mut self`.
///
/// [`SerialPrinter`]: crate::printer::SerialPrinter
pub trait Transport: Send {
    /// Write a formatted stream followed by the completion marker.
    fn write(&mut self, stream: &[u8]) -> Result<(), PrinterError>;

    /// Block until one acknowledgement frame has been read.
    fn read_ack(&mut self) -> Result<AckFrame, PrinterError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, stream: &[u8]) -> Result<(), PrinterError> {
        (**self).write(stream)
    }

    fn read_ack(&mut self) -> Result<AckFrame, PrinterError> {
        (**self).read_ack()
    }
}
