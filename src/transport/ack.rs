//! # Acknowledgement Frames
//!
//! After a job the printer can answer with a length-framed message:
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────────────┐
//! │ len (hi) │ len (lo) │ payload (len - 2 bytes) │
//! └──────────┴──────────┴─────────────────────────┘
//! ```
//!
//! The length is big-endian and counts its own two bytes. The device
//! sprinkles DC1 (`0x11`) flow-control bytes anywhere in its output, so
//! they are stripped with [`FlowControlFilter`] before the frame is parsed.
//! A DC1 can therefore never be part of a payload.
//!
//! Whether the firmware actually sends such a frame when a job completes is
//! unconfirmed; production printing does not wait for one unless
//! `await_ack` is enabled.

use std::io::{self, Read};

use crate::error::PrinterError;
use crate::protocol::commands::FLOW_CONTROL;

/// One acknowledgement frame read from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckFrame {
    /// Length prefix as sent, including the prefix itself.
    pub length: u16,
    pub payload: Vec<u8>,
}

/// Reader adapter that drops every occurrence of one byte.
pub struct FlowControlFilter<R> {
    inner: R,
    byte: u8,
}

impl<R: Read> FlowControlFilter<R> {
    /// Filter out the DC1 flow-control byte.
    pub fn new(inner: R) -> Self {
        Self::dropping(inner, FLOW_CONTROL)
    }

    /// Filter out an arbitrary byte.
    pub fn dropping(inner: R, byte: u8) -> Self {
        Self { inner, byte }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for FlowControlFilter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        // A chunk made only of filtered bytes must not look like EOF
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }
            let mut kept = 0;
            for i in 0..n {
                if buf[i] != self.byte {
                    buf[kept] = buf[i];
                    kept += 1;
                }
            }
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}

/// Read one frame from `reader`, stripping flow-control bytes first.
///
/// ```
/// use usdx_printer::transport::ack::{read_ack, AckFrame};
///
/// let wire = [0x11, 0x00, 0x11, 0x04, 0x11, 0xAB, 0xCD];
/// let frame = read_ack(&wire[..])?;
/// assert_eq!(frame, AckFrame { length: 4, payload: vec![0xAB, 0xCD] });
/// # Ok::<(), usdx_printer::PrinterError>(())
/// ```
pub fn read_ack<R: Read>(reader: R) -> Result<AckFrame, PrinterError> {
    read_frame(&mut FlowControlFilter::new(reader))
}

/// Read one frame from an already filtered reader.
///
/// ## Errors
///
/// - [`PrinterError::ShortRead`] if the stream ends inside the frame
/// - [`PrinterError::InvalidFrame`] if the length prefix is below 2
pub fn read_frame<R: Read>(reader: &mut R) -> Result<AckFrame, PrinterError> {
    let mut prefix = [0u8; 2];
    fill(reader, &mut prefix, "length")?;

    let length = u16::from_be_bytes(prefix);
    if length < 2 {
        return Err(PrinterError::InvalidFrame(length));
    }

    let mut payload = vec![0u8; length as usize - 2];
    fill(reader, &mut payload, "payload")?;

    Ok(AckFrame { length, payload })
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8], part: &'static str) -> Result<(), PrinterError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PrinterError::ShortRead(part),
        _ => PrinterError::Io(e),
    })
}
