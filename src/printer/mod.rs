//! # Printer Façade
//!
//! The one entry point the registration service calls for each new ticket:
//! [`Printer::print`]. Two variants exist, picked by [`PrinterConfig`]:
//!
//! - [`SerialPrinter`]: formats the ticket and writes it to a [`Transport`]
//! - [`NullPrinter`]: logs the job and succeeds, for sites without hardware
//!
//! ## States
//!
//! ```text
//!        print()            format + write done
//! Idle ──────────► Printing ───────────────────► Idle
//!                      │        (or any error)
//!                      └───────────────────────► Idle
//! ```
//!
//! A lock around the transport allows one job at a time. Concurrent callers
//! block until it is free; the order in which waiting callers get the lock
//! is not defined. There is no timeout: a stuck write blocks every caller.
//!
//! - [`config`]: Backend selection and settings

pub mod config;

pub use config::{Backend, PrinterConfig};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::PrinterError;
use crate::ticket::{Formatter, TicketJob};
use crate::transport::{SerialTransport, Transport};

/// Prints registration tickets.
pub trait Printer: Send + Sync {
    /// Print one ticket. Blocks for formatting plus the full write.
    fn print(
        &self,
        id: &str,
        pin: &str,
        registration_base: &str,
        registration_url: &str,
    ) -> Result<(), PrinterError>;
}

/// Whether a job currently holds the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterState {
    Idle,
    Printing,
}

/// Build the printer selected by `config`.
///
/// Opens the serial device for [`Backend::Serial`]; the returned printer
/// owns it for the rest of the process.
pub fn open(config: &PrinterConfig) -> Result<Box<dyn Printer>, PrinterError> {
    match &config.backend {
        Backend::Serial { device } => {
            let transport = SerialTransport::open(device, &config.serial)?;
            let printer = SerialPrinter::new(transport)
                .with_formatter(Formatter::new(config.layout.clone()))
                .await_ack(config.await_ack);
            Ok(Box::new(printer))
        }
        Backend::Null => {
            log::info!("no printer configured, tickets will only be logged");
            Ok(Box::new(NullPrinter))
        }
    }
}

/// Printer that never touches hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPrinter;

impl Printer for NullPrinter {
    fn print(
        &self,
        id: &str,
        pin: &str,
        registration_base: &str,
        registration_url: &str,
    ) -> Result<(), PrinterError> {
        log::info!(
            "printing ticket id={} pin={} regBase={} regURL={}",
            id,
            pin,
            registration_base,
            registration_url
        );
        Ok(())
    }
}

/// Printer on a shared transport, one job at a time.
pub struct SerialPrinter<T> {
    transport: Mutex<T>,
    printing: AtomicBool,
    formatter: Formatter,
    await_ack: bool,
}

/// Marks the printer busy until dropped.
struct Busy<'a>(&'a AtomicBool);

impl<'a> Busy<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: Transport> SerialPrinter<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            printing: AtomicBool::new(false),
            formatter: Formatter::default(),
            await_ack: false,
        }
    }

    /// Use a custom ticket layout.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Wait for an acknowledgement frame after each job.
    pub fn await_ack(mut self, enabled: bool) -> Self {
        self.await_ack = enabled;
        self
    }

    pub fn state(&self) -> PrinterState {
        if self.printing.load(Ordering::Acquire) {
            PrinterState::Printing
        } else {
            PrinterState::Idle
        }
    }

    /// Print a prepared job.
    pub fn print_job(&self, job: &TicketJob) -> Result<(), PrinterError> {
        // A panic in another job leaves the transport usable
        let mut transport = self
            .transport
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _busy = Busy::enter(&self.printing);

        log::info!(
            "printing ticket id={} pin={} regBase={} regURL={}",
            job.id,
            job.pin,
            job.registration_base,
            job.registration_url
        );

        let program = self.formatter.format(job)?;
        let bytes = program.to_bytes();
        log::debug!("ticket {} formatted to {} bytes", job.id, bytes.len());

        transport.write(&bytes)?;

        if self.await_ack {
            let frame = transport.read_ack()?;
            log::info!(
                "ticket {} acknowledged ({} byte payload)",
                job.id,
                frame.payload.len()
            );
        }

        Ok(())
    }

    pub fn into_transport(self) -> T {
        self.transport
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Transport> Printer for SerialPrinter<T> {
    fn print(
        &self,
        id: &str,
        pin: &str,
        registration_base: &str,
        registration_url: &str,
    ) -> Result<(), PrinterError> {
        let job = TicketJob::new(id, pin, registration_base, registration_url);
        self.print_job(&job).inspect_err(|e| {
            log::error!("failed to print ticket id={} pin={}: {}", id, pin, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::COMPLETION_MARKER;
    use crate::transport::AckFrame;

    /// Records every write; answers acks from a fixed list.
    #[derive(Default)]
    struct Recorder {
        writes: Vec<Vec<u8>>,
        acks: Vec<AckFrame>,
        fail_writes: bool,
    }

    impl Transport for Recorder {
        fn write(&mut self, stream: &[u8]) -> Result<(), PrinterError> {
            if self.fail_writes {
                return Err(PrinterError::Write(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "gone",
                )));
            }
            let mut bytes = stream.to_vec();
            bytes.extend(COMPLETION_MARKER);
            self.writes.push(bytes);
            Ok(())
        }

        fn read_ack(&mut self) -> Result<AckFrame, PrinterError> {
            if self.acks.is_empty() {
                Err(PrinterError::ShortRead("length"))
            } else {
                Ok(self.acks.remove(0))
            }
        }
    }

    #[test]
    fn test_null_printer_always_succeeds() {
        assert!(NullPrinter.print("1", "2", "b", "u").is_ok());
        assert!(NullPrinter.print("", "", "", "").is_ok());
    }

    #[test]
    fn test_print_writes_one_stream() {
        let printer = SerialPrinter::new(Recorder::default());
        printer
            .print("42", "0007", "http://example", "http://example/reg")
            .unwrap();

        let writes = printer.into_transport().writes;
        assert_eq!(writes.len(), 1);
        assert!(writes[0].starts_with(&[0x1B, 0x21, 0x10, 0x1B, 0x61, 0x00]));
        assert!(writes[0].ends_with(&[0x0C, 0x1B, 0x00, 0x80, 0x00]));
    }

    #[test]
    fn test_format_failure_writes_nothing() {
        let printer = SerialPrinter::new(Recorder::default());
        let url = "x".repeat(5000);
        let err = printer.print("1", "2", "b", &url).unwrap_err();

        assert!(matches!(err, PrinterError::Format(_)));
        assert_eq!(printer.state(), PrinterState::Idle);
        assert!(printer.into_transport().writes.is_empty());
    }

    #[test]
    fn test_write_failure_returns_to_idle() {
        let printer = SerialPrinter::new(Recorder {
            fail_writes: true,
            ..Default::default()
        });
        let err = printer.print("1", "2", "b", "u").unwrap_err();

        assert!(matches!(err, PrinterError::Write(_)));
        assert_eq!(printer.state(), PrinterState::Idle);
        // Lock was released: a second job can run
        assert!(printer.print("1", "2", "b", "u").is_err());
    }

    #[test]
    fn test_ack_not_read_by_default() {
        let printer = SerialPrinter::new(Recorder::default());
        // No acks queued; would fail with ShortRead if it were read
        assert!(printer.print("1", "2", "b", "u").is_ok());
    }

    #[test]
    fn test_await_ack() {
        let printer = SerialPrinter::new(Recorder {
            acks: vec![AckFrame {
                length: 3,
                payload: vec![0x00],
            }],
            ..Default::default()
        })
        .await_ack(true);

        assert!(printer.print("1", "2", "b", "u").is_ok());
        let err = printer.print("1", "2", "b", "u").unwrap_err();
        assert!(matches!(err, PrinterError::ShortRead(_)));
        assert_eq!(printer.into_transport().writes.len(), 2);
    }

    #[test]
    fn test_starts_idle() {
        let printer = SerialPrinter::new(Recorder::default());
        assert_eq!(printer.state(), PrinterState::Idle);
    }

    #[test]
    fn test_open_null_backend() {
        let printer = open(&PrinterConfig::null()).unwrap();
        assert!(printer.print("1", "2", "b", "u").is_ok());
    }

    #[test]
    fn test_open_dot_device_does_not_touch_hardware() {
        let printer = open(&PrinterConfig::from_device(".")).unwrap();
        assert!(printer.print("1", "2", "b", "u").is_ok());
    }

    #[test]
    fn test_open_missing_device_fails() {
        let config = PrinterConfig::serial("/nonexistent/usdx-printer-test");
        assert!(matches!(open(&config), Err(PrinterError::Transport(_))));
    }
}
