//! # Printer Configuration
//!
//! Selects which [`Printer`](super::Printer) variant is built at startup and
//! how it is set up.
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `backend` | `Serial { /dev/ttyUSB0 }` | Real device or no-op (device `.`) |
//! | `serial` | 19200 baud, VMIN 1, VTIME 10 | Line settings |
//! | `await_ack` | `false` | Wait for an acknowledgement frame per job |
//! | `layout` | German desk ticket | Fixed ticket text |
//!
//! ## Usage
//!
//! ```
//! use usdx_printer::printer::{Backend, PrinterConfig};
//!
//! let config = PrinterConfig::serial("/dev/ttyUSB1");
//! assert_eq!(config.serial.baud, 19200);
//! assert!(matches!(config.backend, Backend::Serial { .. }));
//!
//! let dry_run = PrinterConfig::null();
//! assert_eq!(dry_run.backend, Backend::Null);
//!
//! // A device path of "." means there is no printer
//! assert_eq!(PrinterConfig::from_device(".").backend, Backend::Null);
//! ```

use std::path::{Path, PathBuf};

use crate::ticket::TicketLayout;
use crate::transport::SerialSettings;
use crate::transport::serial::DEFAULT_DEVICE;

/// Device path that selects [`Backend::Null`].
pub const NULL_DEVICE: &str = ".";

/// Which printer implementation to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Physical printer on a serial device.
    Serial { device: PathBuf },
    /// No hardware; jobs are only logged.
    Null,
}

/// # Printer Configuration
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub backend: Backend,
    pub serial: SerialSettings,
    /// Block after each job until the device answers with a frame.
    /// Off in production: it is not known whether the firmware replies.
    pub await_ack: bool,
    pub layout: TicketLayout,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::serial(DEFAULT_DEVICE)
    }
}

impl PrinterConfig {
    /// Serial printer on `device` with default settings.
    pub fn serial(device: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Serial {
                device: device.into(),
            },
            serial: SerialSettings::default(),
            await_ack: false,
            layout: TicketLayout::default(),
        }
    }

    /// Pick the backend from a configured device path: [`NULL_DEVICE`]
    /// gives the no-op printer, anything else a serial printer.
    pub fn from_device(device: impl Into<PathBuf>) -> Self {
        let device = device.into();
        if device == Path::new(NULL_DEVICE) {
            Self::null()
        } else {
            Self::serial(device)
        }
    }

    /// No-op printer for sites without hardware.
    pub fn null() -> Self {
        Self {
            backend: Backend::Null,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_serial_usb0() {
        let config = PrinterConfig::default();
        assert_eq!(
            config.backend,
            Backend::Serial {
                device: PathBuf::from("/dev/ttyUSB0")
            }
        );
        assert!(!config.await_ack);
        assert_eq!(config.serial, SerialSettings::default());
    }

    #[test]
    fn test_dot_device_selects_null() {
        assert_eq!(PrinterConfig::from_device(".").backend, Backend::Null);
        assert_eq!(PrinterConfig::from_device("./").backend, Backend::Null);
    }

    #[test]
    fn test_from_device_keeps_real_paths() {
        assert_eq!(
            PrinterConfig::from_device("/dev/ttyUSB1").backend,
            Backend::Serial {
                device: PathBuf::from("/dev/ttyUSB1")
            }
        );
        assert_eq!(
            PrinterConfig::from_device("./tty").backend,
            Backend::Serial {
                device: PathBuf::from("./tty")
            }
        );
    }

    #[test]
    fn test_null_keeps_other_defaults() {
        let config = PrinterConfig::null();
        assert_eq!(config.backend, Backend::Null);
        assert_eq!(config.layout, TicketLayout::default());
    }
}
