//! # Serial Line Transport
//!
//! The ticket printer hangs off a USB serial adapter (usually
//! `/dev/ttyUSB0`). The line is configured once when the transport is
//! opened and then owned by the printer for the life of the process.
//!
//! ## TTY Configuration
//!
//! | Setting | Value |
//! |---------|-------|
//! | Baud | 19200 (configurable) |
//! | Framing | 8 data bits, 1 stop bit, no parity |
//! | Flow control | none (DC1 shows up as data and is filtered on read) |
//! | VMIN | 1 byte |
//! | VTIME | 10 (1 second between characters) |
//!
//! The device is opened in raw mode so escape codes and bitmap bytes are
//! sent unmodified.
//!
//! ## Writes
//!
//! Every [`write`](Transport::write) sends the formatted stream followed by
//! the 4-byte completion marker. A write error leaves the job in an unknown
//! state on the device; it is reported and never resent.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use super::Transport;
use super::ack::{self, AckFrame};
use crate::error::PrinterError;
use crate::protocol::commands::COMPLETION_MARKER;

/// Default serial device path
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";

/// Default baud rate
pub const DEFAULT_BAUD: u32 = 19200;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Line settings applied when the device is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    pub baud: u32,
    /// Minimum bytes per read (VMIN)
    pub min_read: u8,
    /// Inter-character read timeout in tenths of a second (VTIME)
    pub read_timeout_ds: u8,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud: DEFAULT_BAUD,
            min_read: 1,
            read_timeout_ds: 10,
        }
    }
}

/// # Serial Printer Transport
///
/// Generic over the underlying stream so tests can run against in-memory
/// buffers; [`SerialTransport::open`] gives the real device.
///
/// ## Example
///
/// ```no_run
/// use usdx_printer::transport::{SerialSettings, SerialTransport, Transport};
///
/// let mut transport = SerialTransport::open("/dev/ttyUSB0", &SerialSettings::default())?;
/// transport.write(b"hello\n\x0c")?;
/// # Ok::<(), usdx_printer::PrinterError>(())
/// ```
pub struct SerialTransport<S = File> {
    port: S,
    chunk_size: usize,
}

impl SerialTransport<File> {
    /// Open and configure a serial device.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - The baud rate is not supported
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P, settings: &SerialSettings) -> Result<Self, PrinterError> {
        let path = device.as_ref();

        let file = open_options().open(path).map_err(|e| {
            PrinterError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        configure_tty(&file, settings)?;

        log::info!(
            "opened serial device {} at {} baud",
            path.display(),
            settings.baud
        );
        Ok(Self::new(file))
    }
}

impl<S> SerialTransport<S> {
    /// Wrap an already opened stream.
    pub fn new(port: S) -> Self {
        Self {
            port,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    pub fn get_ref(&self) -> &S {
        &self.port
    }

    pub fn into_inner(self) -> S {
        self.port
    }
}

impl<S: Write> SerialTransport<S> {
    fn write_chunked(&mut self, data: &[u8]) -> Result<(), PrinterError> {
        for chunk in data.chunks(self.chunk_size) {
            self.port.write_all(chunk).map_err(PrinterError::Write)?;
        }
        Ok(())
    }
}

impl<S: Read + Write + Send> Transport for SerialTransport<S> {
    fn write(&mut self, stream: &[u8]) -> Result<(), PrinterError> {
        self.write_chunked(stream)?;
        self.port
            .write_all(&COMPLETION_MARKER)
            .map_err(PrinterError::Write)?;
        self.port.flush().map_err(PrinterError::Write)?;

        log::debug!("wrote {} bytes + completion marker", stream.len());
        Ok(())
    }

    fn read_ack(&mut self) -> Result<AckFrame, PrinterError> {
        let frame = ack::read_ack(&mut self.port)?;
        log::debug!(
            "read acknowledgement frame ({} byte payload)",
            frame.payload.len()
        );
        Ok(frame)
    }
}

#[cfg(unix)]
fn open_options() -> OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.read(true).write(true).custom_flags(libc::O_NOCTTY);
    options
}

#[cfg(not(unix))]
fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true);
    options
}

/// Map a baud rate to its termios speed constant.
#[cfg(unix)]
fn speed(baud: u32) -> Result<libc::speed_t, PrinterError> {
    Ok(match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        other => {
            return Err(PrinterError::Config(format!(
                "Unsupported baud rate {}",
                other
            )));
        }
    })
}

/// Configure a serial device for raw 8N1 communication.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB, CSTOPB, CRTSCTS (then CS8 | CREAD | CLOCAL)
///
/// IXON/IXOFF stay off: bitmap bands routinely contain 0x11 and 0x13.
#[cfg(unix)]
fn configure_tty(file: &File, settings: &SerialSettings) -> Result<(), PrinterError> {
    use std::io;
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    let speed = speed(settings.baud)?;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(PrinterError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB | libc::CSTOPB | libc::CRTSCTS);
    termios.c_cflag |= libc::CS8 | libc::CREAD | libc::CLOCAL;

    termios.c_cc[libc::VMIN] = settings.min_read as libc::cc_t;
    termios.c_cc[libc::VTIME] = settings.read_timeout_ds as libc::cc_t;

    let result = unsafe { libc::cfsetispeed(&mut termios, speed) };
    let result = result | unsafe { libc::cfsetospeed(&mut termios, speed) };
    if result != 0 {
        return Err(PrinterError::Transport(format!(
            "cfsetspeed failed: {}",
            io::Error::last_os_error()
        )));
    }

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(PrinterError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty(_file: &File, _settings: &SerialSettings) -> Result<(), PrinterError> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// In-memory line: reads from `rx`, records writes in `tx`.
    #[derive(Default)]
    struct Loopback {
        rx: Cursor<Vec<u8>>,
        tx: Vec<u8>,
        writes: usize,
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.rx.read(buf)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            self.tx.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Fails every write.
    struct Unplugged;

    impl Read for Unplugged {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for Unplugged {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = SerialSettings::default();
        assert_eq!(settings.baud, 19200);
        assert_eq!(settings.min_read, 1);
        assert_eq!(settings.read_timeout_ds, 10);
        assert_eq!(DEFAULT_DEVICE, "/dev/ttyUSB0");
    }

    #[test]
    fn test_write_appends_completion_marker() {
        let mut transport = SerialTransport::new(Loopback::default());
        transport.write(b"abc").unwrap();

        assert_eq!(
            transport.get_ref().tx,
            vec![b'a', b'b', b'c', 0x1B, 0x00, 0x80, 0x00]
        );
    }

    #[test]
    fn test_write_empty_stream_sends_marker() {
        let mut transport = SerialTransport::new(Loopback::default());
        transport.write(&[]).unwrap();
        assert_eq!(transport.get_ref().tx, COMPLETION_MARKER.to_vec());
    }

    #[test]
    fn test_large_write_is_chunked() {
        let mut transport = SerialTransport::new(Loopback::default());
        transport.set_chunk_size(10);
        transport.write(&[0x42; 25]).unwrap();

        let port = transport.into_inner();
        // 3 chunks + marker
        assert_eq!(port.writes, 4);
        assert_eq!(port.tx.len(), 29);
    }

    #[test]
    fn test_write_error() {
        let mut transport = SerialTransport::new(Unplugged);
        let err = transport.write(b"abc").unwrap_err();
        assert!(matches!(err, PrinterError::Write(_)));
    }

    #[test]
    fn test_read_ack_filters_flow_control() {
        let port = Loopback {
            rx: Cursor::new(vec![0x11, 0x00, 0x11, 0x04, 0x11, 0xAB, 0xCD]),
            ..Default::default()
        };
        let mut transport = SerialTransport::new(port);
        let frame = transport.read_ack().unwrap();

        assert_eq!(frame.length, 4);
        assert_eq!(frame.payload, vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_read_ack_short_read() {
        let mut transport = SerialTransport::new(Unplugged);
        assert!(matches!(
            transport.read_ack(),
            Err(PrinterError::ShortRead("length"))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_supported_speeds() {
        assert_eq!(speed(19200).unwrap(), libc::B19200);
        assert_eq!(speed(9600).unwrap(), libc::B9600);
        assert!(matches!(speed(12345), Err(PrinterError::Config(_))));
    }

    #[test]
    fn test_open_missing_device() {
        let result = SerialTransport::open(
            "/nonexistent/usdx-printer-test",
            &SerialSettings::default(),
        );
        assert!(matches!(result, Err(PrinterError::Transport(_))));
    }
}
