//! # Rendering Module
//!
//! Monochrome rasters that feed the bitmap encoder.
//!
//! ## Modules
//!
//! - [`bitmap`]: The [`Raster`] trait and an owned [`Bitmap`]
//! - [`qr`]: QR code generation at the ticket's fixed module scale
//!
//! ## Usage Example
//!
//! ```
//! use usdx_printer::render::{qr, Raster};
//! use usdx_printer::protocol::graphics;
//!
//! let code = qr::generate("http://example/index#edit/42/0007", qr::QrErrorLevel::L)?;
//! assert!(code.width() <= graphics::MAX_WIDTH_DOTS);
//!
//! let bands = graphics::encode(&code)?;
//! assert_eq!(&bands[0..3], &[0x1B, 0x2A, 0x02]);
//! # Ok::<(), usdx_printer::PrinterError>(())
//! ```

pub mod bitmap;
pub mod qr;

pub use bitmap::{Bitmap, Raster};
