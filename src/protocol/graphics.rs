//! # Banded Bitmap Graphics
//!
//! This module implements the bit image transfer used for the ticket's QR
//! code. The printer only buffers a few lines of graphics, so an image is
//! sent as a series of bands of at most [`BAND_ROWS`] rows each.
//!
//! ## Band Layout
//!
//! | Offset | Value | Meaning |
//! |--------|-------|---------|
//! | 0 | `1B` | ESC |
//! | 1 | `2A` | `*` bit image |
//! | 2 | `02` | mode |
//! | 3 | `w` | width in bytes, `ceil(width / 8)` |
//! | 4 | `h` | height in bytes, `ceil(rows / 8)` |
//! | 5.. | data | `w × h × 8` bytes, row-major |
//!
//! ## Bit Packing
//!
//! Each data byte covers 8 horizontal dots. Bit `i` is set when the dot at
//! `x + (7 - i)` is black, so bit 7 is the leftmost dot:
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```
//!
//! Dots beyond the right edge or below the last row are sent as white.
//! Getting the bit order wrong does not produce an error on the device,
//! just a garbled print.
//!
//! ## Limits
//!
//! | Property | Value |
//! |----------|-------|
//! | Max width | 472 dots (59 bytes) |
//! | Rows per band | 40 (5 bytes) |

use super::commands::ESC;
use crate::error::PrinterError;
use crate::render::{Bitmap, Raster};

/// Bit image command byte following ESC.
pub const BIT_IMAGE: u8 = b'*';

/// Bit image mode used for every band.
pub const BAND_MODE: u8 = 0x02;

/// Maximum image width in bytes.
pub const MAX_WIDTH_BYTES: usize = 59;

/// Maximum image width in dots.
pub const MAX_WIDTH_DOTS: usize = MAX_WIDTH_BYTES * 8;

/// Maximum band height in bytes.
pub const BAND_HEIGHT_BYTES: usize = 5;

/// Maximum rows per band, bounded by the printer line buffer.
pub const BAND_ROWS: usize = BAND_HEIGHT_BYTES * 8;

/// Length of a band header.
pub const HEADER_LEN: usize = 5;

/// Number of bands needed for an image of `height` rows.
///
/// ```
/// use usdx_printer::protocol::graphics::band_count;
///
/// assert_eq!(band_count(0), 0);
/// assert_eq!(band_count(40), 1);
/// assert_eq!(band_count(41), 2);
/// ```
#[inline]
pub fn band_count(height: usize) -> usize {
    height.div_ceil(BAND_ROWS)
}

/// Band header for a band `width_bytes` wide and `height_bytes` tall.
#[inline]
pub fn band_header(width_bytes: u8, height_bytes: u8) -> [u8; HEADER_LEN] {
    [ESC, BIT_IMAGE, BAND_MODE, width_bytes, height_bytes]
}

/// # Encode a Raster as Bitmap Bands
///
/// Splits the image top-to-bottom into bands of [`BAND_ROWS`] rows, the
/// last one possibly shorter, and packs each one behind its header.
///
/// ## Errors
///
/// [`PrinterError::WidthExceeded`] if the image is wider than
/// [`MAX_WIDTH_DOTS`]. Nothing is encoded in that case.
///
/// ## Example
///
/// ```
/// use usdx_printer::protocol::graphics;
/// use usdx_printer::render::Bitmap;
///
/// let black = Bitmap::from_fn(16, 16, |_, _| true);
/// let bytes = graphics::encode(&black)?;
///
/// assert_eq!(&bytes[0..5], &[0x1B, 0x2A, 0x02, 0x02, 0x02]);
/// assert_eq!(bytes.len(), 5 + 32);
/// # Ok::<(), usdx_printer::PrinterError>(())
/// ```
pub fn encode<R: Raster + ?Sized>(image: &R) -> Result<Vec<u8>, PrinterError> {
    let width = image.width();
    if width > MAX_WIDTH_DOTS {
        return Err(PrinterError::WidthExceeded {
            width,
            max: MAX_WIDTH_DOTS,
        });
    }

    let height = image.height();
    let width_bytes = width.div_ceil(8);
    let mut out = Vec::with_capacity(
        band_count(height) * HEADER_LEN + width_bytes * height.next_multiple_of(8),
    );

    let mut y = 0;
    while y < height {
        let rows = (height - y).min(BAND_ROWS);
        encode_band(image, y, rows, &mut out);
        y += rows;
    }

    Ok(out)
}

/// Encode `rows` rows starting at `y_offset` as one band.
fn encode_band<R: Raster + ?Sized>(image: &R, y_offset: usize, rows: usize, out: &mut Vec<u8>) {
    let width = image.width();
    let width_bytes = width.div_ceil(8);
    let height_bytes = rows.div_ceil(8);

    // Both fit in a byte: width is capped at 59 bytes, rows at 5 bytes
    out.extend(band_header(width_bytes as u8, height_bytes as u8));

    for y in 0..height_bytes * 8 {
        for x in (0..width).step_by(8) {
            let mut d = 0u8;
            for i in 0..8 {
                if dot(image, x + (7 - i), y_offset + y) {
                    d |= 1 << i;
                }
            }
            out.push(d);
        }
    }
}

#[inline]
fn dot<R: Raster + ?Sized>(image: &R, x: usize, y: usize) -> bool {
    x < image.width() && y < image.height() && image.is_black(x, y)
}

/// # Decode Bitmap Bands
///
/// Reverses [`encode`]: reads consecutive bands and stacks them into one
/// bitmap. The result is `width_bytes × 8` wide and includes any padding
/// rows, which are always white.
///
/// Used for previews and for checking encoder output.
pub fn decode(mut data: &[u8]) -> Result<Bitmap, PrinterError> {
    let mut bands = Vec::new();
    let mut width_bytes = None;

    while !data.is_empty() {
        if data.len() < HEADER_LEN {
            return Err(PrinterError::Format(format!(
                "Truncated band header ({} bytes)",
                data.len()
            )));
        }
        if data[0..3] != [ESC, BIT_IMAGE, BAND_MODE] {
            return Err(PrinterError::Format(format!(
                "Not a bitmap band: {:02X} {:02X} {:02X}",
                data[0], data[1], data[2]
            )));
        }

        let w = data[3] as usize;
        let h = data[4] as usize;
        if *width_bytes.get_or_insert(w) != w {
            return Err(PrinterError::Format(
                "Bands have different widths".to_string(),
            ));
        }

        let len = w * h * 8;
        let body = &data[HEADER_LEN..];
        if body.len() < len {
            return Err(PrinterError::Format(format!(
                "Truncated band data: expected {} bytes, got {}",
                len,
                body.len()
            )));
        }
        bands.push((h * 8, &body[..len]));
        data = &body[len..];
    }

    let w = width_bytes.unwrap_or(0);
    let height = bands.iter().map(|(rows, _)| rows).sum();
    let mut bitmap = Bitmap::new(w * 8, height);

    let mut y = 0;
    for (rows, body) in bands {
        for (row, line) in body.chunks(w.max(1)).take(rows).enumerate() {
            for (col, byte) in line.iter().enumerate() {
                for i in 0..8 {
                    if byte & (1 << i) != 0 {
                        bitmap.set(col * 8 + (7 - i), y + row, true);
                    }
                }
            }
        }
        y += rows;
    }

    Ok(bitmap)
}

// ============================================================================
// TESTS
// ============================================================================
