//! # QR Code Rasters
//!
//! Ticket QR codes are printed as bitmaps, not with the printer's own QR
//! command, so the symbol is rendered here at a fixed scale of
//! [`MODULE_SIZE`] dots per module, surrounded by the standard quiet zone.
//!
//! ```text
//! ┌──────────────────────────┐
//! │  quiet zone (4 modules)  │
//! │   ┌──────────────────┐   │
//! │   │ ▀▀▀▀▀  ▄▀ ▀▀▀▀▀  │   │
//! │   │  ...symbol...    │   │
//! │   └──────────────────┘   │
//! └──────────────────────────┘
//! ```

use qrcode::{Color, EcLevel, QrCode};

use super::bitmap::Bitmap;
use crate::error::PrinterError;

/// Dots per QR module.
pub const MODULE_SIZE: usize = 4;

/// Width of the blank border around the symbol, in modules.
pub const QUIET_ZONE: usize = 4;

/// QR Code error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// ~7% recovery. Smallest symbol, used for tickets.
    #[default]
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl From<QrErrorLevel> for EcLevel {
    fn from(level: QrErrorLevel) -> Self {
        match level {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        }
    }
}

/// Encode `text` as a QR symbol and rasterize it.
///
/// Fails with [`PrinterError::Format`] if the text does not fit in any QR
/// version at the requested level.
pub fn generate(text: &str, level: QrErrorLevel) -> Result<Bitmap, PrinterError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), level.into())
        .map_err(|e| PrinterError::Format(format!("QR code generation failed: {}", e)))?;

    let modules = code.width();
    let side = (modules + 2 * QUIET_ZONE) * MODULE_SIZE;

    Ok(Bitmap::from_fn(side, side, |x, y| {
        let (mx, my) = (x / MODULE_SIZE, y / MODULE_SIZE);
        if mx < QUIET_ZONE || my < QUIET_ZONE {
            return false;
        }
        let (qx, qy) = (mx - QUIET_ZONE, my - QUIET_ZONE);
        qx < modules && qy < modules && code[(qx, qy)] == Color::Dark
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Raster;

    #[test]
    fn test_square_with_quiet_zone() {
        let bmp = generate("hello", QrErrorLevel::L).unwrap();
        // Version 1 is 21 modules; with quiet zone 29 modules
        assert_eq!(bmp.width(), 29 * MODULE_SIZE);
        assert_eq!(bmp.height(), bmp.width());
    }

    #[test]
    fn test_quiet_zone_is_white() {
        let bmp = generate("hello", QrErrorLevel::L).unwrap();
        let border = QUIET_ZONE * MODULE_SIZE;
        for i in 0..bmp.width() {
            for j in 0..border {
                assert!(!bmp.is_black(i, j));
                assert!(!bmp.is_black(j, i));
            }
        }
    }

    #[test]
    fn test_finder_pattern_corner_is_black() {
        let bmp = generate("hello", QrErrorLevel::L).unwrap();
        let origin = QUIET_ZONE * MODULE_SIZE;
        // Top-left module of the finder pattern, all 4x4 dots
        for dy in 0..MODULE_SIZE {
            for dx in 0..MODULE_SIZE {
                assert!(bmp.is_black(origin + dx, origin + dy));
            }
        }
    }

    #[test]
    fn test_each_dark_module_is_a_full_block() {
        let text = "http://example/index#edit/42/0007";
        let code = QrCode::with_error_correction_level(text, EcLevel::L).unwrap();
        let dark = code.to_colors().iter().filter(|&&c| c == Color::Dark).count();

        let bmp = generate(text, QrErrorLevel::L).unwrap();
        assert_eq!(bmp.black_count(), dark * MODULE_SIZE * MODULE_SIZE);
    }

    #[test]
    fn test_too_long_fails() {
        let text = "x".repeat(8000);
        let err = generate(&text, QrErrorLevel::H).unwrap_err();
        assert!(matches!(err, PrinterError::Format(_)));
    }

    #[test]
    fn test_higher_level_is_not_smaller() {
        let text = "http://example/index#edit/42/0007";
        let low = generate(text, QrErrorLevel::L).unwrap();
        let high = generate(text, QrErrorLevel::H).unwrap();
        assert!(high.width() >= low.width());
    }
}
