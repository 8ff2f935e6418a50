//! # Control Codes and Formatting Macros
//!
//! The ticket printer speaks an ESC/POS-like dialect that was never
//! documented by the vendor. Everything here was recovered from working
//! print jobs and must be sent byte-for-byte.
//!
//! ## Macro Table
//!
//! | Macro | Bytes | Effect |
//! |-------|-------|--------|
//! | `reset` | `ESC ! 10 ESC a 00` | Default font, left alignment |
//! | `altfont` | `ESC ! 10` | Default font only |
//! | `bold` | `ESC G 01` | Emphasized text |
//! | `double` | `ESC W 01 ESC h 01` | Double width and height |
//! | `big` | `bold` ++ `double` | Both of the above |
//! | `center` | `ESC a 01` | Centered lines |
//! | `aligncolumn` | `ESC a 04` | Second column alignment |
//! | `cut` | `FF` | Feed and cut |
//!
//! Styles are only cleared by `reset`; there are no "off" variants.

use std::fmt;
use std::str::FromStr;

use crate::error::PrinterError;

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// LF (Line Feed) - Print the line buffer and advance
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Feed to the cutter and cut
pub const FF: u8 = 0x0C;

/// DC1 / XON - Inserted by the device into its replies, never part of a frame
pub const FLOW_CONTROL: u8 = 0x11;

/// Trailer written after every job so the device knows the job is complete.
pub const COMPLETION_MARKER: [u8; 4] = [ESC, 0x00, 0x80, 0x00];

const RESET: &[u8] = &[ESC, b'!', 0x10, ESC, b'a', 0x00];
const ALT_FONT: &[u8] = &[ESC, b'!', 0x10];
const BOLD: &[u8] = &[ESC, b'G', 0x01];
const DOUBLE: &[u8] = &[ESC, b'W', 0x01, ESC, b'h', 0x01];
const BIG: &[u8] = &[ESC, b'G', 0x01, ESC, b'W', 0x01, ESC, b'h', 0x01];
const CENTER: &[u8] = &[ESC, b'a', 0x01];
const ALIGN_COLUMN: &[u8] = &[ESC, b'a', 0x04];
const CUT: &[u8] = &[FF];

// ============================================================================
// MACROS
// ============================================================================

/// A symbolic formatting operation with a fixed escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    Reset,
    AltFont,
    Bold,
    Double,
    Big,
    Center,
    AlignColumn,
    Cut,
}

impl Macro {
    /// Every macro, in table order.
    pub const ALL: [Macro; 8] = [
        Macro::Reset,
        Macro::AltFont,
        Macro::Bold,
        Macro::Double,
        Macro::Big,
        Macro::Center,
        Macro::AlignColumn,
        Macro::Cut,
    ];

    /// The literal bytes sent to the printer.
    ///
    /// ```
    /// use usdx_printer::protocol::commands::Macro;
    ///
    /// assert_eq!(Macro::Center.bytes(), &[0x1B, 0x61, 0x01]);
    /// ```
    #[inline]
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Macro::Reset => RESET,
            Macro::AltFont => ALT_FONT,
            Macro::Bold => BOLD,
            Macro::Double => DOUBLE,
            Macro::Big => BIG,
            Macro::Center => CENTER,
            Macro::AlignColumn => ALIGN_COLUMN,
            Macro::Cut => CUT,
        }
    }

    /// Symbolic name, as used in layouts and the `macros` listing.
    pub const fn name(self) -> &'static str {
        match self {
            Macro::Reset => "reset",
            Macro::AltFont => "altfont",
            Macro::Bold => "bold",
            Macro::Double => "double",
            Macro::Big => "big",
            Macro::Center => "center",
            Macro::AlignColumn => "aligncolumn",
            Macro::Cut => "cut",
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Macro {
    type Err = PrinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Macro::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| PrinterError::Format(format!("Unknown macro '{}'", s)))
    }
}

/// Format bytes as space-separated uppercase hex, e.g. `1B 61 01`.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
