//! # Registration Tickets
//!
//! Renders the fixed ticket layout handed out at the registration desk:
//!
//! ```text
//! 16.10.2026 21:30
//!        +++ ULTRASTAR +++          (big, centered)
//! Deine Ticketnummer und PIN:
//! #42                    0007       (big, column aligned)
//! Jetzt Namen eintragen und Song raussuchen:
//!          ▄▄▄▄▄▄▄▄▄
//!          █ QR code █              (deep link to the edit form)
//!          ▀▀▀▀▀▀▀▀▀
//!        http://example             (bold, centered)
//!        +++ Reminder +++           (centered)
//! Die Nummern werden angezeigt.
//! ✂
//! ```
//!
//! Formatting is all-or-nothing: if the QR code cannot be generated or
//! encoded, no program is returned and nothing reaches the printer.

use chrono::{Local, NaiveDateTime};

use crate::error::PrinterError;
use crate::ir::{Op, Program};
use crate::protocol::commands::Macro;
use crate::protocol::graphics;
use crate::render::qr::{self, QrErrorLevel};

/// Timestamp format printed at the top of every ticket.
pub const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// One ticket to print. Never stored; lives for a single print call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketJob {
    pub id: String,
    pub pin: String,
    /// Address printed under the QR code
    pub registration_base: String,
    /// Deep link encoded in the QR code
    pub registration_url: String,
}

impl TicketJob {
    /// Create a job with an explicit deep link.
    pub fn new(
        id: impl Into<String>,
        pin: impl Into<String>,
        registration_base: impl Into<String>,
        registration_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pin: pin.into(),
            registration_base: registration_base.into(),
            registration_url: registration_url.into(),
        }
    }

    /// Create a job whose deep link is derived with [`registration_url`].
    pub fn for_base(id: impl Into<String>, pin: impl Into<String>, base: impl Into<String>) -> Self {
        let (id, pin, base) = (id.into(), pin.into(), base.into());
        let url = registration_url(&base, &id, &pin);
        Self::new(id, pin, base, url)
    }
}

/// Deep link to the ticket's edit form.
///
/// ```
/// use usdx_printer::ticket::registration_url;
///
/// assert_eq!(
///     registration_url("http://example", "42", "0007"),
///     "http://example/index#edit/42/0007"
/// );
/// assert_eq!(
///     registration_url("http://example", "a/b", "x y"),
///     "http://example/index#edit/a%2Fb/x%20y"
/// );
/// ```
pub fn registration_url(base: &str, id: &str, pin: &str) -> String {
    format!(
        "{}/index#edit/{}/{}",
        base,
        path_escape(id),
        path_escape(pin)
    )
}

/// Escape a string for use as a single URL path segment.
///
/// Unreserved characters and `$&+=:@` pass through; everything else,
/// including `/`, `;`, `,` and `?`, becomes `%XX` with uppercase hex.
pub fn path_escape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'$'
            | b'&'
            | b'+'
            | b'='
            | b':'
            | b'@' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// The fixed text printed on each ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLayout {
    pub banner: String,
    pub id_label: String,
    pub instructions: String,
    pub reminder_title: String,
    pub reminder: String,
}

impl Default for TicketLayout {
    fn default() -> Self {
        Self {
            banner: "+++ ULTRASTAR +++".to_string(),
            id_label: "Deine Ticketnummer und PIN:".to_string(),
            instructions: "Jetzt Namen eintragen und Song raussuchen:".to_string(),
            reminder_title: "+++ Reminder +++".to_string(),
            reminder: "Die Nummern werden angezeigt.".to_string(),
        }
    }
}

/// Turns ticket jobs into printer programs.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    layout: TicketLayout,
    qr_level: QrErrorLevel,
}

impl Formatter {
    pub fn new(layout: TicketLayout) -> Self {
        Self {
            layout,
            qr_level: QrErrorLevel::L,
        }
    }

    /// Format a ticket stamped with the current local time.
    pub fn format(&self, job: &TicketJob) -> Result<Program, PrinterError> {
        self.format_at(job, Local::now().naive_local())
    }

    /// Format a ticket stamped with `at`.
    ///
    /// The program always starts with [`Macro::Reset`] and ends with
    /// [`Macro::Cut`]. The completion marker is not part of it.
    pub fn format_at(&self, job: &TicketJob, at: NaiveDateTime) -> Result<Program, PrinterError> {
        // Only fallible step; run it before building anything
        let code = qr::generate(&job.registration_url, self.qr_level)?;
        let bands = graphics::encode(&code)?;

        let layout = &self.layout;
        let mut p = Program::with_reset();

        p.text(at.format(DATETIME_FORMAT).to_string());
        p.newline();

        p.style(Macro::Big);
        p.style(Macro::Center);
        p.text(layout.banner.as_str());
        p.style(Macro::Reset);
        p.newline();

        p.text(layout.id_label.as_str());
        p.newline();

        p.style(Macro::Big);
        p.text(format!("#{}", job.id));
        p.style(Macro::AlignColumn);
        p.text(job.pin.as_str());
        p.style(Macro::Reset);
        p.newline();

        p.text(layout.instructions.as_str());
        p.newline();

        p.style(Macro::Center);
        p.push(Op::Bitmap(bands));
        p.style(Macro::Bold);
        p.style(Macro::Center);
        p.text(job.registration_base.as_str());
        p.style(Macro::Reset);
        p.newline();

        p.style(Macro::Center);
        p.text(layout.reminder_title.as_str());
        p.newline();
        p.text(layout.reminder.as_str());
        p.newline();

        p.style(Macro::Cut);

        Ok(p)
    }
}
