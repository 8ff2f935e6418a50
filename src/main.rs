//! # usdx-printer CLI
//!
//! Command-line interface for printing and inspecting registration tickets.
//!
//! ## Usage
//!
//! ```bash
//! # Print a ticket on the default device (/dev/ttyUSB0)
//! usdx-printer print --id 42 --pin 0007 --base http://karaoke.example
//!
//! # Log instead of printing (same as USDX_PRINTER=.)
//! usdx-printer print --null --id 42 --pin 0007 --base http://karaoke.example
//!
//! # Write the exact bytes to a file
//! usdx-printer render --id 42 --pin 0007 --base http://karaoke.example --output ticket.bin
//!
//! # Save a QR code as PNG
//! usdx-printer qr http://karaoke.example --png qr.png
//!
//! # Show the macro table
//! usdx-printer macros
//! ```
//!
//! Set `RUST_LOG=debug` for byte counts.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;

use usdx_printer::{
    PrinterError, TicketJob,
    printer::{self, PrinterConfig},
    protocol::commands::{self, Macro},
    render::{
        Raster,
        qr::{self, QrErrorLevel},
    },
    ticket::Formatter,
    transport::{SerialSettings, SerialTransport, Transport, serial::DEFAULT_DEVICE},
};

/// usdx-printer - Registration ticket printer utility
#[derive(Parser, Debug)]
#[command(name = "usdx-printer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Ticket fields shared by `print` and `render`.
#[derive(Args, Debug)]
struct TicketArgs {
    /// Ticket number
    #[arg(long)]
    id: String,

    /// Ticket PIN
    #[arg(long)]
    pin: String,

    /// Registration site, printed under the QR code
    #[arg(long, env = "USDX_WEBBASE")]
    base: String,

    /// Deep link for the QR code (defaults to BASE/index#edit/ID/PIN)
    #[arg(long)]
    url: Option<String>,
}

impl TicketArgs {
    fn job(&self) -> TicketJob {
        match &self.url {
            Some(url) => TicketJob::new(&self.id, &self.pin, &self.base, url),
            None => TicketJob::for_base(&self.id, &self.pin, &self.base),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a ticket
    Print {
        #[command(flatten)]
        ticket: TicketArgs,

        /// Printer device path ("." for no printer)
        #[arg(long, env = "USDX_PRINTER", default_value = DEFAULT_DEVICE)]
        device: PathBuf,

        /// Only log the ticket, no hardware
        #[arg(long)]
        null: bool,

        /// Serial baud rate
        #[arg(long, env = "USDX_BAUD", default_value_t = 19200)]
        baud: u32,

        /// Wait for an acknowledgement frame after the job
        #[arg(long)]
        wait_ack: bool,
    },

    /// Write the ticket bytes (including completion marker) to a file
    Render {
        #[command(flatten)]
        ticket: TicketArgs,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Save a QR code as PNG, rendered exactly as on the ticket
    Qr {
        /// Text to encode
        text: String,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },

    /// List the formatting macros and their bytes
    Macros,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PrinterError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            ticket,
            device,
            null,
            baud,
            wait_ack,
        } => {
            let selected = if null {
                PrinterConfig::null()
            } else {
                PrinterConfig::from_device(device)
            };
            let config = PrinterConfig {
                serial: SerialSettings {
                    baud,
                    ..Default::default()
                },
                await_ack: wait_ack,
                ..selected
            };

            let printer = printer::open(&config)?;
            let job = ticket.job();
            printer.print(
                &job.id,
                &job.pin,
                &job.registration_base,
                &job.registration_url,
            )?;
            println!("Printed ticket #{}", job.id);
        }

        Commands::Render { ticket, output } => {
            let program = Formatter::default().format(&ticket.job())?;
            let bytes = program.to_bytes();

            let mut transport = SerialTransport::new(File::create(&output)?);
            transport.write(&bytes)?;
            println!(
                "Wrote {} bytes ({} ops) to {}",
                bytes.len() + commands::COMPLETION_MARKER.len(),
                program.len(),
                output.display()
            );
        }

        Commands::Qr { text, png } => {
            let code = qr::generate(&text, QrErrorLevel::L)?;
            code.to_gray_image()
                .save(&png)
                .map_err(|e| PrinterError::Image(format!("Failed to save PNG: {}", e)))?;
            println!(
                "Saved {}x{} dots ({} black) to {}",
                code.width(),
                code.height(),
                code.black_count(),
                png.display()
            );
        }

        Commands::Macros => {
            for m in Macro::ALL {
                println!("{:<12} {}", m.name(), commands::hex(m.bytes()));
            }
            println!(
                "{:<12} {}",
                "complete",
                commands::hex(&commands::COMPLETION_MARKER)
            );
        }
    }

    Ok(())
}
