//! # Courtside CLI
//!
//! Console front end for the booking pipeline.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  courtside [--config <path>] <command>                                  │
//! │                                                                         │
//! │  book       --court Grass --item Racket --item Racket --method UPI      │
//! │             [--detail upi_id=asha@okbank] [--json]                      │
//! │             Missing details are prompted on stdin.                      │
//! │                                                                         │
//! │  demo       Replays the two reference bookings with preset details      │
//! │                                                                         │
//! │  inventory  Prints the configured court availability                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod console;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use courtside_booking::{
    BookingConfig, BookingConfirmation, BookingError, BookingManager, DetailField, StaticDetails,
};
use courtside_core::CourtKind;

use crate::console::ConsoleDetails;

#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(version)]
#[command(about = "Book tennis courts with rental gear", long_about = None)]
struct Cli {
    /// Path to a courtside.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Book one court
    Book {
        /// Court kind: Grass, Clay or Hard
        #[arg(long)]
        court: String,

        /// Rental item (repeatable): Ballpack, Racket or Grips
        #[arg(long = "item")]
        items: Vec<String>,

        /// Payment method: Card or UPI
        #[arg(long)]
        method: String,

        /// Preset payment detail as key=value (repeatable), e.g. upi_id=asha@okbank
        #[arg(long = "detail")]
        details: Vec<String>,

        /// Print the confirmation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay the reference bookings
    Demo,

    /// Show court availability
    Inventory,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let config = BookingConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");
    let manager = BookingManager::from_config(&config);

    match cli.command {
        Command::Book {
            court,
            items,
            method,
            details,
            json,
        } => {
            let presets = StaticDetails::from_pairs(&details)?;
            let stdin = io::stdin();
            let mut source = ConsoleDetails::new(presets, stdin.lock(), io::stdout());

            match manager.book_court(&court, &items, &method, &mut source) {
                Ok(confirmation) if json => {
                    println!("{}", serde_json::to_string_pretty(&confirmation)?)
                }
                Ok(confirmation) => print_confirmation(&confirmation),
                Err(err) => {
                    report_failure(&err);
                    process::exit(1);
                }
            }
        }
        Command::Demo => run_demo(&manager),
        Command::Inventory => print_inventory(&manager),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=courtside_booking=trace` - Trace the booking pipeline only
/// - Default: INFO, DEBUG for courtside crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,courtside=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_demo(manager: &BookingManager) {
    let mut upi = StaticDetails::new().with(DetailField::UpiId, "demo@okbank");
    let mut card = StaticDetails::new()
        .with(DetailField::CardNumber, "4111111111111111")
        .with(DetailField::Expiry, "12/30")
        .with(DetailField::HolderName, "Demo Player")
        .with(DetailField::Cvv, "123");

    info!("Running demo bookings");
    let bookings = [
        manager.book_court("Grass", &["Racket", "Racket"], "UPI", &mut upi),
        manager.book_court("Clay", &["Ballpack", "Grips"], "Card", &mut card),
    ];

    for result in bookings {
        match result {
            Ok(confirmation) => print_confirmation(&confirmation),
            Err(err) => report_failure(&err),
        }
        println!();
    }
    print_inventory(manager);
}

fn print_confirmation(confirmation: &BookingConfirmation) {
    let items: Vec<&str> = confirmation.items.iter().map(|i| i.as_str()).collect();

    println!("Booking confirmed: {}", confirmation.booking_id);
    println!("  Court:     {}", confirmation.court);
    if items.is_empty() {
        println!("  Items:     none");
    } else {
        println!("  Items:     {}", items.join(", "));
    }
    println!("  Subtotal:  {}", confirmation.subtotal);
    println!("  Discount:  {}", confirmation.discount);
    println!("  Charged:   {}", confirmation.total_charged);
    println!(
        "  Payment:   {} ({})",
        confirmation.payment_method, confirmation.payment_reference
    );
    println!(
        "  {} courts remaining: {}",
        confirmation.court, confirmation.courts_remaining
    );
}

fn print_inventory(manager: &BookingManager) {
    println!("Court availability:");
    for court in CourtKind::ALL {
        println!(
            "  {:<6} {}",
            court.as_str(),
            manager.inventory().remaining(court)
        );
    }
}

fn report_failure(err: &BookingError) {
    let code = serde_json::to_value(err.code())
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("{:?}", err.code()));

    eprintln!("Booking failed [{code}]: {err}");
    if err.requires_compensation() {
        eprintln!("  The payment went through but no court was reserved. Refund required.");
    }
}
