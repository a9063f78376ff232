//! Hotel Desk: command-line front end
//!
//! Loads the room and booking files once, runs a single command against the
//! registries and writes back whatever that command changed.
//!
//! ```sh
//! # Run with default config (~/.config/hotel-desk/config.toml)
//! hotel-desk rooms list --available
//!
//! # Custom data files
//! hotel-desk --rooms-file DB/rooms.csv --bookings-file DB/booking.csv summary
//!
//! # New booking with a generated BKT-<count>-<ddMMyy> id
//! hotel-desk bookings add --surname Santos --first-name Maria \
//!     --party-size 2 --start 2025-11-03 --end 2025-11-05
//!
//! # Validate config without touching data files
//! hotel-desk --check
//! ```

mod commands;

use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use hotel_desk::config::CONFIG_ENV;
use hotel_desk::{init_tracing, AppConfig, HotelDesk};

/// Hotel Desk: room inventory and booking registry backed by CSV files.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-desk",
    version,
    about = "Manage hotel rooms and bookings stored in CSV files",
    long_about = "Hotel Desk: room inventory and guest bookings kept in flat CSV files.\n\n\
                  Default config: ~/.config/hotel-desk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the rooms CSV path.
    #[arg(long)]
    rooms_file: Option<PathBuf>,

    /// Override the bookings CSV path.
    #[arg(long)]
    bookings_file: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without opening data files.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write header-only room and booking files.
    Init {
        /// Overwrite files that already exist.
        #[arg(long)]
        force: bool,
    },
    /// Room inventory.
    Rooms {
        #[command(subcommand)]
        action: RoomCommand,
    },
    /// Guest bookings.
    Bookings {
        #[command(subcommand)]
        action: BookingCommand,
    },
    /// Counts per status and any rows that cut a load short.
    Summary,
    /// Configuration file helpers.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RoomCommand {
    /// List rooms in file order.
    List {
        #[arg(long, conflicts_with_all = ["occupied", "maintenance"])]
        available: bool,
        #[arg(long, conflicts_with = "maintenance")]
        occupied: bool,
        #[arg(long)]
        maintenance: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show one room.
    Show { unit: u32 },
    /// Add a room and append it to the rooms file.
    Add {
        unit: u32,
        capacity: u32,
        /// Available, Occupied or Maintenance
        status: String,
        price: Decimal,
        /// Booking identifier the room is held for.
        #[arg(long)]
        booking: Option<String>,
    },
    /// Change a room's capacity or base price.
    #[command(group(ArgGroup::new("change").required(true).multiple(true).args(["capacity", "price"])))]
    Edit {
        unit: u32,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long)]
        price: Option<Decimal>,
    },
    /// Change a room's status.
    SetStatus { unit: u32, status: String },
    /// Set or clear the booking a room is held for.
    Assign {
        unit: u32,
        /// Omit to clear the reference.
        #[arg(long)]
        booking: Option<String>,
    },
    /// Delete a room.
    Remove { unit: u32 },
}

#[derive(Subcommand, Debug)]
enum BookingCommand {
    /// List bookings in file order.
    List {
        #[arg(long, conflicts_with_all = ["pending", "refunded"])]
        paid: bool,
        #[arg(long, conflicts_with = "refunded")]
        pending: bool,
        #[arg(long)]
        refunded: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show one booking.
    Show { id: String },
    /// Add a booking and append it to the bookings file.
    Add {
        /// Booking identifier; generated as BKT-<count>-<ddMMyy> when omitted.
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        surname: String,
        #[arg(long, default_value = "")]
        middle_name: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        party_size: u32,
        /// Check-in date, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Check-out date, YYYY-MM-DD
        #[arg(long)]
        end: String,
        /// PENDING PAYMENT, PAID or REFUNDED
        #[arg(long, default_value = "PENDING PAYMENT")]
        status: String,
    },
    /// Change a booking's status.
    SetStatus { id: String, status: String },
    /// Delete a booking.
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration to the config path.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location.
    Path,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(hotel_desk::default_config_path);

    let config_found = config_path.exists();
    let mut config = if config_found {
        match AppConfig::load(&config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                    .with_writer(std::io::stderr)
                    .init();
                error!("Failed to load config from {}: {}", config_path.display(), e);
                return Err(e.into());
            }
        }
    } else {
        AppConfig::default()
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    if config_found {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        info!("No config at {}, using defaults", config_path.display());
    }
    if let Some(path) = cli.rooms_file {
        info!("CLI override: rooms_path = {}", path.display());
        config.storage.rooms_path = path;
    }
    if let Some(path) = cli.bookings_file {
        info!("CLI override: bookings_path = {}", path.display());
        config.storage.bookings_path = path;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   Rooms file    : {}", config.storage.rooms_path.display());
        println!("   Bookings file : {}", config.storage.bookings_path.display());
        println!("   Create missing: {}", config.storage.create_missing);
        println!("   Log level     : {}", config.logging.level);
        println!("   Log format    : {}", config.logging.format);
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Commands that must not load the data files.
    match command {
        Command::Init { force } => return commands::init_files(&config, force),
        Command::Config { action } => {
            return match action {
                ConfigCommand::Init { force } => commands::init_config(&config_path, force),
                ConfigCommand::Path => {
                    println!("{}", config_path.display());
                    Ok(())
                }
            };
        }
        _ => {}
    }

    // ── Open data files ────────────────────────────────────────
    let mut desk = match HotelDesk::open(&config.storage) {
        Ok(desk) => desk,
        Err(e) => {
            error!("Failed to open data files: {}", e);
            return Err(e.into());
        }
    };

    match command {
        Command::Rooms { action } => commands::rooms(&mut desk, action),
        Command::Bookings { action } => commands::bookings(&mut desk, action),
        Command::Summary => {
            commands::summary(&desk);
            Ok(())
        }
        Command::Init { .. } | Command::Config { .. } => Ok(()),
    }
}
