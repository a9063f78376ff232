//! Desk runtime.
//!
//! [`HotelDesk`] loads both data files once, owns the two registries and
//! persists only when asked. Front ends use this instead of wiring readers,
//! registries and writers themselves.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::application::{BookingRegistry, RoomRegistry};
use crate::config::{AppConfig, StorageConfig};
use crate::domain::{Booking, Room};
use crate::infrastructure::storage::csv_file;
use crate::infrastructure::{append_booking, append_room, CsvRecord, RowError};
use crate::shared::{AppResult, InfraError};

/// A row that cut a load short.
#[derive(Debug)]
pub struct LoadIssue {
    pub file: PathBuf,
    pub error: RowError,
}

impl std::fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.file.display(), self.error)
    }
}

/// Both registries plus the files they came from.
///
/// Mutations through [`rooms_mut`](Self::rooms_mut) /
/// [`bookings_mut`](Self::bookings_mut) stay in memory until
/// [`flush`](Self::flush) or one of the `persist_*` methods runs. A file
/// whose load stopped early is never rewritten.
#[derive(Debug)]
pub struct HotelDesk {
    rooms: RoomRegistry,
    bookings: BookingRegistry,
    rooms_path: PathBuf,
    bookings_path: PathBuf,
    load_issues: Vec<LoadIssue>,
}

impl HotelDesk {
    /// Load rooms and bookings from the configured files.
    ///
    /// A missing file is an I/O error unless `create_missing` is set, in
    /// which case a header-only file is written and the registry starts
    /// empty. Rows that abort a read are kept in [`load_issues`](Self::load_issues);
    /// the rows before them are loaded.
    pub fn open(storage: &StorageConfig) -> AppResult<Self> {
        let mut load_issues = Vec::new();

        let rooms = load_file::<Room>(&storage.rooms_path, storage.create_missing, &mut load_issues)?;
        let bookings =
            load_file::<Booking>(&storage.bookings_path, storage.create_missing, &mut load_issues)?;

        let desk = Self {
            rooms: RoomRegistry::new(rooms),
            bookings: BookingRegistry::new(bookings),
            rooms_path: storage.rooms_path.clone(),
            bookings_path: storage.bookings_path.clone(),
            load_issues,
        };

        info!(
            "Hotel desk ready: {} rooms, {} bookings",
            desk.rooms.len(),
            desk.bookings.len()
        );
        Ok(desk)
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut RoomRegistry {
        &mut self.rooms
    }

    pub fn bookings(&self) -> &BookingRegistry {
        &self.bookings
    }

    pub fn bookings_mut(&mut self) -> &mut BookingRegistry {
        &mut self.bookings
    }

    pub fn rooms_path(&self) -> &Path {
        &self.rooms_path
    }

    pub fn bookings_path(&self) -> &Path {
        &self.bookings_path
    }

    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.load_issues
    }

    /// Rewrite both files from the registries.
    ///
    /// Neither file is touched if either one has a load issue.
    pub fn flush(&self) -> AppResult<()> {
        self.ensure_fully_loaded(&self.rooms_path)?;
        self.ensure_fully_loaded(&self.bookings_path)?;
        self.rooms.flush(&self.rooms_path)?;
        self.bookings.flush(&self.bookings_path)?;
        Ok(())
    }

    /// Rewrite the rooms file. Fails with [`InfraError::PartialLoad`] when
    /// its load stopped early, since the rows after that point are not in
    /// memory.
    pub fn flush_rooms(&self) -> AppResult<()> {
        self.ensure_fully_loaded(&self.rooms_path)?;
        self.rooms.flush(&self.rooms_path)
    }

    /// Rewrite the bookings file, with the same guard as
    /// [`flush_rooms`](Self::flush_rooms).
    pub fn flush_bookings(&self) -> AppResult<()> {
        self.ensure_fully_loaded(&self.bookings_path)?;
        self.bookings.flush(&self.bookings_path)
    }

    fn ensure_fully_loaded(&self, path: &Path) -> AppResult<()> {
        match self.load_issues.iter().find(|issue| issue.file.as_path() == path) {
            Some(issue) => {
                warn!("Not rewriting {}: {}", path.display(), issue.error);
                Err(InfraError::PartialLoad {
                    path: path.to_path_buf(),
                    line: issue.error.line,
                }
                .into())
            }
            None => Ok(()),
        }
    }

    /// Append one room to the rooms file without rewriting it.
    pub fn persist_room(&self, room: &Room) -> AppResult<()> {
        append_room(&self.rooms_path, room)
    }

    /// Append one booking to the bookings file without rewriting it.
    pub fn persist_booking(&self, booking: &Booking) -> AppResult<()> {
        append_booking(&self.bookings_path, booking)
    }
}

fn load_file<T: CsvRecord>(
    path: &Path,
    create_missing: bool,
    issues: &mut Vec<LoadIssue>,
) -> AppResult<Vec<T>> {
    match csv_file::read_records::<T>(path) {
        Ok(outcome) => {
            if let Some(error) = outcome.aborted {
                issues.push(LoadIssue {
                    file: path.to_path_buf(),
                    error,
                });
            }
            Ok(outcome.records)
        }
        Err(crate::shared::AppError::Infra(e)) if create_missing && e.is_not_found() => {
            warn!("{} file {} not found, creating it", T::ENTITY, path.display());
            csv_file::init_file::<T>(path)?;
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over the configured level. Call once at
/// process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
