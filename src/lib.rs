//! # Hotel Desk
//!
//! Room inventory and guest bookings kept in memory and persisted to flat
//! CSV files.
//!
//! ## Architecture
//!
//! - **domain**: Room and Booking entities, status enums, identifier generation
//! - **application**: the room and booking registries (create, find, update, delete, filter)
//! - **infrastructure**: CSV readers and writers
//! - **desk**: runtime that opens the files and owns both registries
//! - **config**: TOML configuration

pub mod application;
pub mod config;
pub mod desk;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::{BookingRegistry, RoomRegistry};
pub use config::{default_config_path, AppConfig};
pub use desk::{init_tracing, HotelDesk, LoadIssue};
pub use shared::{AppError, AppResult, DomainError, DomainResult, ErrorKind, InfraError};
