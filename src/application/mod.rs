//! Application layer: the room and booking registries.

pub mod services;

pub use services::{BookingRegistry, RoomRegistry};
