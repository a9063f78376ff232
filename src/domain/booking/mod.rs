//! Booking aggregate
//!
//! Contains the Booking entity, its status enum, the creation input and
//! the identifier generator.

pub mod dto;
pub mod id;
pub mod model;

pub use dto::NewBooking;
pub use id::generate_booking_id;
pub use model::{parse_date, Booking, BookingStatus, DATE_FORMAT};
