pub mod booking;
pub mod room;

// Re-export commonly used types
pub use booking::{generate_booking_id, Booking, BookingStatus, NewBooking};
pub use room::{NewRoom, Room, RoomPatch, RoomStatus};

pub use crate::shared::errors::{DomainError, DomainResult};
