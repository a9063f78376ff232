mod booking;
mod room;

pub use booking::BookingRegistry;
pub use room::RoomRegistry;
