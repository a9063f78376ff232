//! Room aggregate
//!
//! Contains the Room entity, its status enum and the creation input.

pub mod dto;
pub mod model;

pub use dto::{NewRoom, RoomPatch};
pub use model::{Room, RoomStatus};
