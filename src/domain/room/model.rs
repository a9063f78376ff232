//! Room domain entity

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::shared::DomainError;

/// Room occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoomStatus {
    /// Free to be booked
    Available,
    /// Guests checked in
    Occupied,
    /// Out of service
    Maintenance,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 3] = [Self::Available, Self::Occupied, Self::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Validation(format!("Invalid room status: {}", s)))
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hotel room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    /// Unique room number
    pub unit_number: u32,
    /// Maximum number of guests
    pub capacity: u32,
    pub status: RoomStatus,
    /// Soft reference to a booking identifier. Never checked against the
    /// booking registry.
    pub booking_id: Option<String>,
    pub base_price: Decimal,
}

/// Trimmed booking reference, `None` when blank.
pub(crate) fn normalize_booking_ref(booking_id: Option<String>) -> Option<String> {
    booking_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

impl Room {
    pub fn new(
        unit_number: u32,
        capacity: u32,
        status: RoomStatus,
        booking_id: Option<String>,
        base_price: Decimal,
    ) -> Self {
        Self {
            unit_number,
            capacity,
            status,
            booking_id: normalize_booking_ref(booking_id),
            base_price,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    /// Display row: unit number, capacity, status, booking id, price.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.unit_number.to_string(),
            self.capacity.to_string(),
            self.status.to_string(),
            self.booking_id.clone().unwrap_or_default(),
            self.base_price.to_string(),
        ]
    }
}
