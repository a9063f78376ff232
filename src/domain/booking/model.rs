//! Booking domain entity

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::shared::DomainError;

/// Textual calendar date format used everywhere bookings are read or written.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    PendingPayment,
    Paid,
    Refunded,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [Self::PendingPayment, Self::Paid, Self::Refunded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "PENDING PAYMENT",
            Self::Paid => "PAID",
            Self::Refunded => "REFUNDED",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Validation(format!("Invalid booking status: {}", s)))
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        DomainError::Parse(format!("invalid date '{}', expected YYYY-MM-DD: {}", s.trim(), e))
    })
}

/// Guest booking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub booking_id: String,
    pub surname: String,
    pub first_name: String,
    pub middle_name: String,
    pub party_size: u32,
    /// Check-in date
    pub start_date: NaiveDate,
    /// Check-out date. Not validated against `start_date`.
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}

impl Booking {
    /// Length of stay in nights; negative when the dates are reversed.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn is_paid(&self) -> bool {
        self.status == BookingStatus::Paid
    }

    /// Display row in file column order.
    pub fn to_row(&self) -> [String; 8] {
        [
            self.booking_id.clone(),
            self.surname.clone(),
            self.middle_name.clone(),
            self.first_name.clone(),
            self.party_size.to_string(),
            self.start_date.format(DATE_FORMAT).to_string(),
            self.end_date.format(DATE_FORMAT).to_string(),
            self.status.to_string(),
        ]
    }
}
