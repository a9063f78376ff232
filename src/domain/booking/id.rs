//! Booking identifier generation
//!
//! Identifiers look like `BKT-<count>-<ddMMyy>`. The count is whatever the
//! caller passes (normally the current number of bookings), so two ids
//! generated before the registry grows collide. Callers that need a hard
//! guarantee must check the registry before inserting.

use chrono::NaiveDate;

pub const BOOKING_ID_PREFIX: &str = "BKT";

pub fn generate_booking_id(count: usize, date: NaiveDate) -> String {
    format!("{}-{}-{}", BOOKING_ID_PREFIX, count, date.format("%d%m%y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_count_and_short_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(generate_booking_id(0, date), "BKT-0-070325");
        assert_eq!(generate_booking_id(12, date), "BKT-12-070325");
    }

    #[test]
    fn same_count_same_day_collides() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(generate_booking_id(4, date), generate_booking_id(4, date));
    }
}
