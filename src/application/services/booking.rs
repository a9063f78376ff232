//! Booking registry

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::booking::parse_date;
use crate::domain::{
    generate_booking_id, Booking, BookingStatus, DomainError, DomainResult, NewBooking,
};
use crate::infrastructure::save_bookings;
use crate::shared::AppResult;

/// In-memory bookings in insertion order, keyed by booking identifier.
#[derive(Debug, Default)]
pub struct BookingRegistry {
    bookings: Vec<Booking>,
}

impl BookingRegistry {
    /// Build from loaded bookings. A repeated identifier keeps the first row.
    pub fn new(bookings: Vec<Booking>) -> Self {
        let mut seen = HashSet::new();
        let bookings = bookings
            .into_iter()
            .filter(|b| {
                let fresh = seen.insert(b.booking_id.clone());
                if !fresh {
                    warn!("Dropping duplicate booking {}", b.booking_id);
                }
                fresh
            })
            .collect();
        Self { bookings }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Identifier for the next booking, `BKT-<count>-<ddMMyy>`.
    ///
    /// Only unique while the count keeps growing; see
    /// [`generate_booking_id`].
    pub fn next_booking_id(&self, today: NaiveDate) -> String {
        generate_booking_id(self.bookings.len(), today)
    }

    /// Add a booking.
    ///
    /// Checked in order: identifier present with no surrounding whitespace,
    /// identifier not taken, valid status, both dates in `YYYY-MM-DD`. The
    /// registry is untouched on any failure. Names are stored trimmed, the
    /// way the file reader returns them.
    pub fn create(&mut self, input: NewBooking) -> DomainResult<Booking> {
        validate_booking_id(&input.booking_id).inspect_err(|e| {
            warn!("Rejected booking: {}", e);
        })?;

        if self.exists(&input.booking_id) {
            warn!("Booking {} already exists", input.booking_id);
            return Err(DomainError::Conflict(format!("Booking {}", input.booking_id)));
        }

        let status = input.status.parse::<BookingStatus>().inspect_err(|e| {
            warn!("Rejected booking {}: {}", input.booking_id, e);
        })?;

        let dates = parse_date(&input.start_date)
            .and_then(|start| parse_date(&input.end_date).map(|end| (start, end)));
        let (start_date, end_date) = dates.inspect_err(|e| {
            warn!("Rejected booking {}: {}", input.booking_id, e);
        })?;

        let booking = Booking {
            booking_id: input.booking_id,
            surname: input.surname.trim().to_string(),
            first_name: input.first_name.trim().to_string(),
            middle_name: input.middle_name.trim().to_string(),
            party_size: input.party_size,
            start_date,
            end_date,
            status,
        };
        self.bookings.push(booking.clone());

        info!(
            "Booking {} created: {} {}, party of {}, {} to {}",
            booking.booking_id,
            booking.first_name,
            booking.surname,
            booking.party_size,
            booking.start_date,
            booking.end_date
        );
        Ok(booking)
    }

    pub fn find(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.booking_id == booking_id)
    }

    pub fn exists(&self, booking_id: &str) -> bool {
        self.find(booking_id).is_some()
    }

    /// Any valid status may replace any other, including Refunded -> Paid.
    pub fn update_status(&mut self, booking_id: &str, new_status: &str) -> DomainResult<()> {
        let status = new_status.parse::<BookingStatus>().inspect_err(|e| {
            warn!("Rejected status change for booking {}: {}", booking_id, e);
        })?;

        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id)
            .ok_or_else(|| DomainError::booking_not_found(booking_id))?;
        let previous = booking.status;
        booking.status = status;

        info!("Booking {} status: {} -> {}", booking_id, previous, status);
        Ok(())
    }

    /// Remove a booking and hand it back. Rooms pointing at it keep their
    /// reference.
    pub fn delete(&mut self, booking_id: &str) -> DomainResult<Booking> {
        let idx = self
            .bookings
            .iter()
            .position(|b| b.booking_id == booking_id)
            .ok_or_else(|| DomainError::booking_not_found(booking_id))?;

        let booking = self.bookings.remove(idx);
        info!("Booking {} deleted", booking_id);
        Ok(booking)
    }

    pub fn list_by_status(&self, status: BookingStatus) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.status == status).collect()
    }

    pub fn list_paid(&self) -> Vec<&Booking> {
        self.list_by_status(BookingStatus::Paid)
    }

    pub fn list_pending(&self) -> Vec<&Booking> {
        self.list_by_status(BookingStatus::PendingPayment)
    }

    pub fn list_refunded(&self) -> Vec<&Booking> {
        self.list_by_status(BookingStatus::Refunded)
    }

    pub fn table_rows(&self) -> Vec<[String; 8]> {
        self.bookings.iter().map(Booking::to_row).collect()
    }

    /// Overwrite `path` with the current bookings.
    pub fn flush(&self, path: impl AsRef<Path>) -> AppResult<()> {
        save_bookings(path, &self.bookings)
    }
}

fn validate_booking_id(booking_id: &str) -> DomainResult<()> {
    if booking_id.trim().is_empty() {
        return Err(DomainError::Validation("booking identifier is empty".into()));
    }
    if booking_id.trim() != booking_id {
        return Err(DomainError::Validation(format!(
            "booking identifier '{}' has surrounding whitespace",
            booking_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::read_bookings;
    use crate::infrastructure::storage::test_support::TempCsv;
    use crate::shared::ErrorKind;

    fn new_booking(id: &str, status: &str) -> NewBooking {
        NewBooking {
            booking_id: id.into(),
            surname: "Santos".into(),
            middle_name: "Luisa".into(),
            first_name: "Maria".into(),
            party_size: 2,
            start_date: "2025-11-03".into(),
            end_date: "2025-11-05".into(),
            status: status.into(),
        }
    }

    fn registry() -> BookingRegistry {
        let mut reg = BookingRegistry::default();
        reg.create(new_booking("BKT-0-011125", "PAID")).unwrap();
        reg.create(new_booking("BKT-1-011125", "PENDING PAYMENT")).unwrap();
        reg.create(new_booking("BKT-2-011125", "refunded")).unwrap();
        reg.create(new_booking("BKT-3-011125", "Paid")).unwrap();
        reg
    }

    #[test]
    fn create_then_find_returns_same_fields() {
        let mut reg = BookingRegistry::default();
        let created = reg.create(new_booking("BKT-0-011125", "PAID")).unwrap();

        let found = reg.find("BKT-0-011125").unwrap();
        assert_eq!(found, &created);
        assert_eq!(found.surname, "Santos");
        assert_eq!(found.middle_name, "Luisa");
        assert_eq!(found.first_name, "Maria");
        assert_eq!(found.start_date, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(found.end_date, NaiveDate::from_ymd_opt(2025, 11, 5).unwrap());
        assert_eq!(found.status, BookingStatus::Paid);
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut reg = registry();
        let err = reg.create(new_booking("BKT-1-011125", "PAID")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.find("BKT-1-011125").unwrap().status, BookingStatus::PendingPayment);
    }

    #[test]
    fn invalid_status_is_rejected_on_create() {
        let mut reg = BookingRegistry::default();
        let err = reg.create(new_booking("BKT-0-011125", "CANCELLED")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(reg.is_empty());
    }

    #[test]
    fn malformed_date_is_a_parse_error() {
        let mut reg = BookingRegistry::default();
        let err = reg
            .create(NewBooking {
                end_date: "2025/11/05".into(),
                ..new_booking("BKT-0-011125", "PAID")
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(reg.is_empty());
    }

    #[test]
    fn reversed_dates_are_accepted() {
        let mut reg = BookingRegistry::default();
        let booking = reg
            .create(NewBooking {
                start_date: "2025-11-10".into(),
                end_date: "2025-11-05".into(),
                ..new_booking("BKT-0-011125", "PAID")
            })
            .unwrap();
        assert_eq!(booking.nights(), -5);
    }

    #[test]
    fn delete_removes_exactly_one_booking() {
        let mut reg = registry();
        reg.delete("BKT-2-011125").unwrap();
        assert_eq!(reg.len(), 3);
        assert!(reg.find("BKT-2-011125").is_none());

        let err = reg.delete("BKT-2-011125").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn refunded_can_return_to_paid() {
        let mut reg = registry();
        reg.update_status("BKT-2-011125", "paid").unwrap();
        assert_eq!(reg.find("BKT-2-011125").unwrap().status, BookingStatus::Paid);
    }

    #[test]
    fn invalid_status_update_leaves_booking_unchanged() {
        let mut reg = registry();
        let err = reg.update_status("BKT-1-011125", "VOID").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(reg.find("BKT-1-011125").unwrap().status, BookingStatus::PendingPayment);

        let err = reg.update_status("BKT-9-011125", "PAID").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn filters_select_by_status() {
        let reg = registry();
        let paid: Vec<&str> = reg.list_paid().iter().map(|b| b.booking_id.as_str()).collect();
        assert_eq!(paid, vec!["BKT-0-011125", "BKT-3-011125"]);
        assert_eq!(reg.list_pending().len(), 1);
        assert_eq!(reg.list_refunded().len(), 1);
    }

    #[test]
    fn next_booking_id_uses_current_count() {
        let reg = registry();
        let today = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(reg.next_booking_id(today), "BKT-4-011125");
        assert_eq!(BookingRegistry::default().next_booking_id(today), "BKT-0-011125");
    }

    #[test]
    fn new_keeps_first_of_duplicate_ids() {
        let reg = registry();
        let mut rows = reg.bookings().to_vec();
        rows.push(rows[0].clone());
        let rebuilt = BookingRegistry::new(rows);
        assert_eq!(rebuilt.len(), 4);
    }

    #[test]
    fn flush_round_trips() {
        let file = TempCsv::new("booking-registry");
        let reg = registry();
        reg.flush(file.path()).unwrap();

        let outcome = read_bookings(file.path()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.records, reg.bookings());
    }

    #[test]
    fn blank_or_padded_identifier_is_rejected() {
        let mut reg = registry();
        for id in ["", "   ", " BKT-9-011125", "BKT-9-011125\t"] {
            let err = reg.create(new_booking(id, "PAID")).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{:?}", id);
        }
        assert_eq!(reg.len(), 4);

        let file = TempCsv::new("booking-registry");
        reg.flush(file.path()).unwrap();
        let outcome = read_bookings(file.path()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.records.len(), 4);
    }

    #[test]
    fn padded_names_are_stored_trimmed_and_read_back_equal() {
        let mut reg = BookingRegistry::default();
        let created = reg
            .create(NewBooking {
                surname: " de la Cruz ".into(),
                middle_name: "  ".into(),
                first_name: "\tJuan".into(),
                ..new_booking("BKT-0-011125", "PAID")
            })
            .unwrap();
        assert_eq!(created.surname, "de la Cruz");
        assert_eq!(created.middle_name, "");
        assert_eq!(created.first_name, "Juan");

        let file = TempCsv::new("booking-registry");
        reg.flush(file.path()).unwrap();
        let outcome = read_bookings(file.path()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.records, reg.bookings());
    }
}
