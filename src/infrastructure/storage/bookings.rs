//! Booking file:
//! `BookingID,Surname,MiddleName,FirstName,PartySize,StartDate,EndDate,Status`

use std::path::Path;

use csv::StringRecord;

use super::csv_file::{self, field, parse_field, ReadOutcome};
use super::CsvRecord;
use crate::domain::booking::parse_date;
use crate::domain::{Booking, BookingStatus, DomainError, DomainResult};
use crate::shared::AppResult;

impl CsvRecord for Booking {
    const ENTITY: &'static str = "booking";
    const HEADER: &'static [&'static str] = &[
        "BookingID",
        "Surname",
        "MiddleName",
        "FirstName",
        "PartySize",
        "StartDate",
        "EndDate",
        "Status",
    ];

    fn from_record(record: &StringRecord) -> DomainResult<Self> {
        let booking_id = field(record, 0);
        if booking_id.is_empty() {
            return Err(DomainError::Parse("BookingID is empty".into()));
        }

        Ok(Booking {
            booking_id: booking_id.to_string(),
            surname: field(record, 1).to_string(),
            middle_name: field(record, 2).to_string(),
            first_name: field(record, 3).to_string(),
            party_size: parse_field::<u32>(record, 4, "PartySize")?,
            start_date: parse_date(field(record, 5))?,
            end_date: parse_date(field(record, 6))?,
            status: parse_field::<BookingStatus>(record, 7, "Status")?,
        })
    }

    fn to_record(&self) -> Vec<String> {
        self.to_row().into()
    }
}

pub fn read_bookings(path: impl AsRef<Path>) -> AppResult<ReadOutcome<Booking>> {
    csv_file::read_records(path.as_ref())
}

pub fn init_bookings_file(path: impl AsRef<Path>) -> AppResult<()> {
    csv_file::init_file::<Booking>(path.as_ref())
}

pub fn save_bookings(path: impl AsRef<Path>, bookings: &[Booking]) -> AppResult<()> {
    csv_file::save_records(path.as_ref(), bookings)
}

pub fn append_booking(path: impl AsRef<Path>, booking: &Booking) -> AppResult<()> {
    csv_file::append_record(path.as_ref(), booking)
}
