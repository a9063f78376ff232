//! Room file: `UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice`

use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;

use super::csv_file::{self, field, parse_field, ReadOutcome};
use super::CsvRecord;
use crate::domain::{DomainResult, Room, RoomStatus};
use crate::shared::AppResult;

impl CsvRecord for Room {
    const ENTITY: &'static str = "room";
    const HEADER: &'static [&'static str] =
        &["UnitNumber", "UnitCapacity", "UnitStatus", "BookingID", "BasePrice"];

    fn from_record(record: &StringRecord) -> DomainResult<Self> {
        let unit_number = parse_field::<u32>(record, 0, "UnitNumber")?;
        let capacity = parse_field::<u32>(record, 1, "UnitCapacity")?;
        let status = parse_field::<RoomStatus>(record, 2, "UnitStatus")?;
        // Older files spell an unbooked room as the literal "null".
        let booking_id = match field(record, 3) {
            "" => None,
            s if s.eq_ignore_ascii_case("null") => None,
            s => Some(s.to_string()),
        };
        let base_price = parse_field::<Decimal>(record, 4, "BasePrice")?;

        Ok(Room::new(unit_number, capacity, status, booking_id, base_price))
    }

    fn to_record(&self) -> Vec<String> {
        self.to_row().into()
    }
}

pub fn read_rooms(path: impl AsRef<Path>) -> AppResult<ReadOutcome<Room>> {
    csv_file::read_records(path.as_ref())
}

pub fn init_rooms_file(path: impl AsRef<Path>) -> AppResult<()> {
    csv_file::init_file::<Room>(path.as_ref())
}

pub fn save_rooms(path: impl AsRef<Path>, rooms: &[Room]) -> AppResult<()> {
    csv_file::save_records(path.as_ref(), rooms)
}

pub fn append_room(path: impl AsRef<Path>, room: &Room) -> AppResult<()> {
    csv_file::append_record(path.as_ref(), room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::storage::test_support::TempCsv;
    use crate::shared::ErrorKind;

    fn room(unit: u32, status: RoomStatus, booking: Option<&str>, price: Decimal) -> Room {
        Room::new(unit, 2, status, booking.map(String::from), price)
    }

    #[test]
    fn save_then_read_returns_equal_rooms() {
        let file = TempCsv::new("rooms");
        let rooms = vec![
            room(101, RoomStatus::Available, None, Decimal::new(10000, 2)),
            room(102, RoomStatus::Occupied, Some("BKT-0-011025"), Decimal::new(1455, 1)),
            room(201, RoomStatus::Maintenance, None, Decimal::new(90, 0)),
        ];

        save_rooms(file.path(), &rooms).unwrap();
        let outcome = read_rooms(file.path()).unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.records, rooms);
    }

    #[test]
    fn saved_file_uses_five_columns() {
        let file = TempCsv::new("rooms");
        save_rooms(
            file.path(),
            &[room(101, RoomStatus::Available, None, Decimal::new(1000, 1))],
        )
        .unwrap();

        assert_eq!(
            file.contents(),
            "UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice\n101,2,Available,,100.0\n"
        );
    }

    #[test]
    fn header_only_file_is_empty() {
        let file = TempCsv::new("rooms");
        init_rooms_file(file.path()).unwrap();

        let outcome = read_rooms(file.path()).unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn malformed_row_keeps_earlier_rows() {
        let file = TempCsv::with_contents(
            "rooms",
            "UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice\n\
             101,2,Available,,100\n\
             102,two,Available,,120\n\
             103,4,Available,,150\n",
        );

        let outcome = read_rooms(file.path()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].unit_number, 101);

        let aborted = outcome.aborted.unwrap();
        assert_eq!(aborted.line, 3);
        assert!(matches!(aborted.error, DomainError::Parse(_)));
    }

    #[test]
    fn unknown_status_aborts_read() {
        let file = TempCsv::with_contents(
            "rooms",
            "UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice\n101,2,Cleaning,,100\n",
        );

        let outcome = read_rooms(file.path()).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.aborted.unwrap().error.kind(), ErrorKind::Parse);
    }

    #[test]
    fn short_and_blank_rows_are_skipped() {
        let file = TempCsv::with_contents(
            "rooms",
            "UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice\n\
             \n\
             101,2,Available\n\
             \x20\x20\n\
             102, 3 , occupied ,BKT-1-011025, 80.5 \n",
        );

        let outcome = read_rooms(file.path()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.records.len(), 1);
        let r = &outcome.records[0];
        assert_eq!(r.unit_number, 102);
        assert_eq!(r.capacity, 3);
        assert_eq!(r.status, RoomStatus::Occupied);
        assert_eq!(r.booking_id.as_deref(), Some("BKT-1-011025"));
        assert_eq!(r.base_price, Decimal::new(805, 1));
    }

    #[test]
    fn legacy_rows_with_duplicated_price_still_load() {
        let file = TempCsv::with_contents(
            "rooms",
            "UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice\n\
             101,2,Available,null,100.0,100.0\n",
        );

        let outcome = read_rooms(file.path()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(
            outcome.records,
            vec![room(101, RoomStatus::Available, None, Decimal::new(1000, 1))]
        );
    }

    #[test]
    fn append_adds_row_without_second_header() {
        let file = TempCsv::new("rooms");
        save_rooms(
            file.path(),
            &[room(101, RoomStatus::Available, None, Decimal::new(100, 0))],
        )
        .unwrap();
        append_room(
            file.path(),
            &room(102, RoomStatus::Occupied, Some("BKT-1-011025"), Decimal::new(120, 0)),
        )
        .unwrap();

        let contents = file.contents();
        assert_eq!(contents.matches("UnitNumber").count(), 1);

        let outcome = read_rooms(file.path()).unwrap();
        let units: Vec<u32> = outcome.records.iter().map(|r| r.unit_number).collect();
        assert_eq!(units, vec![101, 102]);
    }

    #[test]
    fn append_to_missing_file_writes_header() {
        let file = TempCsv::new("rooms");
        append_room(
            file.path(),
            &room(301, RoomStatus::Available, None, Decimal::new(75, 0)),
        )
        .unwrap();

        let outcome = read_rooms(file.path()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(file.contents().starts_with("UnitNumber,"));
    }

    #[test]
    fn append_after_unterminated_last_line() {
        let file = TempCsv::with_contents(
            "rooms",
            "UnitNumber,UnitCapacity,UnitStatus,BookingID,BasePrice\n101,2,Available,,100",
        );
        append_room(
            file.path(),
            &room(102, RoomStatus::Available, None, Decimal::new(100, 0)),
        )
        .unwrap();

        let outcome = read_rooms(file.path()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let file = TempCsv::new("rooms");
        let err = read_rooms(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
