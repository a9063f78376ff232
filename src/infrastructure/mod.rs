pub mod storage;

pub use storage::{
    append_booking, append_room, init_bookings_file, init_rooms_file, read_bookings, read_rooms,
    save_bookings, save_rooms, CsvRecord, ReadOutcome, RowError,
};
