//! Flat-file storage for rooms and bookings

pub mod bookings;
pub mod csv_file;
pub mod rooms;
mod traits;

pub use bookings::{append_booking, init_bookings_file, read_bookings, save_bookings};
pub use csv_file::{ReadOutcome, RowError};
pub use rooms::{append_room, init_rooms_file, read_rooms, save_rooms};
pub use traits::CsvRecord;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    /// Unique CSV path under the temp dir, removed on drop.
    pub struct TempCsv {
        path: PathBuf,
    }

    impl TempCsv {
        pub fn new(prefix: &str) -> Self {
            let path = std::env::temp_dir().join(format!("{}-{}.csv", prefix, uuid::Uuid::new_v4()));
            Self { path }
        }

        pub fn with_contents(prefix: &str, contents: &str) -> Self {
            let file = Self::new(prefix);
            std::fs::write(&file.path, contents).unwrap();
            file
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn contents(&self) -> String {
            std::fs::read_to_string(&self.path).unwrap()
        }
    }

    impl Drop for TempCsv {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
