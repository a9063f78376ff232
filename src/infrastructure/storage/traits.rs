//! Storage trait definitions

use csv::StringRecord;

use crate::domain::DomainResult;

/// An entity stored as one row of a flat CSV file.
pub trait CsvRecord: Sized {
    /// Entity name used in log lines
    const ENTITY: &'static str;

    /// Header line, which is also the column layout of every row
    const HEADER: &'static [&'static str];

    /// Build the entity from a trimmed row holding at least
    /// `HEADER.len()` fields. Extra trailing fields are ignored.
    fn from_record(record: &StringRecord) -> DomainResult<Self>;

    /// Serialize in `HEADER` order.
    fn to_record(&self) -> Vec<String>;
}
