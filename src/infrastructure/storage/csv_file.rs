//! Generic CSV record file
//!
//! One implementation of the read / init / save / append contract shared by
//! the room and booking files.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::{debug, info, warn};

use super::CsvRecord;
use crate::domain::{DomainError, DomainResult};
use crate::shared::{AppResult, InfraError};

/// Row that stopped a read.
#[derive(Debug)]
pub struct RowError {
    /// 1-based line number in the file
    pub line: u64,
    pub error: DomainError,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Result of reading a record file.
///
/// A row that fails to parse ends the read. Everything parsed before it is
/// kept in `records` and the failure is reported in `aborted`.
#[derive(Debug)]
pub struct ReadOutcome<T> {
    pub records: Vec<T>,
    pub aborted: Option<RowError>,
}

impl<T> ReadOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Field `idx` of a trimmed row, empty when missing.
pub(crate) fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// Parse field `idx`, naming the column in the error.
pub(crate) fn parse_field<F>(record: &StringRecord, idx: usize, column: &str) -> DomainResult<F>
where
    F: FromStr,
    F::Err: std::fmt::Display,
{
    let raw = field(record, idx);
    raw.parse::<F>()
        .map_err(|e| DomainError::Parse(format!("{} '{}': {}", column, raw, e)))
}

/// Read every record after the header line.
///
/// Blank rows and rows with fewer than `T::HEADER.len()` fields are skipped.
/// Missing or unreadable files are an I/O error.
pub fn read_records<T: CsvRecord>(path: &Path) -> AppResult<ReadOutcome<T>> {
    let file = File::open(path).map_err(|e| InfraError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let expected = T::HEADER.len();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                let error = DomainError::Parse(e.to_string());
                warn!(
                    "{} read of {} stopped at line {}: {}",
                    T::ENTITY,
                    path.display(),
                    line,
                    error
                );
                return Ok(ReadOutcome {
                    records,
                    aborted: Some(RowError { line, error }),
                });
            }
        };

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.iter().all(str::is_empty) {
            continue;
        }
        if row.len() < expected {
            debug!(
                "Skipping {} row at line {}: {} of {} fields",
                T::ENTITY,
                line,
                row.len(),
                expected
            );
            continue;
        }

        match T::from_record(&row) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(
                    "{} read of {} stopped at line {}: {} ({} rows kept)",
                    T::ENTITY,
                    path.display(),
                    line,
                    error,
                    records.len()
                );
                return Ok(ReadOutcome {
                    records,
                    aborted: Some(RowError { line, error }),
                });
            }
        }
    }

    info!("Loaded {} {} rows from {}", records.len(), T::ENTITY, path.display());
    Ok(ReadOutcome {
        records,
        aborted: None,
    })
}

/// Overwrite `path` with the header line only.
pub fn init_file<T: CsvRecord>(path: &Path) -> AppResult<()> {
    save_records::<T>(path, &[])
}

/// Overwrite `path` with the header plus one row per item.
pub fn save_records<T: CsvRecord>(path: &Path, items: &[T]) -> AppResult<()> {
    create_parent_dir(path)?;
    let file = File::create(path).map_err(|e| InfraError::io(path, e))?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    writer.write_record(T::HEADER)?;
    for item in items {
        writer.write_record(item.to_record())?;
    }
    writer.flush().map_err(|e| InfraError::io(path, e))?;

    info!("Saved {} {} rows to {}", items.len(), T::ENTITY, path.display());
    Ok(())
}

/// Append one row without rewriting the file.
///
/// A missing or empty file gets the header first.
pub fn append_record<T: CsvRecord>(path: &Path, item: &T) -> AppResult<()> {
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(InfraError::io(path, e).into()),
    };
    if len == 0 {
        create_parent_dir(path)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| InfraError::io(path, e))?;

    if len > 0 && !ends_with_newline(&mut file).map_err(|e| InfraError::io(path, e))? {
        file.write_all(b"\n").map_err(|e| InfraError::io(path, e))?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);
    if len == 0 {
        writer.write_record(T::HEADER)?;
    }
    writer.write_record(item.to_record())?;
    writer.flush().map_err(|e| InfraError::io(path, e))?;

    debug!("Appended {} row to {}", T::ENTITY, path.display());
    Ok(())
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn create_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| InfraError::io(dir, e))?;
            Ok(())
        }
        _ => Ok(()),
    }
}
