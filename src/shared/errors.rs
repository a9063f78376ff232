use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn room_not_found(unit_number: u32) -> Self {
        Self::NotFound {
            entity: "Room",
            field: "unit_number",
            value: unit_number.to_string(),
        }
    }

    pub fn booking_not_found(booking_id: &str) -> Self {
        Self::NotFound {
            entity: "Booking",
            field: "booking_id",
            value: booking_id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            // A duplicate key is a rejected input like any other.
            Self::Validation(_) | Self::Conflict(_) => ErrorKind::Validation,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{} was only loaded up to line {line}; refusing to overwrite it", .path.display())]
    PartialLoad { path: PathBuf, line: u64 },
}

impl InfraError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the underlying failure is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(io) => io.kind() == std::io::ErrorKind::NotFound,
                _ => false,
            },
            Self::PartialLoad { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        Self::Infra(InfraError::Csv(e))
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::Infra(_) => ErrorKind::Io,
        }
    }
}

/// Coarse outcome class callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Parse,
    NotFound,
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Parse => "parse",
            Self::NotFound => "not-found",
            Self::Io => "io",
        };
        f.write_str(s)
    }
}

/// Result type for registry operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for operations that touch the filesystem
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_reports_validation_kind() {
        let err = DomainError::Conflict("Room 101".into());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Already exists: Room 101");
    }

    #[test]
    fn not_found_message_names_the_key() {
        let err = DomainError::room_not_found(404);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Not found: Room with unit_number=404");
    }

    #[test]
    fn infra_errors_are_io_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = InfraError::io("DB/rooms.csv", io).into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(matches!(err, AppError::Infra(ref e) if e.is_not_found()));
    }

    #[test]
    fn partial_load_names_file_and_line() {
        let err: AppError = InfraError::PartialLoad {
            path: PathBuf::from("DB/rooms.csv"),
            line: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(
            err.to_string(),
            "DB/rooms.csv was only loaded up to line 3; refusing to overwrite it"
        );
    }
}
