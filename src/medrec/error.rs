use crate::store::RecordKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedrecError {
    /// A lookup by identifier found no matching record. User-visible and
    /// non-fatal: the menu loop reports it and carries on.
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: RecordKind, id: u32 },

    /// The backing file could not be opened, read, or written. Absence of
    /// the file on first run is NOT this error; stores treat that as empty.
    #[error("storage unavailable: {0}")]
    Storage(#[from] std::io::Error),

    /// The database could not be opened or a statement failed.
    #[error("storage unavailable: {0}")]
    Database(#[from] rusqlite::Error),

    /// Malformed user input: non-numeric where a number was expected, or
    /// text exceeding a field's capacity. Aborts the current operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A store file exists but is not something we wrote (bad header,
    /// truncated slot, corrupt field length).
    #[error("store error: {0}")]
    Store(String),
}

impl MedrecError {
    /// True for lookup misses, which callers report as a plain message
    /// rather than an error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MedrecError::RecordNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MedrecError>;
