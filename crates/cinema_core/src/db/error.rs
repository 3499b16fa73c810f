use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DbResult<T> = Result<T, DbError>;

/// Failures of the storage layer below the repositories.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build than this one.
    SchemaAhead { found: u32, supported: u32 },
    /// A worker panicked while holding the shared connection.
    Poisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaAhead { found, supported } => {
                write!(f, "schema v{found} is ahead of this build (v{supported})")
            }
            Self::Poisoned => f.write_str("store lock poisoned by a panicked worker"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
