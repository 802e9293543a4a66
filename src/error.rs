use crate::db::dao::SqlKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error taxonomy for the whole crate.
///
/// Everything fallible below `main` funnels into this enum. The shell catches
/// it once at the outer menu loop, reports the message, and keeps running;
/// nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error")]
    Sql(#[from] rusqlite::Error),

    /// A write failed inside a transaction. The rollback has already been
    /// attempted by the time this is raised.
    #[error("failed to persist project")]
    Persist(#[source] Box<Error>),

    #[error("unable to map row to {target}")]
    Mapping {
        target: &'static str,
        #[source]
        source: rusqlite::types::FromSqlError,
    },

    #[error("unsupported parameter type: declared {declared:?}, got {actual:?}")]
    UnsupportedType { declared: SqlKind, actual: SqlKind },

    #[error("no generated key returned for table {table}")]
    NoGeneratedKey { table: String },

    #[error("failed to apply migration {version} ({name})")]
    Migration {
        version: &'static str,
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("console I/O error")]
    Io(#[from] std::io::Error),
}
