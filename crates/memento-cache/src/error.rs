use std::fmt;

#[derive(Debug)]
pub enum CacheError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    /// The origin could not produce the asset (network failure, missing file).
    Origin(String),
    Config(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Sqlite(e) => write!(f, "SQLite error: {e}"),
            CacheError::Io(e) => write!(f, "I/O error: {e}"),
            CacheError::Origin(msg) => write!(f, "origin fetch failed: {msg}"),
            CacheError::Config(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Sqlite(e) => Some(e),
            CacheError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for CacheError {
    fn from(e: rusqlite::Error) -> Self {
        CacheError::Sqlite(e)
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e)
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(e: reqwest::Error) -> Self {
        CacheError::Origin(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
