//! Unified error types for offcache.

use tokio_rusqlite::rusqlite;

/// Unified error types for the offcache workspace.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty cache name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A stored entry had an unrecognized response kind column.
    #[error("CACHE_ERROR: unknown response kind: {0}")]
    UnknownKind(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Transport-level network failure (DNS, connect, timeout, read).
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Response body exceeded the configured size cap.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// A precache asset fetch came back with a non-success status.
    #[error("PRECACHE_FAILED: {url} returned status {status}")]
    PrecacheFailed { url: String, status: u16 },
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PrecacheFailed { url: "https://example.com/app.css".into(), status: 503 };
        assert!(err.to_string().contains("PRECACHE_FAILED"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_network_error_display() {
        let err = Error::Network("dns failure".into());
        assert!(err.to_string().starts_with("NETWORK_ERROR"));
    }
}
