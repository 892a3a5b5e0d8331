//! Fetch error type.

/// Why a single GET failed. Callers decide whether that is fatal.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Not an absolute http(s) URL.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Curl reported an error (timeout, DNS, connection refused, TLS, ...).
    #[error(transparent)]
    Transport(#[from] curl::Error),
    /// Response had a non-2xx status after following redirects.
    #[error("HTTP {status}")]
    Http { status: u32 },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }
}
