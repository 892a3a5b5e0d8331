//! Error types for a check run.

use crate::fetch::FetchError;

/// Fatal errors: the run cannot produce a report.
#[derive(Debug, thiserror::Error)]
pub enum SriError {
    /// The page itself could not be fetched.
    #[error("failed to fetch {url}")]
    Network {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Why one script could not be hashed.
#[derive(Debug, thiserror::Error)]
pub enum ResourceFailure {
    #[error("cannot resolve src: {0}")]
    Unresolvable(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A script skipped in generate mode. Never fatal to the run.
#[derive(Debug, thiserror::Error)]
#[error("could not hash {src}: {reason}")]
pub struct ResourceFetchError {
    /// `src` as written in the page.
    pub src: String,
    /// Absolute URL that was requested, if resolution got that far.
    pub url: Option<String>,
    pub reason: ResourceFailure,
}
