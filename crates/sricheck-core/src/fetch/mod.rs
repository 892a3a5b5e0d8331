//! HTTP GET of pages and scripts.
//!
//! Uses the curl crate (libcurl) Easy interface, one blocking request at a
//! time in the current thread. No retries: a failure is returned to the caller
//! which decides whether it is fatal (page) or per-tag (script).

mod error;

pub use error::FetchError;

use std::time::Duration;

/// Per-request settings shared by every fetch in a run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    /// Extra request headers, sent in order.
    pub headers: Vec<(String, String)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
            headers: Vec::new(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("sricheck/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse a `Name: value` header argument. The separator is `": "`, so a bare
/// `Name:value` or `Name:` is rejected.
pub fn parse_header(s: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = s
        .split_once(": ")
        .ok_or_else(|| anyhow::anyhow!("header must look like \"Name: value\", got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        anyhow::bail!("invalid header name in {s:?}");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Anything that can GET a URL and hand back the body bytes.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// libcurl-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        check_url(url)?;
        match get(url, &self.options) {
            Ok(body) => {
                tracing::debug!("GET {} -> {} bytes", url, body.len());
                Ok(body)
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("GET {} timed out", url);
                } else {
                    tracing::debug!("GET {} failed: {}", url, e);
                }
                Err(e)
            }
        }
    }
}

/// Only absolute http(s) URLs reach libcurl (it would also accept `file://`).
fn check_url(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

fn get(url: &str, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(&opts.user_agent)?;

    if !opts.headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in &opts.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }
    Ok(body)
}
