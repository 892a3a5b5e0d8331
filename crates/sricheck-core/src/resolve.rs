//! Turn a script `src` into an absolute URL and apply the ignored-host list.
//!
//! Relative and protocol-relative (`//cdn/x.js`) sources are joined against the
//! page URL the way a browser would. Only http(s) results are fetchable.

use std::collections::HashSet;
use url::Url;

use crate::error::ResourceFailure;

/// Resolve `src` against `page`. Non-http(s) results (`data:`, `javascript:`) fail.
pub fn resolve_src(page: &Url, src: &str) -> Result<Url, ResourceFailure> {
    let src = src.trim();
    if src.is_empty() {
        return Err(ResourceFailure::Unresolvable("empty src".to_string()));
    }
    let url = page
        .join(src)
        .map_err(|e| ResourceFailure::Unresolvable(format!("{src}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ResourceFailure::Unresolvable(format!(
            "{src}: scheme {other:?} is not fetchable"
        ))),
    }
}

/// Hosts whose scripts are not reported. Entries are `host` or `host:port`,
/// compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct IgnoredHosts {
    hosts: HashSet<String>,
}

impl IgnoredHosts {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { hosts }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        if self.hosts.contains(&host) {
            return true;
        }
        match url.port() {
            Some(port) => self.hosts.contains(&format!("{host}:{port}")),
            None => false,
        }
    }
}
