//! One check run: fetch the page, extract and classify its scripts, and
//! optionally generate integrity values for the ones missing them.

use url::Url;

use crate::error::SriError;
use crate::extract::extract_script_tags;
use crate::fetch::{Fetch, FetchError};
use crate::filter::{partition_by_integrity, Partition};
use crate::generate::{generate_integrity, GenerateOutcome};
use crate::resolve::{resolve_src, IgnoredHosts};
use crate::sri::SriAlgorithm;
use crate::tag::ScriptTag;

/// What to check and how.
#[derive(Debug, Clone)]
pub struct SriCheck {
    pub url: String,
    pub generate: bool,
    pub algorithm: SriAlgorithm,
    pub ignored: IgnoredHosts,
}

impl SriCheck {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            generate: false,
            algorithm: SriAlgorithm::default(),
            ignored: IgnoredHosts::default(),
        }
    }

    /// Run the pipeline. Only a failure to fetch the page itself is an error;
    /// per-script failures end up in `CheckReport::generated`.
    pub fn run<F: Fetch + ?Sized>(&self, fetcher: &F) -> Result<CheckReport, SriError> {
        let page = Url::parse(&self.url).map_err(|e| SriError::Network {
            url: self.url.clone(),
            source: FetchError::InvalidUrl {
                url: self.url.clone(),
                reason: e.to_string(),
            },
        })?;

        tracing::info!("checking {}", page);
        let body = fetcher
            .fetch(page.as_str())
            .map_err(|source| SriError::Network {
                url: self.url.clone(),
                source,
            })?;
        let html = String::from_utf8_lossy(&body);

        let tags = extract_script_tags(&html);
        let partition = partition_by_integrity(tags.clone());
        let (missing, ignored) = self.split_ignored(&page, &partition.missing);

        let generated = if self.generate {
            Some(generate_integrity(fetcher, &page, &missing, self.algorithm))
        } else {
            None
        };

        let report = CheckReport {
            page_url: page.to_string(),
            tags,
            partition,
            missing,
            ignored,
            generated,
        };
        tracing::info!(
            "{}: {} scripts, {} with integrity, {} missing, {} ignored",
            report.page_url,
            report.tags.len(),
            report.partition.with_integrity.len(),
            report.missing.len(),
            report.ignored.len()
        );
        Ok(report)
    }

    fn split_ignored(&self, page: &Url, missing: &[ScriptTag]) -> (Vec<ScriptTag>, Vec<ScriptTag>) {
        if self.ignored.is_empty() {
            return (missing.to_vec(), Vec::new());
        }
        missing.iter().cloned().partition(|tag| {
            let ignored = tag
                .src()
                .and_then(|src| resolve_src(page, src).ok())
                .is_some_and(|url| self.ignored.matches(&url));
            if ignored {
                tracing::info!("ignoring {}", tag);
            }
            !ignored
        })
    }
}

/// Result of one run.
#[derive(Debug)]
pub struct CheckReport {
    /// Page URL as fetched.
    pub page_url: String,
    /// Every script tag, in document order.
    pub tags: Vec<ScriptTag>,
    pub partition: Partition,
    /// `partition.missing` minus tags served from ignored hosts.
    pub missing: Vec<ScriptTag>,
    pub ignored: Vec<ScriptTag>,
    /// Present only in generate mode.
    pub generated: Option<GenerateOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tests::CannedFetcher;
    use crate::sri::integrity_value;

    const PAGE: &str = "https://example.com/";

    #[test]
    fn page_404_is_network_error() {
        let fetcher = CannedFetcher::default().status(PAGE, 404);
        let err = SriCheck::new(PAGE).run(&fetcher).unwrap_err();
        match err {
            SriError::Network { url, source } => {
                assert_eq!(url, PAGE);
                assert!(matches!(source, FetchError::Http { status: 404 }));
            }
        }
    }

    #[test]
    fn invalid_page_url_is_network_error() {
        let fetcher = CannedFetcher::default();
        let err = SriCheck::new("not a url").run(&fetcher).unwrap_err();
        assert!(matches!(
            err,
            SriError::Network {
                source: FetchError::InvalidUrl { .. },
                ..
            }
        ));
        assert!(fetcher.requested.borrow().is_empty());
    }

    #[test]
    fn default_mode_does_not_fetch_scripts() {
        let html = br#"<script src="a.js"></script><script src="b.js" integrity="sha384-X"></script>"#;
        let fetcher = CannedFetcher::default().ok(PAGE, html);
        let report = SriCheck::new(PAGE).run(&fetcher).unwrap();
        assert_eq!(report.tags.len(), 2);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].src(), Some("a.js"));
        assert_eq!(report.partition.with_integrity.len(), 1);
        assert!(report.generated.is_none());
        assert_eq!(fetcher.requested.borrow().len(), 1);
    }

    #[test]
    fn generate_mode_skips_failed_script() {
        let html = br#"<script src="a.js"></script><script src="c.js"></script><script>inline()</script>"#;
        let fetcher = CannedFetcher::default()
            .ok(PAGE, html)
            .status("https://example.com/a.js", 500)
            .ok("https://example.com/c.js", b"c();");
        let mut check = SriCheck::new(PAGE);
        check.generate = true;
        let report = check.run(&fetcher).unwrap();

        assert_eq!(report.missing.len(), 3);
        let outcome = report.generated.expect("generate mode");
        assert_eq!(outcome.generated.len(), 1);
        assert_eq!(outcome.generated[0].src(), Some("c.js"));
        assert_eq!(
            outcome.generated[0].get("integrity"),
            Some(integrity_value(SriAlgorithm::Sha384, b"c();").as_str())
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].src, "a.js");
    }

    #[test]
    fn ignored_hosts_are_dropped_from_missing() {
        let html = br#"
            <script src="https://js.hs-scripts.com/123.js"></script>
            <script src="https://cdn.example.net/lib.js"></script>
            <script>inline()</script>"#;
        let fetcher = CannedFetcher::default()
            .ok(PAGE, html)
            .ok("https://cdn.example.net/lib.js", b"lib");
        let mut check = SriCheck::new(PAGE);
        check.generate = true;
        check.ignored = IgnoredHosts::new(["js.hs-scripts.com"]);
        let report = check.run(&fetcher).unwrap();

        assert_eq!(report.partition.missing.len(), 3);
        assert_eq!(report.ignored.len(), 1);
        assert_eq!(report.missing.len(), 2);
        let outcome = report.generated.unwrap();
        assert_eq!(outcome.generated.len(), 1);
        assert!(!fetcher
            .requested
            .borrow()
            .iter()
            .any(|u| u.contains("hs-scripts")));
    }

    #[test]
    fn non_utf8_page_is_decoded_lossily() {
        let mut html = b"<script src=\"a.js\"></script>".to_vec();
        html.extend_from_slice(&[0xff, 0xfe]);
        let fetcher = CannedFetcher::default().ok(PAGE, &html);
        let report = SriCheck::new(PAGE).run(&fetcher).unwrap();
        assert_eq!(report.missing.len(), 1);
    }
}
