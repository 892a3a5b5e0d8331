//! Generate replacement tags carrying an SRI hash.
//!
//! Scripts are fetched one at a time. A script that cannot be fetched is
//! recorded as a failure and left out of the output; the batch continues.

use url::Url;

use crate::error::{ResourceFailure, ResourceFetchError};
use crate::fetch::Fetch;
use crate::resolve::resolve_src;
use crate::sri::{integrity_value, SriAlgorithm};
use crate::tag::{ScriptTag, ATTR_CROSSORIGIN, ATTR_INTEGRITY};

/// Generated tags (input order) and the scripts that could not be hashed.
#[derive(Debug, Default)]
pub struct GenerateOutcome {
    pub generated: Vec<ScriptTag>,
    pub failures: Vec<ResourceFetchError>,
}

/// Hash every tag in `missing` that has a `src`. Inline scripts are skipped.
pub fn generate_integrity<F: Fetch + ?Sized>(
    fetcher: &F,
    page: &Url,
    missing: &[ScriptTag],
    algorithm: SriAlgorithm,
) -> GenerateOutcome {
    let mut outcome = GenerateOutcome::default();

    for tag in missing {
        let Some(src) = tag.src() else {
            continue;
        };
        match hash_tag(fetcher, page, tag, src, algorithm) {
            Ok(new_tag) => outcome.generated.push(new_tag),
            Err(e) => {
                tracing::warn!("{}", e);
                outcome.failures.push(e);
            }
        }
    }

    tracing::info!(
        "generated {} integrity values, {} failed",
        outcome.generated.len(),
        outcome.failures.len()
    );
    outcome
}

fn hash_tag<F: Fetch + ?Sized>(
    fetcher: &F,
    page: &Url,
    tag: &ScriptTag,
    src: &str,
    algorithm: SriAlgorithm,
) -> Result<ScriptTag, ResourceFetchError> {
    let url = resolve_src(page, src).map_err(|reason| ResourceFetchError {
        src: src.to_string(),
        url: None,
        reason,
    })?;
    let bytes = fetcher
        .fetch(url.as_str())
        .map_err(|e| ResourceFetchError {
            src: src.to_string(),
            url: Some(url.to_string()),
            reason: ResourceFailure::Fetch(e),
        })?;

    let integrity = integrity_value(algorithm, &bytes);
    tracing::debug!("{} ({} bytes) -> {}", url, bytes.len(), integrity);
    Ok(tag
        .with_attr(ATTR_INTEGRITY, integrity)
        .with_attr(ATTR_CROSSORIGIN, "anonymous"))
}
