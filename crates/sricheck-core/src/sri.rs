//! SRI digest computation.
//!
//! An integrity value is `<algorithm>-<base64(digest(bytes))>` using the
//! standard base64 alphabet with padding, as browsers expect.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// Hash algorithms allowed in an SRI `integrity` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SriAlgorithm {
    Sha256,
    #[default]
    Sha384,
    Sha512,
}

impl SriAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            SriAlgorithm::Sha256 => "sha256",
            SriAlgorithm::Sha384 => "sha384",
            SriAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for SriAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SriAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(SriAlgorithm::Sha256),
            "sha384" => Ok(SriAlgorithm::Sha384),
            "sha512" => Ok(SriAlgorithm::Sha512),
            other => anyhow::bail!("unsupported SRI algorithm: {other} (expected sha256, sha384 or sha512)"),
        }
    }
}

/// Compute the integrity value for `bytes`, e.g. `sha384-OLBgp1Gs...`.
pub fn integrity_value(algorithm: SriAlgorithm, bytes: &[u8]) -> String {
    let digest = match algorithm {
        SriAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
        SriAlgorithm::Sha384 => Sha384::digest(bytes).to_vec(),
        SriAlgorithm::Sha512 => Sha512::digest(bytes).to_vec(),
    };
    format!("{}-{}", algorithm, STANDARD.encode(digest))
}
