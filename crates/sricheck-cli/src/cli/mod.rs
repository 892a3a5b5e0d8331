//! CLI for sricheck.

mod check;

use anyhow::Result;
use clap::Parser;
use sricheck_core::config;
use sricheck_core::fetch::parse_header;
use sricheck_core::sri::SriAlgorithm;

use check::run_check;

/// Find `<script>` tags missing Subresource Integrity and generate hashes for them.
#[derive(Debug, Parser)]
#[command(name = "sricheck", version)]
#[command(about = "Find script tags missing Subresource Integrity", long_about = None)]
pub struct Cli {
    /// Target URL to check for SRI.
    pub url: String,

    /// Generate integrity hashes for scripts missing them.
    #[arg(short, long)]
    pub generate: bool,

    /// Output every script tag regardless of SRI status.
    #[arg(short, long)]
    pub all: bool,

    /// HTTP header to send with every request ("Name: value"). Repeatable.
    #[arg(short = 'H', long = "header", value_name = "HEADER", value_parser = parse_header_arg)]
    pub headers: Vec<(String, String)>,

    /// Ignore scripts served from this host (e.g. cdn.example.com). Repeatable.
    #[arg(short, long = "ignore", value_name = "HOST")]
    pub ignore: Vec<String>,

    /// Digest for generated hashes: sha256, sha384 or sha512 (default from config, else sha384).
    #[arg(long, value_name = "ALGO", value_parser = parse_algorithm_arg)]
    pub algorithm: Option<SriAlgorithm>,
}

fn parse_header_arg(s: &str) -> Result<(String, String)> {
    parse_header(s)
}

fn parse_algorithm_arg(s: &str) -> Result<SriAlgorithm> {
    s.parse()
}

/// Exit status for a failed parse: 0 for `--help`/`--version`, 1 for usage errors.
pub(crate) fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

impl Cli {
    /// Parse argv, printing clap's message and exiting on failure.
    pub fn parse_or_exit() -> Self {
        Cli::try_parse().unwrap_or_else(|err| {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        })
    }

    pub fn run(&self) -> Result<()> {
        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);
        run_check(self, &cfg)
    }
}

#[cfg(test)]
mod tests;
