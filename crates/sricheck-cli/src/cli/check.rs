//! The one command: check a page and print the report.

use anyhow::Result;
use sricheck_core::config::SriConfig;
use sricheck_core::fetch::CurlFetcher;
use sricheck_core::report::{write_failures, write_report};
use sricheck_core::resolve::IgnoredHosts;
use sricheck_core::SriCheck;
use std::io::{self, Write};

use super::Cli;

/// Merge flags over config. Ignored hosts are the union of both.
pub fn build_check(cli: &Cli, cfg: &SriConfig) -> SriCheck {
    let mut check = SriCheck::new(cli.url.clone());
    check.generate = cli.generate;
    check.algorithm = cli.algorithm.unwrap_or(cfg.algorithm);
    check.ignored = IgnoredHosts::new(cfg.ignored_hosts.iter().chain(cli.ignore.iter()));
    check
}

/// Run the check and print tag lists to stdout, per-script failures to stderr.
/// A page fetch failure is returned before anything is printed.
pub fn run_check(cli: &Cli, cfg: &SriConfig) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg.fetch_options(cli.headers.clone()));
    let report = build_check(cli, cfg).run(&fetcher)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, cli.all)?;
    out.flush()?;

    if let Some(outcome) = &report.generated {
        write_failures(&mut io::stderr().lock(), &outcome.failures)?;
    }
    Ok(())
}
