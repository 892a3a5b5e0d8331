//! Print a check result as markup.
//!
//! Tag lists go to the `out` writer (stdout in the CLI); per-script failures go
//! to a separate writer so stdout stays pasteable markup.

use std::io::{self, Write};

use crate::check::CheckReport;
use crate::error::ResourceFetchError;
use crate::tag::ScriptTag;

pub const NOTHING_MISSING: &str = "[*] No script tags found without integrity attribute";

/// Write the tag lists. With `list_all`, the first list is every script tag
/// on the page instead of only the ones missing `integrity`.
pub fn write_report<W: Write>(out: &mut W, report: &CheckReport, list_all: bool) -> io::Result<()> {
    if list_all {
        writeln!(out, "[*] Script tags ({}):", report.tags.len())?;
        write_tags(out, &report.tags)?;
    } else if report.missing.is_empty() {
        writeln!(out, "{}", NOTHING_MISSING)?;
    } else {
        writeln!(
            out,
            "[*] Script tags missing integrity attribute ({}):",
            report.missing.len()
        )?;
        write_tags(out, &report.missing)?;
    }

    if let Some(outcome) = &report.generated {
        if outcome.generated.is_empty() {
            writeln!(out, "[*] No replacement tags generated")?;
        } else {
            writeln!(out, "[*] Generated tags ({}):", outcome.generated.len())?;
            write_tags(out, &outcome.generated)?;
        }
    }
    Ok(())
}

pub fn write_failures<W: Write>(err: &mut W, failures: &[ResourceFetchError]) -> io::Result<()> {
    for f in failures {
        writeln!(err, "[!] {}", f)?;
    }
    Ok(())
}

fn write_tags<W: Write>(out: &mut W, tags: &[ScriptTag]) -> io::Result<()> {
    for tag in tags {
        writeln!(out, "{}", tag)?;
    }
    Ok(())
}
