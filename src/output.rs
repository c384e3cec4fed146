use std::path::PathBuf;

use serde::Serialize;

use crate::scan::ScanStats;

/// What one `scan` run produced, as printed after the reports are written.
#[derive(Debug, Serialize)]
pub struct ScanSummary<'a> {
    pub project: &'a str,
    #[serde(flatten)]
    pub stats: &'a ScanStats,
    pub reports: &'a [PathBuf],
}

/// Print a summary of the scan.
///
/// - `json = true`: emit a pretty-printed JSON object to stdout.
/// - `json = false`: emit a cargo-style human-readable summary to stdout.
///
/// If references were dropped from the table, a warning line is written to
/// **stderr** so that the stdout stream remains clean for downstream JSON consumers.
pub fn print_summary(summary: &ScanSummary<'_>, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serialising summary: {}", e),
        }
        return;
    }

    let stats = summary.stats;
    println!(
        "Scanned {} ({} files) in {:.2}s",
        summary.project, stats.file_count, stats.elapsed_secs
    );
    println!(
        "  {} import lines, {} references, {} in project scope",
        stats.import_lines, stats.references, stats.scoped_references,
    );
    for report in summary.reports {
        println!("  wrote {}", report.display());
    }

    if stats.dropped_references > 0 {
        eprintln!(
            "  {} references left out of the table (no matching module column)",
            stats.dropped_references
        );
    }
}
