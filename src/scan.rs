use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::config::XrefConfig;
use crate::walker::collect_sourcefiles;
use crate::xref::XrefIndex;

/// Counters gathered while scanning one project.
#[derive(Debug, Default, Serialize, Clone, PartialEq)]
pub struct ScanStats {
    pub file_count: usize,
    /// Lines that looked like imports and went through the classifier.
    pub import_lines: usize,
    /// References recorded in the unscoped index.
    pub references: usize,
    /// References recorded in the scoped index.
    pub scoped_references: usize,
    /// Scoped references that found no column in the report table.
    pub dropped_references: usize,
    pub elapsed_secs: f64,
}

/// The populated index together with the scan counters.
#[derive(Debug)]
pub struct ScanOutcome {
    pub files: Vec<String>,
    pub index: XrefIndex,
    pub stats: ScanStats,
}

/// Build the cross-reference index of a project.
///
/// Discovers the module files named by `sources` under `root`, then feeds
/// each file through [`XrefIndex::read_imports`], one file at a time in
/// discovery order. The first failure aborts the whole scan.
pub fn scan_project<S: AsRef<str>>(
    root: &Path,
    sources: &[S],
    config: &XrefConfig,
) -> anyhow::Result<ScanOutcome> {
    let start = Instant::now();

    let files = collect_sourcefiles(root, sources, config)?;
    let mut index = XrefIndex::new(&files).context("failed to name project modules")?;

    let mut stats = ScanStats {
        file_count: files.len(),
        ..ScanStats::default()
    };

    for file in &files {
        let path = root.join(file);
        let bytes =
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        stats.import_lines += index
            .read_imports(file, &text)
            .with_context(|| format!("failed to scan {file}"))?;
    }

    stats.references = index.reference_count();
    stats.scoped_references = index.scoped_reference_count();
    stats.elapsed_secs = start.elapsed().as_secs_f64();

    info!(
        files = stats.file_count,
        references = stats.references,
        scoped = stats.scoped_references,
        "scan complete"
    );

    Ok(ScanOutcome {
        files,
        index,
        stats,
    })
}
