pub mod html;
pub mod model;

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::xref::XrefIndex;

use model::{ExportParams, ExportResult};

/// Write the JSON and/or HTML reports of a populated index.
///
/// Steps:
/// 1. Build the report table (dropped references are counted, not fatal).
/// 2. With `params.stdout`, print the JSON report and write nothing.
/// 3. Otherwise create `reports_dir` if needed and write `xref_<name>.json`
///    and `xref_<name>.html` according to `params.format`.
pub fn export_reports(index: &XrefIndex, params: &ExportParams) -> anyhow::Result<ExportResult> {
    let table = index.build_table();
    let json = index
        .as_json(!params.unscoped)
        .context("failed to serialise cross-reference index")?;

    if params.stdout {
        println!("{json}");
        return Ok(ExportResult {
            written: Vec::new(),
            dropped: table.dropped,
        });
    }

    std::fs::create_dir_all(&params.reports_dir).with_context(|| {
        format!(
            "failed to create reports directory {}",
            params.reports_dir.display()
        )
    })?;

    let base = format!("xref_{}", params.project_name);
    let mut written: Vec<PathBuf> = Vec::new();

    if params.format.wants_json() {
        let path = params.reports_dir.join(format!("{base}.json"));
        std::fs::write(&path, &json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON report");
        written.push(path);
    }

    if params.format.wants_html() {
        let path = params.reports_dir.join(format!("{base}.html"));
        let page = html::render_html(&table, &params.project_name, &params.project_root);
        std::fs::write(&path, page)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote HTML report");
        written.push(path);
    }

    Ok(ExportResult {
        written,
        dropped: table.dropped,
    })
}
