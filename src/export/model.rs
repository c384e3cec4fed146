use std::path::PathBuf;

/// Which report artifacts to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `xref_<name>.json`: the cross-reference index as a mapping of arrays.
    Json,
    /// `xref_<name>.html`: the module-by-module hover grid.
    Html,
    /// Both reports (default).
    #[default]
    All,
}

impl ExportFormat {
    pub fn wants_json(self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::All)
    }

    pub fn wants_html(self) -> bool {
        matches!(self, ExportFormat::Html | ExportFormat::All)
    }
}

/// Parameters controlling report export.
pub struct ExportParams {
    /// Report artifacts to write.
    pub format: ExportFormat,
    /// Used in report filenames and the HTML title.
    pub project_name: String,
    /// Shown in the HTML report header.
    pub project_root: PathBuf,
    /// Directory receiving `xref_<name>.*`.
    pub reports_dir: PathBuf,
    /// Serialize `all_refs` instead of the scoped `xref` in the JSON report.
    pub unscoped: bool,
    /// Print the JSON report to stdout instead of writing files.
    pub stdout: bool,
}

/// Result of an export.
pub struct ExportResult {
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Scoped references left out of the table for lack of a matching column.
    pub dropped: usize,
}
