use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// An `import ` keyword somewhere before the first comment marker.
static IMPORT_BEARING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^#]*import ").expect("invalid import line pattern"));

/// Keep the lines of `text` that plausibly hold an import statement.
///
/// Trailing comments are removed. When a line carries several statements
/// separated by `;`, only the first one is kept and a warning is logged.
/// A file without imports yields an empty vector.
pub fn extract_import_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        if !IMPORT_BEARING.is_match(raw) {
            continue;
        }

        let mut line = match raw.find('#') {
            Some(idx) => &raw[..idx],
            None => raw,
        };

        if let Some(idx) = line.find(';') {
            warn!(line = raw, "multiple statements on import line");
            line = &line[..idx];
        }

        lines.push(line.to_owned());
    }

    lines
}
