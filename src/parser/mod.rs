pub mod imports;
pub mod lines;

pub use imports::{ImportLine, classify, parse_imports};
pub use lines::extract_import_lines;

/// Turns one source line into an [`ImportLine`].
///
/// The cross-reference index only depends on this trait, so the line-level
/// regex matcher can be swapped for a grammar-aware parser.
pub trait ImportClassifier {
    fn classify(&self, line: &str) -> ImportLine;
}

/// Single-line regex matcher: `from X import Y` first, then `import X`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexClassifier;

impl ImportClassifier for RegexClassifier {
    fn classify(&self, line: &str) -> ImportLine {
        classify(line)
    }
}
