use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportLine {
    /// `import a, b.c as d`: top-level names, aliases already stripped.
    Direct { sources: Vec<String> },
    /// `from <source> import <objects>`: the raw source reference (possibly
    /// relative) and the unparsed objects clause.
    Selective { source: String, objects: String },
    /// Anything else. Most lines land here; it is not an error.
    NotAnImport,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// `from X import Y`, tried first.
static SELECTIVE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*from (?P<source>.+?) import (?P<objects>.*)")
        .expect("invalid selective import pattern")
});

/// `import X`, the fallback.
static DIRECT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*import (?P<sources>.+)").expect("invalid direct import pattern")
});

/// `name as alias`
static ALIASED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s+as\s").expect("invalid alias pattern")
});

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// Classify one line as a selective import, a direct import, or neither.
///
/// Only single-line statements are recognised. A line opening a parenthesised
/// multi-line import yields the names present on that line only.
pub fn classify(line: &str) -> ImportLine {
    if let Some(caps) = SELECTIVE_IMPORT.captures(line) {
        return ImportLine::Selective {
            source: caps["source"].trim().to_owned(),
            objects: caps["objects"].to_owned(),
        };
    }

    if let Some(caps) = DIRECT_IMPORT.captures(line) {
        return ImportLine::Direct {
            sources: parse_imports(&caps["sources"]),
        };
    }

    ImportLine::NotAnImport
}

/// Split an imported-names clause into bare names.
///
/// `"generate_password_hash, talks as talks_blueprint"` yields
/// `["generate_password_hash", "talks"]`. Order and duplicates are kept.
/// Grouping parentheses and a trailing line continuation are dropped, and
/// pieces left empty by them are skipped.
pub fn parse_imports(clause: &str) -> Vec<String> {
    let mut names = Vec::new();

    for piece in clause.split(',') {
        let piece = piece
            .trim()
            .trim_start_matches('(')
            .trim_end_matches('\\')
            .trim_end()
            .trim_end_matches(')')
            .trim();

        let name = match ALIASED.captures(piece) {
            Some(caps) => caps
                .name("name")
                .map(|m| m.as_str().trim())
                .unwrap_or(piece),
            None => piece,
        };

        if !name.is_empty() {
            names.push(name.to_owned());
        }
    }

    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
