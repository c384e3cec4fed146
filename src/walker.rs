use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::XrefConfig;
use crate::error::XrefError;

/// Extension (without the dot) of the files collected as modules.
const SOURCE_EXTENSION: &str = "py";

/// Collect the module files named by `names`, relative to `root`.
///
/// Each name is a file or a directory under `root`, processed in the given
/// order. Files are kept when they carry the `.py` extension; directories are
/// walked (sorted by file name, symlinks followed with loop detection) for
/// every `.py` file below them, hidden or git-ignored ones included.
///
/// Returned paths are relative to `root` and `/`-separated. A file reached
/// twice is kept at its first position only, so naming a file before its
/// package pins it to the front.
///
/// # Errors
/// Returns [`XrefError::MissingSource`] when a name does not exist under `root`.
pub fn collect_sourcefiles<S: AsRef<str>>(
    root: &Path,
    names: &[S],
    config: &XrefConfig,
) -> anyhow::Result<Vec<String>> {
    info!(root = %root.display(), "collecting source files");

    let mut seen: HashSet<String> = HashSet::new();
    let mut files = Vec::new();

    for name in names {
        let path = root.join(name.as_ref());
        if !path.exists() {
            return Err(XrefError::MissingSource { path }.into());
        }

        if !path.is_dir() {
            push_source(root, &path, config, &mut seen, &mut files);
            continue;
        }

        let walker = ignore::WalkBuilder::new(&path)
            // Only `config.exclude` narrows the module set; ignore files and
            // hidden paths are not consulted.
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(%err, "skipping entry");
                    continue;
                }
            };

            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                continue;
            }

            push_source(root, entry.path(), config, &mut seen, &mut files);
        }
    }

    Ok(files)
}

/// Append `path` to `out` if it is a non-excluded module not seen before.
fn push_source(
    root: &Path,
    path: &Path,
    config: &XrefConfig,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext != SOURCE_EXTENSION {
        return;
    }

    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel_str = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    if is_excluded_by_config(&rel_str, rel, config) {
        debug!(path = %rel_str, "excluded by config");
        return;
    }

    if seen.insert(rel_str.clone()) {
        debug!(path = %rel_str, "module source");
        out.push(rel_str);
    }
}

/// Returns true if `path` matches any exclusion pattern from config.
fn is_excluded_by_config(rel_str: &str, rel: &Path, config: &XrefConfig) -> bool {
    let patterns = match &config.exclude {
        Some(p) => p,
        None => return false,
    };

    for pattern in patterns {
        let Ok(matcher) = glob::Pattern::new(pattern) else {
            warn!(%pattern, "invalid exclude pattern");
            continue;
        };
        if matcher.matches(rel_str) {
            return true;
        }
        // Also check if any component matches the pattern directly.
        for component in rel.components() {
            if let Some(s) = component.as_os_str().to_str()
                && matcher.matches(s)
            {
                return true;
            }
        }
    }

    false
}
