use crate::error::XrefError;

/// Extension of the source files that become modules.
pub const SOURCE_EXTENSION: &str = ".py";

/// Suffix of a package initializer module identifier (`app/__init__.py` -> `app.__init__`).
pub const INIT_SUFFIX: &str = ".__init__";

/// Convert a project-relative filename into its dotted module identifier.
///
/// `app/talks/models.py` becomes `app.talks.models`; both `/` and `\` count
/// as separators so Windows-style relative paths name the same module.
///
/// # Errors
/// Returns [`XrefError::MissingExtension`] when `filename` does not end in `.py`.
pub fn module_name(filename: &str) -> Result<String, XrefError> {
    let stem = filename
        .strip_suffix(SOURCE_EXTENSION)
        .ok_or_else(|| XrefError::MissingExtension {
            path: filename.to_owned(),
        })?;
    Ok(stem.replace(['/', '\\'], "."))
}

/// Drop a trailing `.__init__` so a package and its initializer share one name.
pub fn package_name(module: &str) -> &str {
    module.strip_suffix(INIT_SUFFIX).unwrap_or(module)
}
