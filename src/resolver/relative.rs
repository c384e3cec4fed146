use crate::error::XrefError;

/// Ancestor chain of a module, from the module itself up to its top-level package.
///
/// `app.talks.models` -> `["app.talks.models", "app.talks", "app"]`. Index `n`
/// of the result is the location a reference with `n` leading dots is relative to.
pub fn path_steps(module: &str) -> Vec<String> {
    let mut locations = vec![module.to_owned()];
    let mut rest = module;
    while let Some(idx) = rest.rfind('.') {
        rest = &rest[..idx];
        locations.push(rest.to_owned());
    }
    locations
}

/// Resolve an import reference to an absolute dotted package path.
///
/// `locations` is the importing module's [`path_steps`]. A reference without
/// leading dots is already absolute and comes back unchanged. With `p` leading
/// dots the base is `locations[p]`; the remainder of the reference, if any, is
/// appended to it.
///
/// ```text
/// abs_package("..views", ["app.talks.models", "app.talks", "app"]) == "app.views"
/// abs_package(".", ["app.api_1_0.__init__", "app.api_1_0", "app"]) == "app.api_1_0"
/// ```
///
/// # Errors
/// Returns [`XrefError::RelativeDepthExceeded`] when `p` points past the
/// top-level package.
pub fn abs_package(reference: &str, locations: &[String]) -> Result<String, XrefError> {
    let remainder = reference.trim_start_matches('.');
    let depth = reference.len() - remainder.len();

    if depth == 0 {
        return Ok(reference.to_owned());
    }

    let base = locations
        .get(depth)
        .ok_or_else(|| XrefError::RelativeDepthExceeded {
            reference: reference.to_owned(),
            module: locations.first().cloned().unwrap_or_default(),
            depth,
        })?;

    if remainder.is_empty() {
        Ok(base.clone())
    } else {
        Ok(format!("{base}.{remainder}"))
    }
}
