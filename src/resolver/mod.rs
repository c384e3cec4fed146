pub mod module_name;
pub mod relative;

pub use module_name::{module_name, package_name};
pub use relative::{abs_package, path_steps};

use crate::error::XrefError;

/// Resolve `reference` as written inside `module` to an absolute dotted path.
///
/// Shorthand for [`abs_package`] over the module's own [`path_steps`].
pub fn resolve_reference(module: &str, reference: &str) -> Result<String, XrefError> {
    abs_package(reference, &path_steps(module))
}
