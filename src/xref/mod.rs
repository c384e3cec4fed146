pub mod table;

pub use table::ReportTable;

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, trace};

use crate::error::XrefError;
use crate::parser::{ImportClassifier, ImportLine, RegexClassifier, extract_import_lines, parse_imports};
use crate::resolver::{abs_package, module_name, path_steps, resolve_reference};

/// Module-level import cross-reference for one project scan.
///
/// Owns two maps keyed by importing module:
/// - `all_refs`: every resolved reference, in scan order, duplicates kept.
/// - `xref`: the subset whose source is a module of the project, keyed only
///   by project modules.
///
/// Both maps only grow. Mutation goes through the `add_*` / `parse_line`
/// operations; readers get shared views.
#[derive(Debug, Default)]
pub struct XrefIndex {
    all_refs: BTreeMap<String, Vec<String>>,
    xref: BTreeMap<String, Vec<String>>,
    module_list: Option<Vec<String>>,
    modules: HashSet<String>,
}

impl XrefIndex {
    /// Build an index scoped to the given project-relative module filenames.
    ///
    /// Filename order becomes the row and column order of [`build_table`].
    /// An empty list leaves the index unscoped (`xref` stays empty).
    ///
    /// [`build_table`]: XrefIndex::build_table
    pub fn new<S: AsRef<str>>(module_files: &[S]) -> Result<Self, XrefError> {
        if module_files.is_empty() {
            return Ok(Self::default());
        }

        let module_list = module_files
            .iter()
            .map(|f| module_name(f.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let modules = module_list.iter().cloned().collect();

        Ok(Self {
            all_refs: BTreeMap::new(),
            xref: BTreeMap::new(),
            module_list: Some(module_list),
            modules,
        })
    }

    pub fn all_refs(&self) -> &BTreeMap<String, Vec<String>> {
        &self.all_refs
    }

    pub fn xref(&self) -> &BTreeMap<String, Vec<String>> {
        &self.xref
    }

    pub fn module_list(&self) -> Option<&[String]> {
        self.module_list.as_deref()
    }

    /// True when `module` is one of the declared project modules.
    pub fn is_module(&self, module: &str) -> bool {
        self.module_list.is_some() && self.modules.contains(module)
    }

    /// Total number of recorded references, in or out of scope.
    pub fn reference_count(&self) -> usize {
        self.all_refs.values().map(Vec::len).sum()
    }

    /// Number of references recorded in the scoped index.
    pub fn scoped_reference_count(&self) -> usize {
        self.xref.values().map(Vec::len).sum()
    }

    /// Make sure `target` has a (possibly empty) sequence in both maps it belongs to.
    pub fn add_target(&mut self, target: &str) {
        trace!(target_module = target, "adding target");
        if !self.all_refs.contains_key(target) {
            self.all_refs.insert(target.to_owned(), Vec::new());
        }
        if self.is_module(target) && !self.xref.contains_key(target) {
            self.xref.insert(target.to_owned(), Vec::new());
        }
    }

    /// Record that `target` imports `symbol` from `source` (or `source` itself).
    ///
    /// The entry is `source.symbol`, or `source` alone without a symbol. It is
    /// appended to `all_refs[target]`, and to `xref[target]` once for each of
    /// these that names a project module: `source`, and `source` with
    /// `__init__` appended (no separating dot).
    ///
    /// # Errors
    /// - [`XrefError::PathSeparatorInSource`] if `source` contains `/` or `\`.
    /// - [`XrefError::MalformedSymbol`] if `symbol` is blank or dotted.
    pub fn add_entry(
        &mut self,
        target: &str,
        source: &str,
        symbol: Option<&str>,
    ) -> Result<(), XrefError> {
        trace!(target_module = target, source, symbol, "adding entry");

        if source.contains(['/', '\\']) {
            return Err(XrefError::PathSeparatorInSource {
                source_ref: source.to_owned(),
            });
        }

        let entry = match symbol {
            Some(sym) => {
                if sym.trim().is_empty() || sym.contains('.') {
                    return Err(XrefError::MalformedSymbol {
                        symbol: sym.to_owned(),
                    });
                }
                format!("{source}.{sym}")
            }
            None => source.to_owned(),
        };

        if self.is_module(target) {
            // Initializer check appends `__init__` without a dot; both checks
            // can match, in which case the entry is kept twice.
            let mut hits = 0;
            if self.modules.contains(source) {
                hits += 1;
            }
            if self.modules.contains(&format!("{source}__init__")) {
                hits += 1;
            }
            let scoped = self.xref.entry(target.to_owned()).or_default();
            for _ in 0..hits {
                scoped.push(entry.clone());
            }
        }

        self.all_refs
            .entry(target.to_owned())
            .or_default()
            .push(entry);
        Ok(())
    }

    /// Record a selective import: `from <source> import <imports>` inside `target`.
    ///
    /// `source` may be relative; it is resolved against `target`'s ancestors.
    pub fn add_imports(&mut self, target: &str, source: &str, imports: &str) -> Result<(), XrefError> {
        let package = resolve_reference(target, source)?;
        self.add_target(target);
        if !imports.is_empty() {
            for symbol in parse_imports(imports) {
                self.add_entry(target, &package, Some(&symbol))?;
            }
        }
        Ok(())
    }

    /// Record a direct import: `import <sources>` inside `target`.
    ///
    /// Each source becomes its own symbol-less entry.
    pub fn add_imports_direct<S: AsRef<str>>(
        &mut self,
        target: &str,
        sources: &[S],
    ) -> Result<(), XrefError> {
        let locations = path_steps(target);
        self.add_target(target);
        for source in sources {
            let package = abs_package(source.as_ref(), &locations)?;
            self.add_entry(target, &package, None)?;
        }
        Ok(())
    }

    /// Classify `line` of `filename` with the regex matcher and record it.
    pub fn parse_line(&mut self, line: &str, filename: &str) -> Result<(), XrefError> {
        self.parse_line_with(&RegexClassifier, line, filename)
    }

    /// Same as [`parse_line`](XrefIndex::parse_line) with a caller-chosen classifier.
    pub fn parse_line_with(
        &mut self,
        classifier: &dyn ImportClassifier,
        line: &str,
        filename: &str,
    ) -> Result<(), XrefError> {
        debug!(line, filename, "parsing");
        let target = module_name(filename)?;
        match classifier.classify(line) {
            ImportLine::Selective { source, objects } => self.add_imports(&target, &source, &objects),
            ImportLine::Direct { sources } => self.add_imports_direct(&target, &sources),
            ImportLine::NotAnImport => Ok(()),
        }
    }

    /// Feed every import-bearing line of a file's `text` through [`parse_line`].
    ///
    /// Returns the number of import-bearing lines found.
    ///
    /// [`parse_line`]: XrefIndex::parse_line
    pub fn read_imports(&mut self, filename: &str, text: &str) -> Result<usize, XrefError> {
        info!(filename, "analysing");
        let lines = extract_import_lines(text);
        if lines.is_empty() {
            info!(filename, "no imports");
            return Ok(0);
        }
        for line in &lines {
            self.parse_line(line, filename)?;
        }
        Ok(lines.len())
    }

    /// Pretty JSON of the scoped (`xref`) or unscoped (`all_refs`) index, keys sorted.
    pub fn as_json(&self, scoped: bool) -> serde_json::Result<String> {
        let report = if scoped { &self.xref } else { &self.all_refs };
        serde_json::to_string_pretty(report)
    }
}
