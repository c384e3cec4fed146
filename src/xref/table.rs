use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::resolver::package_name;

use super::XrefIndex;

/// One reference placed in a table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Last dotted component of `fullname` (the imported symbol or module).
    pub name: String,
    /// The full reference entry.
    pub fullname: String,
}

/// Module-by-module grid of scoped references.
///
/// `headers[0]` is blank; `headers[1..]` are the project modules in declared
/// order with the `.__init__` suffix dropped. `table[r]` is the row of the
/// r-th module and has one cell per header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub table: Vec<Vec<Vec<Reference>>>,
    /// Entries whose source matched no header and were left out.
    #[serde(skip)]
    pub dropped: usize,
}

impl XrefIndex {
    /// Project the scoped index onto a row-per-module, column-per-module grid.
    ///
    /// An entry goes to the column named by everything before its last dot, or
    /// to the blank column when it has no dot. Entries whose column is not a
    /// known header are logged and dropped.
    pub fn build_table(&self) -> ReportTable {
        let modules = self.module_list().unwrap_or_default();

        let mut headers = Vec::with_capacity(modules.len() + 1);
        headers.push(String::new());
        headers.extend(modules.iter().map(|m| package_name(m).to_owned()));

        let mut columns: HashMap<&str, usize> = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            columns.entry(header.as_str()).or_insert(idx);
        }

        let mut table = Vec::with_capacity(modules.len());
        let mut dropped = 0usize;

        for target in modules {
            let mut row = vec![Vec::new(); headers.len()];

            match self.xref().get(target) {
                Some(entries) => {
                    for fullname in entries {
                        let (column_key, name) = match fullname.rfind('.') {
                            Some(p) => (&fullname[..p], &fullname[p + 1..]),
                            None => ("", fullname.as_str()),
                        };

                        let Some(&col) = columns.get(column_key) else {
                            error!(
                                entry = fullname.as_str(),
                                column = column_key,
                                "no header matches reference source"
                            );
                            dropped += 1;
                            continue;
                        };

                        debug!(entry = fullname.as_str(), target_module = target.as_str(), col, "placing");
                        row[col].push(Reference {
                            name: name.to_owned(),
                            fullname: fullname.clone(),
                        });
                    }
                }
                None => warn!(target_module = target.as_str(), "empty row"),
            }

            table.push(row);
        }

        ReportTable {
            headers,
            table,
            dropped,
        }
    }
}
