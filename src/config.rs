use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

/// Name of the configuration file looked up at the project root.
pub const CONFIG_FILE: &str = "py-xref.toml";

/// Configuration loaded from `py-xref.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct XrefConfig {
    /// Path patterns excluded from source discovery.
    pub exclude: Option<Vec<String>>,
    /// Default directory for JSON/HTML reports.
    pub reports_dir: Option<PathBuf>,
    /// Projects scanned by the `batch` command.
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

/// One `[[projects]]` entry.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Report name; reports are written as `xref_<name>.json` / `.html`.
    pub name: String,
    /// Project root; module names are relative to it.
    pub root: PathBuf,
    /// Module files and package directories, in report order.
    pub sources: Vec<String>,
}

impl XrefConfig {
    /// Load configuration from `py-xref.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    /// A relative `reports_dir` is resolved against `root`.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut config) => {
                    config.rebase(root);
                    config
                }
                Err(err) => {
                    warn!(path = %config_path.display(), %err, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %config_path.display(), %err, "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load an explicitly named configuration file; any failure is an error.
    ///
    /// Relative paths are taken relative to the file's directory.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        config.rebase(path.parent().unwrap_or_else(|| Path::new("")));
        Ok(config)
    }

    /// Resolve relative project roots and `reports_dir` against `base`.
    fn rebase(&mut self, base: &Path) {
        for project in &mut self.projects {
            if project.root.is_relative() {
                project.root = base.join(&project.root);
            }
        }
        if let Some(dir) = self.reports_dir.take() {
            self.reports_dir = Some(if dir.is_relative() { base.join(dir) } else { dir });
        }
    }
}
