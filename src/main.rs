mod cli;
mod config;
mod error;
mod export;
mod output;
mod parser;
mod resolver;
mod scan;
mod walker;
mod xref;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::XrefConfig;
use export::export_reports;
use export::model::{ExportFormat, ExportParams};
use output::{ScanSummary, print_summary};
use scan::scan_project;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan {
            root,
            sources,
            name,
            reports_dir,
            format,
            unscoped,
            stdout,
            json,
        } => {
            let config = XrefConfig::load(&root);
            let reports_dir = reports_dir
                .or_else(|| config.reports_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let job = ProjectJob {
                root: &root,
                name,
                sources: &sources,
                reports_dir,
                format,
                unscoped,
                stdout,
            };
            run_project(&job, &config, json)?;
        }

        Commands::Batch { config, json } => {
            let batch = XrefConfig::from_file(&config)?;
            if batch.projects.is_empty() {
                bail!("no [[projects]] in {}", config.display());
            }
            let reports_dir = batch
                .reports_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));

            for project in &batch.projects {
                let job = ProjectJob {
                    root: &project.root,
                    name: Some(project.name.clone()),
                    sources: &project.sources,
                    reports_dir: reports_dir.clone(),
                    format: ExportFormat::All,
                    unscoped: false,
                    stdout: false,
                };
                run_project(&job, &batch, json)
                    .with_context(|| format!("project {:?} failed", project.name))?;
            }
        }
    }

    Ok(())
}

/// Everything needed to scan one project and export its reports.
struct ProjectJob<'a> {
    root: &'a Path,
    name: Option<String>,
    sources: &'a [String],
    reports_dir: PathBuf,
    format: ExportFormat,
    unscoped: bool,
    stdout: bool,
}

fn run_project(job: &ProjectJob<'_>, config: &XrefConfig, json: bool) -> Result<()> {
    if !job.root.is_dir() {
        bail!("project root is not a directory: {}", job.root.display());
    }
    let root = std::fs::canonicalize(job.root)
        .with_context(|| format!("failed to resolve {}", job.root.display()))?;

    let project_name = match &job.name {
        Some(name) => name.clone(),
        None => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_owned()),
    };

    let mut outcome = scan_project(&root, job.sources, config)?;
    debug!(project = %project_name, files = ?outcome.files, "module files");

    let params = ExportParams {
        format: job.format,
        project_name: project_name.clone(),
        project_root: root,
        reports_dir: job.reports_dir.clone(),
        unscoped: job.unscoped,
        stdout: job.stdout,
    };
    let exported = export_reports(&outcome.index, &params)?;
    outcome.stats.dropped_references = exported.dropped;

    // stdout already carries the JSON report.
    if !job.stdout {
        let summary = ScanSummary {
            project: &project_name,
            stats: &outcome.stats,
            reports: &exported.written,
        };
        print_summary(&summary, json);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "py_xref=warn",
        1 => "py_xref=info",
        2 => "py_xref=debug",
        _ => "py_xref=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
