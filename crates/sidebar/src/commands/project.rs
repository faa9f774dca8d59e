//! Shared load, scan and resolve pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use sidebar_config::{CliSettings, Config, SiteConfig};
use sidebar_content::ContentScanner;
use sidebar_nav::{Resolution, ResolvedTree, resolve};

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every command.
#[derive(Args, Debug, Clone)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover sidebar.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(long)]
    pub title: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            title: self.title.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Result of one complete run of the pipeline.
pub(crate) struct Build {
    pub config: Config,
    pub document_count: usize,
    pub resolution: Resolution,
}

impl Build {
    /// Load configuration, scan content and resolve the sidebar.
    ///
    /// Every call starts from scratch; nothing is carried over between runs.
    pub(crate) fn run(args: &ProjectArgs) -> Result<Self, CliError> {
        let config = args.load_config()?;
        let content = &config.content_resolved;

        let documents = ContentScanner::new(&content.source_dir)
            .with_extensions(&content.extensions)
            .with_exclude(&content.exclude)?
            .scan()?;
        let resolution = resolve(&config.sidebar_resolved, &documents)?;

        tracing::info!(
            source_dir = %content.source_dir.display(),
            documents = documents.len(),
            sections = resolution.tree.len(),
            warnings = resolution.warnings.len(),
            "Resolved sidebar"
        );

        Ok(Self {
            config,
            document_count: documents.len(),
            resolution,
        })
    }

    /// Print resolution warnings.
    pub(crate) fn report_warnings(&self, output: &Output) {
        for warning in &self.resolution.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
    }

    pub(crate) fn manifest(&self) -> Manifest<'_> {
        Manifest {
            site: &self.config.site,
            sidebar: &self.resolution.tree,
        }
    }
}

/// JSON document handed to the site renderer.
#[derive(Serialize)]
pub(crate) struct Manifest<'a> {
    pub site: &'a SiteConfig,
    pub sidebar: &'a ResolvedTree,
}

impl Manifest<'_> {
    pub(crate) fn to_json(&self, pretty: bool) -> Result<String, CliError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the manifest to `path`, or to stdout when `path` is `None`.
    pub(crate) fn write(
        &self,
        path: Option<&Path>,
        pretty: bool,
        output: &Output,
    ) -> Result<(), CliError> {
        let json = self.to_json(pretty)?;
        match path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, json + "\n")?;
            }
            None => output.data(&json)?,
        }
        Ok(())
    }
}
