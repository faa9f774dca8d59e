//! `sidebar resolve` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::project::{Build, ProjectArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the resolved sidebar to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, scanning or resolution fails, or the
    /// output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let build = Build::run(&self.project)?;
        build.report_warnings(&output);
        build
            .manifest()
            .write(self.output.as_deref(), self.pretty, &output)?;

        if let Some(path) = &self.output {
            output.success(&format!(
                "Wrote {} entries to {}",
                build.resolution.tree.entry_count(),
                path.display()
            ));
        }
        Ok(())
    }
}
