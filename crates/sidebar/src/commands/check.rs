//! `sidebar check` command implementation.

use clap::Args;

use super::project::{Build, ProjectArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails, or if warnings were reported and
    /// `--deny-warnings` is set.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let build = Build::run(&self.project)?;
        build.report_warnings(&output);

        let warnings = build.resolution.warnings.len();
        output.info(&summary(&build));

        verdict(warnings, self.deny_warnings)?;
        if warnings == 0 {
            output.success("Sidebar is valid");
        }
        Ok(())
    }
}

/// Fail when warnings were reported and they are denied.
fn verdict(warnings: usize, deny_warnings: bool) -> Result<(), CliError> {
    if warnings > 0 && deny_warnings {
        return Err(CliError::Warnings(warnings));
    }
    Ok(())
}

fn summary(build: &Build) -> String {
    let tree = &build.resolution.tree;
    format!(
        "{} sections, {} entries from {} documents, {} warnings",
        tree.len(),
        tree.entry_count(),
        build.document_count,
        build.resolution.warnings.len()
    )
}
