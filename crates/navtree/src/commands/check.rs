//! `navtree check` command implementation.

use std::collections::BTreeMap;

use clap::Args;
use navtree_site::ValidationError;

use super::project::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be loaded or any version has
    /// navigation problems.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = self.project.load(None)?;

        let report = project
            .sites
            .validate_all(&project.config.validation, &project.contents);

        // Declaration order, not id order
        for version in &project.config.versions {
            output.version(&version.id, &version.base);
            match report.get(&version.id) {
                Some(errors) if !errors.is_empty() => {
                    for error in errors {
                        output.problem(&error.to_string());
                    }
                }
                _ => output.success("  ok"),
            }
        }

        match Summary::of(&report) {
            Summary { problems: 0, .. } => {
                output.success(&format!("All {} version(s) valid", report.len()));
                Ok(())
            }
            Summary { problems, versions } => Err(CliError::Validation(format!(
                "{problems} problem(s) in {versions} version(s)"
            ))),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Summary {
    problems: usize,
    versions: usize,
}

impl Summary {
    fn of(report: &BTreeMap<String, Vec<ValidationError>>) -> Self {
        let failing = report.values().filter(|errors| !errors.is_empty());
        Self {
            problems: failing.clone().map(Vec::len).sum(),
            versions: failing.count(),
        }
    }
}
