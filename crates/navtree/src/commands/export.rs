//! `navtree export` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use navtree_config::OutputConfig;
use navtree_site::{VersionedSites, VersionsBuildError, to_generator_json};

use super::project::{Project, ProjectArgs};
use crate::error::CliError;
use crate::output::Output;

/// Suffix of configuration files written but not yet moved into place.
const STAGING_EXTENSION: &str = "json.tmp";

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory for the generator configurations (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// Nothing is written unless every version builds.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be loaded, any version fails
    /// validation, or a file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let Project {
            config,
            sites,
            contents,
        } = self.project.load(self.output_dir)?;

        let sites = sites
            .build_all(&config.validation, &contents)
            .inspect_err(|err| report_failures(&output, err))?;

        output.info(&format!("Output: {}", config.output_resolved.dir.display()));

        let written = write_all(&config.output_resolved, &sites)?;
        for path in &written {
            tracing::info!(path = %path.display(), "Exported version");
        }

        output.success(&format!("Exported {} version(s)", written.len()));
        Ok(())
    }
}

fn report_failures(output: &Output, err: &VersionsBuildError) {
    for (version, failure) in &err.failures {
        output.error(&format!("{version}:"));
        for error in &failure.errors {
            output.problem(&error.to_string());
        }
    }
}

/// Write the generator configuration of every version, or of none.
///
/// Every file is rendered and staged next to its destination first; staged
/// files are moved into place only once all of them were written.
fn write_all(output: &OutputConfig, sites: &VersionedSites) -> Result<Vec<PathBuf>, CliError> {
    let rendered = sites
        .iter()
        .map(|(version, site)| -> Result<(PathBuf, String), CliError> {
            Ok((output.version_file(version), to_generator_json(site)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut staged = Vec::with_capacity(rendered.len());
    for (path, json) in rendered {
        match stage(&path, &json) {
            Ok(tmp) => staged.push((tmp, path)),
            Err(err) => {
                for (tmp, _) in &staged {
                    let _ = std::fs::remove_file(tmp);
                }
                return Err(err);
            }
        }
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        std::fs::rename(&tmp, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn stage(path: &Path, json: &str) -> Result<PathBuf, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension(STAGING_EXTENSION);
    std::fs::write(&tmp, format!("{json}\n"))?;
    Ok(tmp)
}
