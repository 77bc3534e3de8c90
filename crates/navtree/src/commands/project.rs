//! Project loading shared by all commands.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_site::{ContentIndex, VersionedSites};

use crate::error::CliError;

/// Arguments common to every command.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Skip checking that routes resolve to content files.
    #[arg(long)]
    no_content_check: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Loaded project: configuration, one site per version and content indexes.
pub(crate) struct Project {
    pub config: Config,
    pub sites: VersionedSites,
    /// Content index per version id. Empty when route checks are disabled.
    pub contents: HashMap<String, ContentIndex>,
}

impl ProjectArgs {
    /// Arguments for an explicit project file.
    #[cfg(test)]
    pub(crate) fn new(config: PathBuf, no_content_check: bool) -> Self {
        Self {
            config: Some(config),
            source_dir: None,
            no_content_check,
            verbose: false,
        }
    }

    fn settings(&self, output_dir: Option<PathBuf>) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir,
            check_routes: self.no_content_check.then_some(false),
        }
    }

    /// Load the project file and instantiate every version.
    pub(crate) fn load(&self, output_dir: Option<PathBuf>) -> Result<Project, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.settings(output_dir)))?;

        let sites = VersionedSites::from_template(&config.site, &config.version_params());
        let contents = if config.content_resolved.check_routes {
            scan_contents(&config)?
        } else {
            HashMap::new()
        };

        tracing::info!(
            versions = sites.len(),
            content_checks = config.content_resolved.check_routes,
            "Loaded project"
        );

        Ok(Project {
            config,
            sites,
            contents,
        })
    }
}

fn scan_contents(config: &Config) -> Result<HashMap<String, ContentIndex>, CliError> {
    config
        .versions
        .iter()
        .map(|version| {
            let dir = config.version_content_dir(version);
            let index = ContentIndex::scan(&dir)
                .map_err(|source| CliError::Content { path: dir, source })?;
            Ok((version.id.clone(), index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const PROJECT: &str = r#"
[site]
title = "Docs"

[[site.sidebar."/guide/"]]
title = "Guide"
children = ["/guide/", "/guide/setup"]

[[versions]]
id = "v1"
base = "/v1/"
locale_title = "Docs 1"
source_dir = "v1"

[[versions]]
id = "v2"
base = "/v2/"
locale_title = "Docs 2"
source_dir = "v2"
"#;

    fn args(config: &Path, no_content_check: bool) -> ProjectArgs {
        ProjectArgs::new(config.to_path_buf(), no_content_check)
    }

    fn write_project(root: &Path) -> PathBuf {
        let path = root.join("navtree.toml");
        std::fs::write(&path, PROJECT).unwrap();
        for version in ["v1", "v2"] {
            let guide = root.join("docs").join(version).join("guide");
            std::fs::create_dir_all(&guide).unwrap();
            std::fs::write(guide.join("README.md"), "# Guide").unwrap();
        }
        path
    }

    #[test]
    fn test_load_scans_each_version() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_project(temp_dir.path());

        let project = args(&path, false).load(None).unwrap();

        assert_eq!(project.sites.len(), 2);
        assert_eq!(project.contents.len(), 2);
        assert!(project.contents["v1"].contains_route("/guide/"));
        assert!(!project.contents["v2"].contains_route("/guide/setup"));
    }

    #[test]
    fn test_load_without_content_check() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_project(temp_dir.path());

        let project = args(&path, true).load(None).unwrap();

        assert!(project.contents.is_empty());
        assert!(!project.config.content_resolved.check_routes);
    }

    #[test]
    fn test_load_missing_content_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("navtree.toml");
        std::fs::write(&path, PROJECT).unwrap();

        let result = args(&path, false).load(None);

        assert!(matches!(result, Err(CliError::Content { .. })));
    }

    #[test]
    fn test_output_dir_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_project(temp_dir.path());

        let project = args(&path, true)
            .load(Some(PathBuf::from("/tmp/navtree-out")))
            .unwrap();

        assert_eq!(
            project.config.output_resolved.dir,
            PathBuf::from("/tmp/navtree-out")
        );
    }
}
