//! Project configuration for navtree.
//!
//! Parses `navtree.toml` project files with serde and provides
//! auto-discovery of the project file in parent directories.
//!
//! A project declares one shared [`SiteTemplate`] under `[site]` and the
//! versions built from it under `[[versions]]`.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.source_dir`
//! - `output.dir`
//! - `versions[].base`
//! - `versions[].locale_title`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use navtree_site::{SiteTemplate, ValidationPolicy, VersionParams};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override route existence checks.
    pub check_routes: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// Project configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    #[serde(default)]
    content: ContentConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    #[serde(default)]
    output: OutputConfigRaw,
    /// Validation policy.
    #[serde(default)]
    pub validation: ValidationPolicy,
    /// Declarations shared by every version.
    pub site: SiteTemplate,
    /// Versions to build.
    #[serde(default)]
    pub versions: Vec<VersionConfig>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    check_routes: Option<bool>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root directory of the markdown content.
    pub source_dir: PathBuf,
    /// Whether routes must resolve to content files.
    pub check_routes: bool,
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory receiving one `<version>/config.json` per version.
    pub dir: PathBuf,
}

impl OutputConfig {
    /// Path of the exported configuration for `version`.
    #[must_use]
    pub fn version_file(&self, version: &str) -> PathBuf {
        self.dir.join(version).join("config.json")
    }
}

/// One published version of the site.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionConfig {
    /// Version identifier, used as output directory name.
    pub id: String,
    /// Path the version is served under.
    pub base: String,
    /// Title of the default locale.
    pub locale_title: String,
    /// Content subdirectory for this version, relative to `content.source_dir`.
    #[serde(default)]
    pub source_dir: Option<String>,
}

impl VersionConfig {
    /// Parameters for instantiating the site template.
    #[must_use]
    pub fn params(&self) -> VersionParams {
        VersionParams::new(&self.id, &self.base, &self.locale_title)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`versions[0].base`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_default();
                ConfigError::NotFound(cwd.join(CONFIG_FILENAME))
            })?,
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(check_routes) = settings.check_routes {
            self.content_resolved.check_routes = check_routes;
        }
    }

    /// Version parameters in declaration order.
    #[must_use]
    pub fn version_params(&self) -> Vec<VersionParams> {
        self.versions.iter().map(VersionConfig::params).collect()
    }

    /// Content directory of a version.
    #[must_use]
    pub fn version_content_dir(&self, version: &VersionConfig) -> PathBuf {
        match &version.source_dir {
            Some(dir) => self.content_resolved.source_dir.join(dir),
            None => self.content_resolved.source_dir.clone(),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks project-level structure only; the navigation trees are
    /// validated per version by `navtree-site`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.validate_versions()?;
        Ok(())
    }

    /// Validate version declarations.
    fn validate_versions(&self) -> Result<(), ConfigError> {
        if self.versions.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[versions]] entry is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for (i, version) in self.versions.iter().enumerate() {
            require_non_empty(&version.id, &format!("versions[{i}].id"))?;
            require_non_empty(&version.base, &format!("versions[{i}].base"))?;
            require_non_empty(&version.locale_title, &format!("versions[{i}].locale_title"))?;

            // The id names an output directory
            if version.id.contains(['/', '\\']) || version.id.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "versions[{i}].id '{}' must be a plain directory name",
                    version.id
                )));
            }

            if !seen.insert(version.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "versions[{i}].id '{}' is declared more than once",
                    version.id
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(dir, "content.source_dir")?);
        }
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }

        for (i, version) in self.versions.iter_mut().enumerate() {
            version.base = expand::expand_env(&version.base, &format!("versions[{i}].base"))?;
            version.locale_title =
                expand::expand_env(&version.locale_title, &format!("versions[{i}].locale_title"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), "docs"),
            check_routes: self.content.check_routes.unwrap_or(true),
        };

        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "dist"),
        };
    }
}
