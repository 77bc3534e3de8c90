//! One site configuration per published version.
//!
//! A [`SiteTemplate`] holds the declarations shared by every version; each
//! [`VersionParams`] supplies what differs (base path and locale title).
//! [`VersionedSites`] keys the instantiated configs by version id and
//! validates or builds them in parallel, since builds share no state.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::Deserialize;

use crate::content::ContentIndex;
use crate::error::{BuildError, ValidationError, VersionsBuildError};
use crate::locale::{DEFAULT_LOCALE, LocaleOverrides, merge_locale};
use crate::model::{LocaleMeta, MAX_SIDEBAR_DEPTH, NavLink, SidebarMap, SiteConfig};
use crate::validate::{ValidationPolicy, validate_with};

/// Version-independent site declarations.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SiteTemplate {
    /// Site title.
    pub title: String,
    /// Language of the default locale. Falls back to the default locale
    /// entry in `locales`, then to [`DEFAULT_LANG`](crate::DEFAULT_LANG).
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub sidebar: SidebarMap,
    #[serde(default = "default_true")]
    pub edit_links: bool,
    #[serde(default = "default_sidebar_depth")]
    pub sidebar_depth: u8,
    /// Additional locales (and optional labels for the default locale).
    #[serde(default)]
    pub locales: BTreeMap<String, LocaleMeta>,
}

impl SiteTemplate {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: None,
            nav: Vec::new(),
            sidebar: SidebarMap::new(),
            edit_links: true,
            sidebar_depth: MAX_SIDEBAR_DEPTH,
            locales: BTreeMap::new(),
        }
    }

    /// Produce the configuration of one version.
    #[must_use]
    pub fn instantiate(&self, params: &VersionParams) -> SiteConfig {
        let config = SiteConfig {
            base: params.base.clone(),
            title: self.title.clone(),
            locales: self.locales.clone(),
            sidebar: self.sidebar.clone(),
            nav: self.nav.clone(),
            edit_links: self.edit_links,
            sidebar_depth: self.sidebar_depth,
        };
        let overrides = LocaleOverrides::new(self.lang.clone(), Some(params.locale_title.clone()));
        merge_locale(&config, DEFAULT_LOCALE, &overrides)
    }
}

/// What distinguishes one version of the site from another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionParams {
    /// Version identifier (e.g. `v2`).
    pub version: String,
    /// Path the version is served under (e.g. `/v2/`).
    pub base: String,
    /// Title of the default locale (e.g. `Vue Test Utils (2.0.0-beta.0)`).
    pub locale_title: String,
}

impl VersionParams {
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        base: impl Into<String>,
        locale_title: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            base: base.into(),
            locale_title: locale_title.into(),
        }
    }
}

/// Site configurations keyed by version id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionedSites {
    sites: BTreeMap<String, SiteConfig>,
}

impl VersionedSites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate `template` once per entry of `versions`.
    ///
    /// A repeated version id replaces the earlier one.
    #[must_use]
    pub fn from_template(template: &SiteTemplate, versions: &[VersionParams]) -> Self {
        let sites = versions
            .iter()
            .map(|params| (params.version.clone(), template.instantiate(params)))
            .collect();
        Self { sites }
    }

    /// Add or replace a version.
    pub fn insert(&mut self, version: impl Into<String>, config: SiteConfig) -> Option<SiteConfig> {
        self.sites.insert(version.into(), config)
    }

    #[must_use]
    pub fn get(&self, version: &str) -> Option<&SiteConfig> {
        self.sites.get(version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteConfig)> {
        self.sites.iter().map(|(v, c)| (v.as_str(), c))
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Validate every version, collecting violations per version.
    ///
    /// `contents` maps version ids to their content index; versions without
    /// an entry skip content checks. Every version appears in the result,
    /// with an empty list when valid.
    #[must_use]
    pub fn validate_all(
        &self,
        policy: &ValidationPolicy,
        contents: &HashMap<String, ContentIndex>,
    ) -> BTreeMap<String, Vec<ValidationError>> {
        self.sites
            .par_iter()
            .map(|(version, config)| {
                let errors = validate_with(config, policy, contents.get(version));
                (version.clone(), errors)
            })
            .collect()
    }

    /// Strict build of every version.
    ///
    /// # Errors
    ///
    /// Returns [`VersionsBuildError`] with the violations of every failing
    /// version; nothing is returned for the valid ones in that case.
    pub fn build_all(
        self,
        policy: &ValidationPolicy,
        contents: &HashMap<String, ContentIndex>,
    ) -> Result<Self, VersionsBuildError> {
        let failures: BTreeMap<String, BuildError> = self
            .validate_all(policy, contents)
            .into_iter()
            .filter_map(|(version, errors)| {
                BuildError::from_errors(errors).map(|err| (version, err))
            })
            .collect();

        if failures.is_empty() {
            tracing::debug!(version_count = self.sites.len(), "Built all versions");
            Ok(self)
        } else {
            Err(VersionsBuildError { failures })
        }
    }
}

impl IntoIterator for VersionedSites {
    type Item = (String, SiteConfig);
    type IntoIter = std::collections::btree_map::IntoIter<String, SiteConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.into_iter()
    }
}

fn default_true() -> bool {
    true
}

fn default_sidebar_depth() -> u8 {
    MAX_SIDEBAR_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::model::NavGroup;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(super::VersionedSites: Send, Sync);
    static_assertions::assert_impl_all!(crate::SiteConfig: Send, Sync);

    fn template() -> SiteTemplate {
        let mut template = SiteTemplate::new("Vue Test Utils");
        template.sidebar.insert(
            "/",
            vec![
                NavGroup::new(
                    "Essentials",
                    vec!["/guide/installation".into(), "/guide/introduction".into()],
                )
                .into(),
            ],
        );
        template.nav = vec![
            NavLink::new("Guide", "/guide/introduction"),
            NavLink::new("GitHub", "https://github.com/vuejs/vue-test-utils-next"),
        ];
        template
    }

    fn versions() -> Vec<VersionParams> {
        vec![
            VersionParams::new("v1", "/v1/", "Vue Test Utils (1.x)"),
            VersionParams::new("v2", "/v2/", "Vue Test Utils (2.0.0-beta.0)"),
        ]
    }

    #[test]
    fn test_instantiate_sets_base_and_locale_title() {
        let config = template().instantiate(&versions()[1]);

        assert_eq!(config.base, "/v2/");
        assert_eq!(config.title, "Vue Test Utils");
        assert_eq!(
            config.locales[DEFAULT_LOCALE],
            LocaleMeta::new("en-US", "Vue Test Utils (2.0.0-beta.0)")
        );
        assert_eq!(config.sidebar, template().sidebar);
    }

    #[test]
    fn test_instantiate_uses_template_lang() {
        let mut template = template();
        template.lang = Some("fr-FR".to_owned());

        let config = template.instantiate(&versions()[0]);

        assert_eq!(config.locales[DEFAULT_LOCALE].lang, "fr-FR");
    }

    #[test]
    fn test_instantiate_keeps_default_locale_labels() {
        let mut template = template();
        let mut default = LocaleMeta::new("en-US", "ignored");
        default.label = Some("English".to_owned());
        template.locales.insert(DEFAULT_LOCALE.to_owned(), default);

        let config = template.instantiate(&versions()[0]);

        let meta = &config.locales[DEFAULT_LOCALE];
        assert_eq!(meta.title, "Vue Test Utils (1.x)");
        assert_eq!(meta.label.as_deref(), Some("English"));
    }

    #[test]
    fn test_from_template_keys_by_version() {
        let sites = VersionedSites::from_template(&template(), &versions());

        assert_eq!(sites.versions().collect::<Vec<_>>(), vec!["v1", "v2"]);
        assert_eq!(sites.get("v1").unwrap().base, "/v1/");
        assert!(sites.get("v3").is_none());
    }

    #[test]
    fn test_validate_all_reports_per_version() {
        let mut sites = VersionedSites::from_template(&template(), &versions());
        let mut broken = template().instantiate(&VersionParams::new("v0", "v0", "Old"));
        broken.nav.push(NavLink::new("Bad", "example.com"));
        sites.insert("v0", broken);

        let report = sites.validate_all(&ValidationPolicy::default(), &HashMap::new());

        assert_eq!(report.len(), 3);
        assert!(report["v1"].is_empty());
        assert!(report["v2"].is_empty());
        let kinds: Vec<_> = report["v0"].iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::MalformedRoute,
                ValidationErrorKind::MalformedLink
            ]
        );
    }

    #[test]
    fn test_validate_all_uses_version_content() {
        let sites = VersionedSites::from_template(&template(), &versions());
        let mut contents = HashMap::new();
        contents.insert(
            "v1".to_owned(),
            ContentIndex::from_paths(["guide/installation.md"]),
        );

        let report = sites.validate_all(&ValidationPolicy::default(), &contents);

        // v1 lacks guide/introduction.md, referenced by the sidebar and nav
        assert_eq!(report["v1"].len(), 2);
        assert!(report["v2"].is_empty());
    }

    #[test]
    fn test_build_all_succeeds() {
        let sites = VersionedSites::from_template(&template(), &versions());

        let built = sites
            .clone()
            .build_all(&ValidationPolicy::default(), &HashMap::new())
            .unwrap();

        assert_eq!(built, sites);
    }

    #[test]
    fn test_build_all_collects_failures() {
        let mut sites = VersionedSites::from_template(&template(), &versions());
        let mut broken = sites.get("v2").unwrap().clone();
        broken.sidebar.insert("/api/", vec!["/guide/".into()]);
        sites.insert("v2", broken);

        let err = sites
            .build_all(&ValidationPolicy::default(), &HashMap::new())
            .unwrap_err();

        assert_eq!(err.failures.keys().collect::<Vec<_>>(), vec!["v2"]);
        assert!(err.failures["v2"].has_kind(ValidationErrorKind::PrefixMismatch));
    }

    #[test]
    fn test_template_deserializes_with_defaults() {
        let json = r#"{
            "title": "Docs",
            "sidebar": {"/guide/": [{"title": "Guide", "children": ["/guide/"]}]}
        }"#;

        let template: SiteTemplate = serde_json::from_str(json).unwrap();

        assert!(template.edit_links);
        assert_eq!(template.sidebar_depth, MAX_SIDEBAR_DEPTH);
        assert!(template.lang.is_none());
        assert_eq!(template.sidebar.len(), 1);
    }
}
