//! Navigation tree validation.
//!
//! [`validate`] walks a [`SiteConfig`] in pre-order and collects every
//! invariant violation; [`build`] is the strict variant that rejects the
//! configuration if anything was found. Both are pure: the same input always
//! yields the same result.
//!
//! Checks performed:
//! - `base` and locale keys are paths that start and end with `/`
//! - sidebar prefixes are valid routes and unique after normalization
//! - every sidebar route is well formed and starts with its prefix
//! - groups are non-empty, and untitled only when collapsable or single-child
//! - nav links have text and an internal route or absolute URL target
//! - theme depth options are within range
//! - with a [`ContentIndex`], internal routes resolve to content files

use std::collections::HashSet;

use serde::Deserialize;

use crate::content::ContentIndex;
use crate::error::{BuildError, ValidationError, ValidationErrorKind};
use crate::model::{MAX_SIDEBAR_DEPTH, NavGroup, NavLink, Route, SidebarEntry, SidebarMap, SiteConfig};
use crate::route::{is_absolute_url, normalize_prefix, route_problem};

/// Tunable validation rules.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject non-collapsable groups with several children and an empty title.
    pub require_group_titles: bool,
    /// Allow a prefix to contain another (`/` and `/api/`). The generator
    /// uses the first declared match, so a broad prefix declared first
    /// shadows the narrower one. When false, such pairs are reported as
    /// [`ValidationErrorKind::DuplicatePrefix`].
    pub allow_nested_prefixes: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_group_titles: true,
            allow_nested_prefixes: true,
        }
    }
}

/// Report every invariant violation in `config` using the default policy.
#[must_use]
pub fn validate(config: &SiteConfig) -> Vec<ValidationError> {
    validate_with(config, &ValidationPolicy::default(), None)
}

/// Report every invariant violation in `config`.
///
/// When `content` is given, internal routes and nav links must also resolve
/// to files in it.
#[must_use]
pub fn validate_with(
    config: &SiteConfig,
    policy: &ValidationPolicy,
    content: Option<&ContentIndex>,
) -> Vec<ValidationError> {
    let mut validator = Validator::new(policy, content);
    validator.check_site(config);
    tracing::debug!(
        title = %config.title,
        base = %config.base,
        error_count = validator.errors.len(),
        "Validated site configuration"
    );
    validator.finish()
}

/// Return `config` unchanged if it has no violations (default policy).
///
/// # Errors
///
/// Returns [`BuildError`] with every violation found.
pub fn build(config: SiteConfig) -> Result<SiteConfig, BuildError> {
    build_with(config, &ValidationPolicy::default(), None)
}

/// Return `config` unchanged if it has no violations.
///
/// # Errors
///
/// Returns [`BuildError`] with every violation found.
pub fn build_with(
    config: SiteConfig,
    policy: &ValidationPolicy,
    content: Option<&ContentIndex>,
) -> Result<SiteConfig, BuildError> {
    match BuildError::from_errors(validate_with(&config, policy, content)) {
        Some(err) => Err(err),
        None => Ok(config),
    }
}

/// Pre-order walker accumulating violations.
pub(crate) struct Validator<'a> {
    policy: &'a ValidationPolicy,
    content: Option<&'a ContentIndex>,
    errors: Vec<ValidationError>,
}

impl<'a> Validator<'a> {
    pub(crate) fn new(policy: &'a ValidationPolicy, content: Option<&'a ContentIndex>) -> Self {
        Self {
            policy,
            content,
            errors: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<ValidationError> {
        self.errors
    }

    fn report(
        &mut self,
        kind: ValidationErrorKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError::new(kind, location, message));
    }

    fn check_site(&mut self, config: &SiteConfig) {
        self.check_base_path("base", &config.base);
        self.check_depth("sidebarDepth", config.sidebar_depth);

        for (key, locale) in &config.locales {
            let location = format!("locales['{key}']");
            self.check_base_path(&location, key);
            if let Some(sidebar) = &locale.sidebar {
                self.check_sidebar(&format!("{location}.sidebar"), sidebar);
            }
        }

        self.check_sidebar("sidebar", &config.sidebar);
        self.check_nav("nav", &config.nav);
    }

    /// `base` and locale keys must be `/`-delimited on both ends.
    fn check_base_path(&mut self, location: &str, path: &str) {
        if let Some(problem) = route_problem(path) {
            self.report(ValidationErrorKind::MalformedRoute, location, problem);
        } else if !path.ends_with('/') {
            self.report(
                ValidationErrorKind::MalformedRoute,
                location,
                format!("path '{path}' must end with '/'"),
            );
        }
    }

    fn check_depth(&mut self, location: &str, depth: u8) {
        if depth > MAX_SIDEBAR_DEPTH {
            self.report(
                ValidationErrorKind::InvalidOption,
                location,
                format!("sidebar depth {depth} exceeds maximum of {MAX_SIDEBAR_DEPTH}"),
            );
        }
    }

    pub(crate) fn check_sidebar(&mut self, location: &str, sidebar: &SidebarMap) {
        let mut seen: HashSet<String> = HashSet::new();
        let mut valid_prefixes: Vec<String> = Vec::new();

        for section in sidebar {
            // Flat sidebars have no prefix key of their own
            let section_location = if sidebar.is_flat() {
                location.to_owned()
            } else {
                format!("{location}['{}']", section.prefix)
            };

            // Children of a malformed prefix only get their own syntax checked
            let prefix = if let Some(problem) = route_problem(&section.prefix) {
                self.report(ValidationErrorKind::MalformedRoute, &section_location, problem);
                None
            } else {
                let normalized = normalize_prefix(&section.prefix);
                if seen.insert(normalized.clone()) {
                    valid_prefixes.push(normalized.clone());
                } else {
                    self.report(
                        ValidationErrorKind::DuplicatePrefix,
                        &section_location,
                        format!("prefix '{}' is declared more than once", section.prefix),
                    );
                }
                Some(normalized)
            };

            for (i, entry) in section.entries.iter().enumerate() {
                let entry_location = format!("{section_location}[{i}]");
                self.check_entry(&entry_location, entry, prefix.as_deref());
            }
        }

        if !self.policy.allow_nested_prefixes {
            self.check_prefix_overlap(location, &valid_prefixes);
        }
    }

    fn check_prefix_overlap(&mut self, location: &str, prefixes: &[String]) {
        for (i, outer) in prefixes.iter().enumerate() {
            for inner in &prefixes[i + 1..] {
                let (short, long) = if outer.len() <= inner.len() {
                    (outer, inner)
                } else {
                    (inner, outer)
                };
                if long.starts_with(short.as_str()) {
                    self.report(
                        ValidationErrorKind::DuplicatePrefix,
                        format!("{location}['{long}']"),
                        format!("prefix '{long}' overlaps prefix '{short}'"),
                    );
                }
            }
        }
    }

    fn check_entry(&mut self, location: &str, entry: &SidebarEntry, prefix: Option<&str>) {
        match entry {
            SidebarEntry::Route(route) => self.check_route(location, route, prefix),
            SidebarEntry::Group(group) => self.check_group(location, group, prefix),
        }
    }

    fn check_group(&mut self, location: &str, group: &NavGroup, prefix: Option<&str>) {
        if group.children.is_empty() {
            self.report(
                ValidationErrorKind::EmptyGroup,
                location,
                format!("group '{}' has no children", group.title),
            );
        }

        if self.policy.require_group_titles
            && group.title.trim().is_empty()
            && !group.collapsable
            && group.children.len() > 1
        {
            self.report(
                ValidationErrorKind::UntitledGroup,
                location,
                format!(
                    "non-collapsable group with {} children needs a title",
                    group.children.len()
                ),
            );
        }

        if let Some(depth) = group.sidebar_depth {
            self.check_depth(&format!("{location}.sidebarDepth"), depth);
        }

        for (i, child) in group.children.iter().enumerate() {
            self.check_entry(&format!("{location}.children[{i}]"), child, prefix);
        }
    }

    fn check_route(&mut self, location: &str, route: &Route, prefix: Option<&str>) {
        if let Some(problem) = route_problem(route.as_str()) {
            self.report(ValidationErrorKind::MalformedRoute, location, problem);
            return;
        }

        if let Some(prefix) = prefix
            && !route.as_str().starts_with(prefix)
        {
            self.report(
                ValidationErrorKind::PrefixMismatch,
                location,
                format!("route '{route}' does not start with prefix '{prefix}'"),
            );
        }

        self.check_content(location, route.as_str());
    }

    fn check_content(&mut self, location: &str, route: &str) {
        if let Some(content) = self.content
            && !content.contains_route(route)
        {
            self.report(
                ValidationErrorKind::MissingContent,
                location,
                format!("route '{route}' does not resolve to a content file"),
            );
        }
    }

    pub(crate) fn check_nav(&mut self, location: &str, links: &[NavLink]) {
        for (i, link) in links.iter().enumerate() {
            self.check_link(&format!("{location}[{i}]"), link);
        }
    }

    fn check_link(&mut self, location: &str, link: &NavLink) {
        if link.text.trim().is_empty() {
            self.report(
                ValidationErrorKind::MalformedLink,
                location,
                format!("link to '{}' has empty text", link.link),
            );
        }

        if link.is_internal() {
            if let Some(problem) = route_problem(&link.link) {
                self.report(ValidationErrorKind::MalformedLink, location, problem);
            } else {
                self.check_content(location, &link.link);
            }
        } else if !is_absolute_url(&link.link) {
            self.report(
                ValidationErrorKind::MalformedLink,
                location,
                format!(
                    "link '{}' is neither an internal route nor an absolute URL",
                    link.link
                ),
            );
        }
    }
}
