//! Declarative site configuration types.
//!
//! These are plain data: construction never fails, and nothing here enforces
//! the navigation invariants. Use [`validate`](crate::validate) to report
//! violations or [`build`](crate::build) to reject an invalid configuration.
//!
//! Deserialization accepts both the generator's camelCase keys and the
//! snake_case keys used in `navtree.toml`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deepest heading level the generator can show under a sidebar link.
pub const MAX_SIDEBAR_DEPTH: u8 = 2;

/// Path to a documentation page within the published site (e.g. `/guide/installation`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// Wrap a path without checking it.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Route {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Route {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sidebar item: either a page link or a nested group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Link to a single page.
    Route(Route),
    /// Titled cluster of further entries.
    Group(NavGroup),
}

impl From<&str> for SidebarEntry {
    fn from(path: &str) -> Self {
        Self::Route(Route::from(path))
    }
}

impl From<Route> for SidebarEntry {
    fn from(route: Route) -> Self {
        Self::Route(route)
    }
}

impl From<NavGroup> for SidebarEntry {
    fn from(group: NavGroup) -> Self {
        Self::Group(group)
    }
}

/// Titled, ordered cluster of routes and sub-groups shown in a sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Whether the generator may fold this group.
    #[serde(default)]
    pub collapsable: bool,
    /// Per-group heading depth override.
    #[serde(
        default,
        rename = "sidebarDepth",
        alias = "sidebar_depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub sidebar_depth: Option<u8>,
    /// Children in presentation order.
    #[serde(default)]
    pub children: Vec<SidebarEntry>,
}

impl NavGroup {
    /// Create a non-collapsable group.
    #[must_use]
    pub fn new(title: impl Into<String>, children: Vec<SidebarEntry>) -> Self {
        Self {
            title: title.into(),
            collapsable: false,
            sidebar_depth: None,
            children,
        }
    }

    #[must_use]
    pub fn collapsable(mut self, collapsable: bool) -> Self {
        self.collapsable = collapsable;
        self
    }

    /// Visit every route below this group in pre-order.
    pub fn for_each_route<'a>(&'a self, f: &mut impl FnMut(&'a Route)) {
        for child in &self.children {
            match child {
                SidebarEntry::Route(route) => f(route),
                SidebarEntry::Group(group) => group.for_each_route(f),
            }
        }
    }
}

/// Sidebar entries declared under one path prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarSection {
    /// Path prefix the section applies to (e.g. `/guide/`).
    pub prefix: String,
    /// Entries in presentation order.
    pub entries: Vec<SidebarEntry>,
}

/// Prefix of the single section of a flat sidebar.
pub const FLAT_SIDEBAR_PREFIX: &str = "/";

/// Per-prefix sidebar structure.
///
/// Serialized as a map from prefix to entries. Sections keep their
/// declaration order, and repeated prefixes are kept as separate sections so
/// that validation can report them instead of silently dropping one.
///
/// A flat sidebar (a plain array of entries, shown on every page) is held as
/// one section under [`FLAT_SIDEBAR_PREFIX`] and serialized back as an array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarMap {
    sections: Vec<SidebarSection>,
    flat: bool,
}

impl SidebarMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sidebar shown on every page, without per-prefix sections.
    #[must_use]
    pub fn flat(entries: Vec<SidebarEntry>) -> Self {
        Self {
            sections: vec![SidebarSection {
                prefix: FLAT_SIDEBAR_PREFIX.to_owned(),
                entries,
            }],
            flat: true,
        }
    }

    /// Whether this sidebar is the flat array form.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Append a section. A flat sidebar becomes a per-prefix one.
    pub fn insert(&mut self, prefix: impl Into<String>, entries: Vec<SidebarEntry>) {
        self.flat = false;
        self.sections.push(SidebarSection {
            prefix: prefix.into(),
            entries,
        });
    }

    /// Entries of the first section declared with exactly this prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[SidebarEntry]> {
        self.sections
            .iter()
            .find(|s| s.prefix == prefix)
            .map(|s| s.entries.as_slice())
    }

    /// First section, in declaration order, whose prefix matches `route`.
    ///
    /// Mirrors how the generator picks a sidebar for the current page: a
    /// broad prefix declared early shadows narrower ones declared after it.
    #[must_use]
    pub fn section_for(&self, route: &str) -> Option<&SidebarSection> {
        self.sections
            .iter()
            .find(|s| route.starts_with(s.prefix.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SidebarSection> {
        self.sections.iter()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.prefix.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<P: Into<String>> FromIterator<(P, Vec<SidebarEntry>)> for SidebarMap {
    fn from_iter<I: IntoIterator<Item = (P, Vec<SidebarEntry>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (prefix, entries) in iter {
            map.insert(prefix, entries);
        }
        map
    }
}

impl<'a> IntoIterator for &'a SidebarMap {
    type Item = &'a SidebarSection;
    type IntoIter = std::slice::Iter<'a, SidebarSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl Serialize for SidebarMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let (true, [section]) = (self.flat, self.sections.as_slice()) {
            return section.entries.serialize(serializer);
        }

        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.prefix, &section.entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SidebarMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarMapVisitor;

        impl<'de> Visitor<'de> for SidebarMapVisitor {
            type Value = SidebarMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from path prefix to sidebar entries, or an array of entries")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<SidebarMap, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = access.next_element::<SidebarEntry>()? {
                    entries.push(entry);
                }
                Ok(SidebarMap::flat(entries))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SidebarMap, A::Error> {
                let mut map = SidebarMap::new();
                while let Some((prefix, entries)) =
                    access.next_entry::<String, Vec<SidebarEntry>>()?
                {
                    map.insert(prefix, entries);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_any(SidebarMapVisitor)
    }
}

/// Top-level navigation bar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Display text.
    pub text: String,
    /// Internal route (`/...`) or absolute URL (`scheme://...`).
    pub link: String,
}

impl NavLink {
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Whether the link points inside the site.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.link.starts_with('/')
    }
}

/// Metadata for one locale of the site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMeta {
    /// Language tag (e.g. `en-US`).
    pub lang: String,
    /// Site title shown for this locale.
    pub title: String,
    /// Name shown in the language switcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(
        default,
        rename = "selectText",
        alias = "select_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub select_text: Option<String>,
    #[serde(
        default,
        rename = "lastUpdated",
        alias = "last_updated",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
    #[serde(
        default,
        rename = "editLinkText",
        alias = "edit_link_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_link_text: Option<String>,
    /// Sidebar owned by this locale. Never inherited from another locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<SidebarMap>,
}

impl LocaleMeta {
    #[must_use]
    pub fn new(lang: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Whether any theme-side field (labels or sidebar) is set.
    #[must_use]
    pub fn has_theme_fields(&self) -> bool {
        self.label.is_some()
            || self.select_text.is_some()
            || self.last_updated.is_some()
            || self.edit_link_text.is_some()
            || self.sidebar.is_some()
    }
}

/// Complete configuration for one build of the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Path the site is served under (e.g. `/v2/`).
    #[serde(default = "default_base")]
    pub base: String,
    /// Site title.
    pub title: String,
    /// Locale key (`/`, `/zh/`, ...) to locale metadata.
    #[serde(default)]
    pub locales: BTreeMap<String, LocaleMeta>,
    #[serde(default)]
    pub sidebar: SidebarMap,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    /// Show "edit this page" links.
    #[serde(default = "default_true", rename = "editLinks", alias = "edit_links")]
    pub edit_links: bool,
    /// Heading depth shown under sidebar links.
    #[serde(
        default = "default_sidebar_depth",
        rename = "sidebarDepth",
        alias = "sidebar_depth"
    )]
    pub sidebar_depth: u8,
}

impl SiteConfig {
    /// Create an empty configuration served from `/`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            base: default_base(),
            title: title.into(),
            locales: BTreeMap::new(),
            sidebar: SidebarMap::new(),
            nav: Vec::new(),
            edit_links: true,
            sidebar_depth: default_sidebar_depth(),
        }
    }

    /// Number of routes referenced by all sidebars, including locale sidebars.
    #[must_use]
    pub fn route_count(&self) -> usize {
        let mut count = 0;
        let locale_sidebars = self.locales.values().filter_map(|l| l.sidebar.as_ref());
        let sidebars = std::iter::once(&self.sidebar).chain(locale_sidebars);
        for sidebar in sidebars {
            for section in sidebar {
                for entry in &section.entries {
                    match entry {
                        SidebarEntry::Route(_) => count += 1,
                        SidebarEntry::Group(group) => group.for_each_route(&mut |_| count += 1),
                    }
                }
            }
        }
        count
    }
}

fn default_base() -> String {
    "/".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_sidebar_depth() -> u8 {
    MAX_SIDEBAR_DEPTH
}
