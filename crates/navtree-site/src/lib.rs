//! Navigation tree model for versioned documentation sites.
//!
//! This crate provides:
//! - [`SiteConfig`] and its parts ([`SidebarMap`], [`NavGroup`], [`NavLink`],
//!   [`LocaleMeta`]): the declarative configuration handed to the site generator
//! - [`validate`] / [`build`]: a collecting validator and its strict counterpart
//! - [`build_sidebar`] / [`build_nav`]: validated constructors for the two trees
//! - [`merge_locale`]: locale metadata overlay with default-locale inheritance
//! - [`ContentIndex`]: optional route existence checks against the content tree
//! - [`SiteTemplate`] / [`VersionedSites`]: one config per published version
//!
//! # Quick Start
//!
//! ```
//! use navtree_site::{NavGroup, SidebarEntry, build_sidebar};
//!
//! let sidebar = build_sidebar([(
//!     "/guide/",
//!     vec![SidebarEntry::Group(NavGroup::new(
//!         "Essentials",
//!         vec!["/guide/installation".into(), "/guide/introduction".into()],
//!     ))],
//! )])?;
//!
//! assert_eq!(sidebar.len(), 1);
//! # Ok::<(), navtree_site::BuildError>(())
//! ```

mod builder;
mod content;
mod error;
mod locale;
mod model;
mod publish;
mod route;
mod validate;
mod versions;

pub use builder::{build_nav, build_nav_with, build_sidebar, build_sidebar_with};
pub use content::ContentIndex;
pub use error::{BuildError, ValidationError, ValidationErrorKind, VersionsBuildError};
pub use locale::{DEFAULT_LANG, DEFAULT_LOCALE, LocaleOverrides, merge_locale};
pub use model::{
    FLAT_SIDEBAR_PREFIX, LocaleMeta, MAX_SIDEBAR_DEPTH, NavGroup, NavLink, Route, SidebarEntry,
    SidebarMap, SidebarSection, SiteConfig,
};
pub use publish::{GeneratorConfig, to_generator_json};
pub use validate::{ValidationPolicy, build, build_with, validate, validate_with};
pub use versions::{SiteTemplate, VersionParams, VersionedSites};
