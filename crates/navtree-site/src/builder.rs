//! Validated constructors for sidebars and navigation bars.

use crate::error::BuildError;
use crate::model::{NavLink, SidebarEntry, SidebarMap};
use crate::validate::{ValidationPolicy, Validator};

/// Build a [`SidebarMap`] from `(prefix, entries)` declarations.
///
/// Declaration order of prefixes and entries is preserved.
///
/// # Errors
///
/// Returns [`BuildError`] listing every violation: malformed routes,
/// routes outside their prefix, duplicate prefixes, empty groups and
/// untitled multi-child groups.
pub fn build_sidebar<I, P>(sections: I) -> Result<SidebarMap, BuildError>
where
    I: IntoIterator<Item = (P, Vec<SidebarEntry>)>,
    P: Into<String>,
{
    build_sidebar_with(sections, &ValidationPolicy::default())
}

/// [`build_sidebar`] with an explicit policy.
///
/// # Errors
///
/// Returns [`BuildError`] listing every violation.
pub fn build_sidebar_with<I, P>(
    sections: I,
    policy: &ValidationPolicy,
) -> Result<SidebarMap, BuildError>
where
    I: IntoIterator<Item = (P, Vec<SidebarEntry>)>,
    P: Into<String>,
{
    let sidebar: SidebarMap = sections.into_iter().collect();
    let mut validator = Validator::new(policy, None);
    validator.check_sidebar("sidebar", &sidebar);
    match BuildError::from_errors(validator.finish()) {
        Some(err) => Err(err),
        None => Ok(sidebar),
    }
}

/// Build the navigation bar from `{text, link}` declarations.
///
/// # Errors
///
/// Returns [`BuildError`] if any link has empty text or a target that is
/// neither an internal route nor an absolute URL.
pub fn build_nav<I>(links: I) -> Result<Vec<NavLink>, BuildError>
where
    I: IntoIterator<Item = NavLink>,
{
    build_nav_with(links, &ValidationPolicy::default())
}

/// [`build_nav`] with an explicit policy.
///
/// # Errors
///
/// Returns [`BuildError`] listing every malformed link.
pub fn build_nav_with<I>(links: I, policy: &ValidationPolicy) -> Result<Vec<NavLink>, BuildError>
where
    I: IntoIterator<Item = NavLink>,
{
    let links: Vec<NavLink> = links.into_iter().collect();
    let mut validator = Validator::new(policy, None);
    validator.check_nav("nav", &links);
    match BuildError::from_errors(validator.finish()) {
        Some(err) => Err(err),
        None => Ok(links),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::model::{NavGroup, SiteConfig};
    use crate::validate::validate;
    use pretty_assertions::assert_eq;

    fn guide_groups() -> Vec<SidebarEntry> {
        vec![
            NavGroup::new(
                "Essentials",
                vec![
                    "/guide/installation".into(),
                    "/guide/introduction".into(),
                    "/guide/a-crash-course".into(),
                ],
            )
            .into(),
            NavGroup::new("Extending", vec!["/guide/plugins".into()]).into(),
        ]
    }

    #[test]
    fn test_build_sidebar_then_validate_is_clean() {
        let sidebar = build_sidebar([("/guide/", guide_groups())]).unwrap();
        let mut config = SiteConfig::new("Docs");
        config.sidebar = sidebar;

        assert_eq!(validate(&config), Vec::new());
    }

    #[test]
    fn test_build_sidebar_preserves_child_order() {
        let sidebar = build_sidebar([("/guide/", guide_groups())]).unwrap();

        assert_eq!(sidebar.get("/guide/").unwrap(), guide_groups().as_slice());
    }

    #[test]
    fn test_build_sidebar_prefix_mismatch() {
        let err = build_sidebar([(
            "/guide/",
            vec![NavGroup::new("Guide", vec!["/api/foo".into()]).into()],
        )])
        .unwrap_err();

        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind, ValidationErrorKind::PrefixMismatch);
    }

    #[test]
    fn test_build_sidebar_empty_group() {
        let err = build_sidebar([("/guide/", vec![NavGroup::new("Guide", Vec::new()).into()])])
            .unwrap_err();

        assert!(err.has_kind(ValidationErrorKind::EmptyGroup));
    }

    #[test]
    fn test_build_sidebar_with_lenient_titles() {
        let entries = vec![NavGroup::new("", vec!["/a/x".into(), "/a/y".into()]).into()];
        let policy = ValidationPolicy {
            require_group_titles: false,
            ..Default::default()
        };

        assert!(build_sidebar([("/a/", entries.clone())]).is_err());
        assert!(build_sidebar_with([("/a/", entries)], &policy).is_ok());
    }

    #[test]
    fn test_build_nav_accepts_internal_and_external() {
        let links = vec![
            NavLink::new("Guide", "/introduction"),
            NavLink::new("GitHub", "https://github.com/x"),
        ];

        let nav = build_nav(links.clone()).unwrap();

        assert_eq!(nav, links);
    }

    #[test]
    fn test_build_nav_rejects_schemeless_link() {
        let err = build_nav([NavLink::new("GitHub", "github.com/x")]).unwrap_err();

        assert_eq!(err.errors[0].kind, ValidationErrorKind::MalformedLink);
        assert_eq!(err.errors[0].location, "nav[0]");
    }

    #[test]
    fn test_build_nav_rejects_empty_text() {
        let err = build_nav([NavLink::new("  ", "/guide/")]).unwrap_err();

        assert_eq!(err.errors[0].kind, ValidationErrorKind::MalformedLink);
        assert!(err.errors[0].message.contains("empty text"));
    }
}
