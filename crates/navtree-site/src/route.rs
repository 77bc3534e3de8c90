//! Route and link syntax checks.

use std::sync::LazyLock;

use regex::Regex;

/// Absolute URL with a scheme and a non-empty authority (`https://github.com/x`).
static ABSOLUTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/]+\S*$").unwrap());

/// Describe why `route` is not a valid route, or `None` if it is.
pub(crate) fn route_problem(route: &str) -> Option<String> {
    if route.is_empty() {
        return Some("route cannot be empty".to_owned());
    }
    if !route.starts_with('/') {
        return Some(format!("route '{route}' must start with '/'"));
    }
    if route.contains("//") {
        return Some(format!(
            "route '{route}' contains duplicate consecutive slashes"
        ));
    }
    None
}

/// Whether `link` is an absolute URL (`scheme://host...`).
pub(crate) fn is_absolute_url(link: &str) -> bool {
    ABSOLUTE_URL_RE.is_match(link)
}

/// Normalize a sidebar prefix so that `/guide` and `/guide/` compare equal.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        prefix.to_owned()
    } else {
        format!("{prefix}/")
    }
}

/// Strip the parts of a route that do not select a document (`#fragment`, `?query`).
pub(crate) fn document_path(route: &str) -> &str {
    let end = route.find(['#', '?']).unwrap_or(route.len());
    &route[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_problem_valid() {
        assert_eq!(route_problem("/"), None);
        assert_eq!(route_problem("/guide/installation"), None);
        assert_eq!(route_problem("/api/"), None);
        assert_eq!(route_problem("/guide/#setup"), None);
    }

    #[test]
    fn test_route_problem_empty() {
        assert!(route_problem("").unwrap().contains("empty"));
    }

    #[test]
    fn test_route_problem_missing_leading_slash() {
        let problem = route_problem("guide/installation").unwrap();
        assert!(problem.contains("must start with '/'"));
    }

    #[test]
    fn test_route_problem_double_slash() {
        let problem = route_problem("/guide//installation").unwrap();
        assert!(problem.contains("duplicate consecutive slashes"));
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("https://github.com/x"));
        assert!(is_absolute_url("http://localhost:8080"));
        assert!(is_absolute_url("git+ssh://example.com/repo"));
    }

    #[test]
    fn test_is_absolute_url_rejects_schemeless() {
        assert!(!is_absolute_url("github.com/x"));
        assert!(!is_absolute_url("//github.com/x"));
        assert!(!is_absolute_url("https://"));
        assert!(!is_absolute_url("https:///path"));
        assert!(!is_absolute_url("https://exa mple.com"));
        assert!(!is_absolute_url("1http://example.com"));
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/guide"), "/guide/");
        assert_eq!(normalize_prefix("/guide/"), "/guide/");
        assert_eq!(normalize_prefix("/"), "/");
    }

    #[test]
    fn test_document_path_strips_fragment_and_query() {
        assert_eq!(document_path("/guide/#setup"), "/guide/");
        assert_eq!(document_path("/api?tab=1"), "/api");
        assert_eq!(document_path("/plain"), "/plain");
    }
}
