//! Validation error types.

use std::collections::BTreeMap;
use std::fmt;

/// Category of a navigation invariant violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationErrorKind {
    /// Route or path prefix is syntactically invalid.
    MalformedRoute,
    /// Route does not start with the sidebar prefix it is nested under.
    PrefixMismatch,
    /// Sidebar prefix declared twice (or overlapping when nesting is disallowed).
    DuplicatePrefix,
    /// Group has no children.
    EmptyGroup,
    /// Navigation link has empty text or an unusable target.
    MalformedLink,
    /// Non-collapsable group with several children has no title.
    UntitledGroup,
    /// Route does not resolve to a file in the content index.
    MissingContent,
    /// Theme option out of range.
    InvalidOption,
}

impl ValidationErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRoute => "MalformedRoute",
            Self::PrefixMismatch => "PrefixMismatch",
            Self::DuplicatePrefix => "DuplicatePrefix",
            Self::EmptyGroup => "EmptyGroup",
            Self::MalformedLink => "MalformedLink",
            Self::UntitledGroup => "UntitledGroup",
            Self::MissingContent => "MissingContent",
            Self::InvalidOption => "InvalidOption",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single invariant violation found in a site configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {message}")]
pub struct ValidationError {
    /// Violation category.
    pub kind: ValidationErrorKind,
    /// Where in the configuration the violation was found
    /// (e.g. `sidebar['/guide/'][0].children[2]`).
    pub location: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(
        kind: ValidationErrorKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Strict build failure carrying every violation found.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_errors(.errors))]
pub struct BuildError {
    /// Violations in traversal order. Never empty.
    pub errors: Vec<ValidationError>,
}

impl BuildError {
    /// Wrap collected errors, returning `None` when there are none.
    #[must_use]
    pub(crate) fn from_errors(errors: Vec<ValidationError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self { errors })
    }

    /// Whether any violation has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    let mut out = format!("navigation tree has {} problem(s)", errors.len());
    for error in errors {
        out.push_str("\n  - ");
        out.push_str(&error.to_string());
    }
    out
}

/// Strict build failure across several versions, keyed by version id.
#[derive(Debug, thiserror::Error)]
#[error("{} version(s) failed validation: {}", .failures.len(), version_list(.failures))]
pub struct VersionsBuildError {
    pub failures: BTreeMap<String, BuildError>,
}

fn version_list(failures: &BTreeMap<String, BuildError>) -> String {
    failures.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(
            ValidationErrorKind::PrefixMismatch,
            "sidebar['/guide/'][0]",
            "route '/api/foo' does not start with '/guide/'",
        );

        assert_eq!(
            err.to_string(),
            "sidebar['/guide/'][0]: route '/api/foo' does not start with '/guide/'"
        );
    }

    #[test]
    fn test_build_error_from_empty_is_none() {
        assert!(BuildError::from_errors(Vec::new()).is_none());
    }

    #[test]
    fn test_build_error_lists_every_problem() {
        let err = BuildError::from_errors(vec![
            ValidationError::new(ValidationErrorKind::EmptyGroup, "a", "first"),
            ValidationError::new(ValidationErrorKind::MalformedLink, "b", "second"),
        ])
        .unwrap();

        let msg = err.to_string();

        assert!(msg.contains("2 problem(s)"));
        assert!(msg.contains("a: first"));
        assert!(msg.contains("b: second"));
        assert!(err.has_kind(ValidationErrorKind::MalformedLink));
        assert!(!err.has_kind(ValidationErrorKind::PrefixMismatch));
    }

    #[test]
    fn test_versions_build_error_names_versions() {
        let mut failures = BTreeMap::new();
        for version in ["v1", "v2"] {
            failures.insert(
                version.to_owned(),
                BuildError::from_errors(vec![ValidationError::new(
                    ValidationErrorKind::EmptyGroup,
                    "x",
                    "y",
                )])
                .unwrap(),
            );
        }

        let err = VersionsBuildError { failures };

        assert_eq!(err.to_string(), "2 version(s) failed validation: v1, v2");
    }
}
