//! Locale metadata merging.
//!
//! # Inheritance
//!
//! [`merge_locale`] resolves each field with this precedence:
//! 1. the override, when set
//! 2. the locale's existing entry
//! 3. the default locale (`/`)
//! 4. built-in fallbacks ([`DEFAULT_LANG`], the site title)
//!
//! Sidebars are never inherited: each locale owns its full sidebar, so the
//! merged entry keeps its own sidebar (or none).

use serde::Deserialize;

use crate::model::{LocaleMeta, SiteConfig};

/// Key of the default locale.
pub const DEFAULT_LOCALE: &str = "/";

/// Language tag used when neither the locale nor the default locale sets one.
pub const DEFAULT_LANG: &str = "en-US";

/// Locale fields to overlay. `None` fields are inherited.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocaleOverrides {
    pub lang: Option<String>,
    pub title: Option<String>,
    pub label: Option<String>,
    pub select_text: Option<String>,
    pub last_updated: Option<String>,
    pub edit_link_text: Option<String>,
}

impl LocaleOverrides {
    /// Overrides setting only `lang` and `title`.
    #[must_use]
    pub fn new(lang: Option<String>, title: Option<String>) -> Self {
        Self {
            lang,
            title,
            ..Default::default()
        }
    }
}

/// Produce a copy of `base` with `locale`'s metadata overlaid.
///
/// Deterministic: identical arguments always produce equal output.
#[must_use]
pub fn merge_locale(base: &SiteConfig, locale: &str, overrides: &LocaleOverrides) -> SiteConfig {
    let existing = base.locales.get(locale);
    let default = base.locales.get(DEFAULT_LOCALE);

    let chain = [existing, default];
    let pick = |over: &Option<String>, get: Getter| inherit(over.as_deref(), chain, get);

    let merged = LocaleMeta {
        lang: pick(&overrides.lang, |m| non_empty(&m.lang))
            .unwrap_or_else(|| DEFAULT_LANG.to_owned()),
        title: pick(&overrides.title, |m| non_empty(&m.title))
            .unwrap_or_else(|| base.title.clone()),
        label: pick(&overrides.label, |m| m.label.as_deref()),
        select_text: pick(&overrides.select_text, |m| m.select_text.as_deref()),
        last_updated: pick(&overrides.last_updated, |m| m.last_updated.as_deref()),
        edit_link_text: pick(&overrides.edit_link_text, |m| m.edit_link_text.as_deref()),
        sidebar: existing.and_then(|m| m.sidebar.clone()),
    };

    let mut config = base.clone();
    config.locales.insert(locale.to_owned(), merged);
    config
}

type Getter = fn(&LocaleMeta) -> Option<&str>;

/// First value set in `over`, then along `chain`.
fn inherit<'a>(
    over: Option<&'a str>,
    chain: [Option<&'a LocaleMeta>; 2],
    get: Getter,
) -> Option<String> {
    over.or_else(|| chain.into_iter().flatten().find_map(get))
        .map(str::to_owned)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
