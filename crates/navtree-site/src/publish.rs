//! Generator-facing view of a [`SiteConfig`].
//!
//! The site generator expects navigation under `themeConfig` and splits each
//! locale between `locales` (language and title) and `themeConfig.locales`
//! (labels and sidebar). [`GeneratorConfig`] borrows a [`SiteConfig`] and
//! serializes it in that shape.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{NavLink, SidebarMap, SiteConfig};

/// Serializable generator configuration borrowed from a [`SiteConfig`].
#[derive(Debug, Serialize)]
pub struct GeneratorConfig<'a> {
    base: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    locales: BTreeMap<&'a str, LocaleView<'a>>,
    #[serde(rename = "themeConfig")]
    theme_config: ThemeConfig<'a>,
}

#[derive(Debug, Serialize)]
struct LocaleView<'a> {
    lang: &'a str,
    title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeConfig<'a> {
    edit_links: bool,
    sidebar_depth: u8,
    sidebar: &'a SidebarMap,
    nav: &'a [NavLink],
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    locales: BTreeMap<&'a str, ThemeLocale<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeLocale<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    select_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_updated: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_link_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sidebar: Option<&'a SidebarMap>,
}

impl<'a> GeneratorConfig<'a> {
    #[must_use]
    pub fn new(config: &'a SiteConfig) -> Self {
        let locales = config
            .locales
            .iter()
            .map(|(key, meta)| {
                (
                    key.as_str(),
                    LocaleView {
                        lang: &meta.lang,
                        title: &meta.title,
                    },
                )
            })
            .collect();

        let theme_locales = config
            .locales
            .iter()
            .filter(|(_, meta)| meta.has_theme_fields())
            .map(|(key, meta)| {
                (
                    key.as_str(),
                    ThemeLocale {
                        label: meta.label.as_deref(),
                        select_text: meta.select_text.as_deref(),
                        last_updated: meta.last_updated.as_deref(),
                        edit_link_text: meta.edit_link_text.as_deref(),
                        sidebar: meta.sidebar.as_ref(),
                    },
                )
            })
            .collect();

        Self {
            base: &config.base,
            title: &config.title,
            locales,
            theme_config: ThemeConfig {
                edit_links: config.edit_links,
                sidebar_depth: config.sidebar_depth,
                sidebar: &config.sidebar,
                nav: &config.nav,
                locales: theme_locales,
            },
        }
    }
}

/// Serialize `config` as pretty-printed generator JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_generator_json(config: &SiteConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&GeneratorConfig::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocaleMeta, NavGroup};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_generator_shape() {
        let mut config = SiteConfig::new("Vue Test Utils");
        config.base = "/v2/".to_owned();
        config.locales.insert(
            "/".to_owned(),
            LocaleMeta::new("en-US", "Vue Test Utils (2.0.0-beta.0)"),
        );
        config.sidebar.insert(
            "/api/",
            vec![NavGroup::new("API Reference", vec!["/api/".into()]).into()],
        );
        config.nav = vec![NavLink::new("API Reference", "/api/")];

        let value = serde_json::to_value(GeneratorConfig::new(&config)).unwrap();

        assert_eq!(
            value,
            json!({
                "base": "/v2/",
                "title": "Vue Test Utils",
                "locales": {
                    "/": {"lang": "en-US", "title": "Vue Test Utils (2.0.0-beta.0)"}
                },
                "themeConfig": {
                    "editLinks": true,
                    "sidebarDepth": 2,
                    "sidebar": {
                        "/api/": [
                            {"title": "API Reference", "collapsable": false, "children": ["/api/"]}
                        ]
                    },
                    "nav": [{"text": "API Reference", "link": "/api/"}]
                }
            })
        );
    }

    #[test]
    fn test_theme_locales_only_when_set() {
        let mut config = SiteConfig::new("Docs");
        let mut default = LocaleMeta::new("en-US", "Docs");
        default.label = Some("English".to_owned());
        default.edit_link_text = Some("Edit this page on GitHub".to_owned());
        default.sidebar = Some([("/", vec!["/".into()])].into_iter().collect());
        config.locales.insert("/".to_owned(), default);
        config
            .locales
            .insert("/ja/".to_owned(), LocaleMeta::new("ja", "ドキュメント"));

        let value = serde_json::to_value(GeneratorConfig::new(&config)).unwrap();

        let theme_locales = &value["themeConfig"]["locales"];
        assert_eq!(
            theme_locales["/"],
            json!({
                "label": "English",
                "editLinkText": "Edit this page on GitHub",
                "sidebar": {"/": ["/"]}
            })
        );
        assert!(theme_locales.get("/ja/").is_none());
        assert_eq!(value["locales"]["/ja/"]["lang"], "ja");
    }

    #[test]
    fn test_flat_locale_sidebar_stays_an_array() {
        let mut config = SiteConfig::new("Vue Test Utils");
        let mut default = LocaleMeta::new("en-US", "Vue Test Utils");
        default.sidebar = Some(SidebarMap::flat(vec![
            "/".into(),
            "/guides/".into(),
            "/api-reference/".into(),
        ]));
        config.locales.insert("/".to_owned(), default);

        let value = serde_json::to_value(GeneratorConfig::new(&config)).unwrap();

        assert_eq!(
            value["themeConfig"]["locales"]["/"]["sidebar"],
            json!(["/", "/guides/", "/api-reference/"])
        );
    }

    #[test]
    fn test_to_generator_json_is_pretty() {
        let json = to_generator_json(&SiteConfig::new("Docs")).unwrap();

        assert!(json.contains("\n  \"base\": \"/\""));
        assert!(!json.contains("\"locales\""));
    }
}
