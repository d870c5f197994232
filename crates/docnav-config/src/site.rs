//! Validated site configuration.
//!
//! Serializes to the nested shape the site generator consumes:
//!
//! ```json
//! {
//!   "title": "Lune Custom Build",
//!   "base": "/",
//!   "site": "https://yanlvl99.github.io/lune-custom-build-doc",
//!   "logo": { "src": "./src/assets/logo.svg", "replacesTitle": true },
//!   "social": [ { "icon": "github", "label": "GitHub", "href": "https://github.com/yanlvl99/lune-custom-build" } ],
//!   "sidebar": [ ... ]
//! }
//! ```

use std::path::{Path, PathBuf};

use docnav_tree::NavigationTree;
use serde::{Deserialize, Serialize};

/// Site logo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), deny_unknown_fields)]
pub struct Logo {
    /// Static asset path, relative to the project root.
    pub src: String,
    /// Whether the logo replaces the title text in the header.
    #[serde(default)]
    pub replaces_title: bool,
}

/// Social link shown in the site header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Platform icon name (e.g., "github").
    pub icon: String,
    /// Accessible label.
    pub label: String,
    /// Target URL.
    pub href: String,
}

/// Validated site configuration.
///
/// Created once by [`SiteConfig::load`] or [`SiteConfig::from_toml`];
/// read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Base path the site is served under (e.g., "/", "/docs").
    #[serde(rename = "base")]
    pub base_href: String,
    /// Deployed origin (e.g., `https://example.com`).
    #[serde(rename = "site")]
    pub site_origin: String,
    /// Header logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// Header social links.
    #[serde(rename = "social")]
    pub social_links: Vec<SocialLink>,
    /// Sidebar.
    #[serde(rename = "sidebar")]
    pub navigation: NavigationTree,
    /// Content directory, relative to the project root.
    #[serde(skip)]
    pub content_dir: String,
    /// Path to the config file (set when loaded from disk).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl SiteConfig {
    /// Directory containing the config file, or `.` when parsed from text.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."))
    }

    /// Absolute URL of a page.
    ///
    /// Joins origin, base path and slug with single slashes and a trailing
    /// slash. An empty slug yields the site root.
    #[must_use]
    pub fn page_url(&self, slug: &str) -> String {
        let mut url = self.site_origin.trim_end_matches('/').to_owned();
        url.push('/');
        for part in [self.base_href.trim_matches('/'), slug.trim_matches('/')] {
            if !part.is_empty() {
                url.push_str(part);
                url.push('/');
            }
        }
        url
    }

    /// Root URL of the deployed site.
    #[must_use]
    pub fn deployed_url(&self) -> String {
        self.page_url("")
    }

    /// Serialize to the JSON shape the site generator consumes.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ConfigOverrides;

    static_assertions::assert_impl_all!(super::SiteConfig: Send, Sync);

    fn repository_config(overrides: Option<&ConfigOverrides>) -> SiteConfig {
        SiteConfig::from_toml(include_str!("../../../docnav.toml"), overrides).unwrap()
    }

    fn config_with(base: &str, site: &str) -> SiteConfig {
        let toml = format!("title = \"Docs\"\nbase = \"{base}\"\nsite = \"{site}\"\n");
        SiteConfig::from_toml(&toml, None).unwrap()
    }

    #[test]
    fn test_page_url_root_base() {
        let config = config_with("/", "https://yanlvl99.github.io/lune-custom-build-doc");

        assert_eq!(
            config.page_url("getting-started/1-installation"),
            "https://yanlvl99.github.io/lune-custom-build-doc/getting-started/1-installation/"
        );
    }

    #[test]
    fn test_page_url_with_base_path() {
        let config = config_with("/lune-custom-build-doc/", "https://yanlvl99.github.io/");

        assert_eq!(
            config.page_url("roblox/1-introduction"),
            "https://yanlvl99.github.io/lune-custom-build-doc/roblox/1-introduction/"
        );
        assert_eq!(
            config.deployed_url(),
            "https://yanlvl99.github.io/lune-custom-build-doc/"
        );
    }

    #[test]
    fn test_page_url_site_root() {
        let config = config_with("/", "https://example.com");

        assert_eq!(config.page_url(""), "https://example.com/");
    }

    #[test]
    fn test_profiles_deploy_to_same_url() {
        let default = repository_config(None);
        let pages = repository_config(Some(&ConfigOverrides {
            profile: Some("github-pages".to_owned()),
            ..Default::default()
        }));

        assert_eq!(default.deployed_url(), pages.deployed_url());
        assert_eq!(pages.base_href, "/lune-custom-build-doc");
        assert_eq!(default.navigation, pages.navigation);
    }

    #[test]
    fn test_repository_sidebar_flatten() {
        let config = repository_config(None);

        let entries: Vec<_> = config.navigation.flatten().collect();

        assert_eq!(entries.len(), 19);
        let first = entries[0];
        assert_eq!(
            (first.label, first.slug, first.depth),
            ("Installation", "getting-started/1-installation", 1)
        );
        // The autogenerated API Reference section has no leaves of its own.
        let last = entries[entries.len() - 1];
        assert_eq!(
            (last.label, last.slug, last.depth),
            ("Example Scripts", "roblox/2-examples", 1)
        );
        assert_eq!(config.navigation.flatten().count(), entries.len());
    }

    #[test]
    fn test_project_dir_defaults_to_current() {
        let config = config_with("/", "https://example.com");

        assert_eq!(config.project_dir(), Path::new("."));
    }

    #[test]
    fn test_to_json_framework_shape() {
        let config = repository_config(None);

        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(value["title"], "Lune Custom Build");
        assert_eq!(value["base"], "/");
        assert_eq!(
            value["site"],
            "https://yanlvl99.github.io/lune-custom-build-doc"
        );
        assert_eq!(value["logo"]["src"], "./src/assets/logo.svg");
        assert_eq!(value["logo"]["replacesTitle"], true);
        assert_eq!(value["social"][0]["href"], "https://github.com/yanlvl99/lune-custom-build");
        assert_eq!(value["sidebar"][0]["label"], "Getting Started");
        assert_eq!(
            value["sidebar"][0]["items"][0]["slug"],
            "getting-started/1-installation"
        );
        assert_eq!(
            value["sidebar"][4]["autogenerate"]["directory"],
            "api-reference"
        );
        assert!(value.get("content_dir").is_none());
    }

    #[test]
    fn test_to_json_sidebar_round_trip() {
        let config = repository_config(None);
        let json = config.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let sidebar: NavigationTree = serde_json::from_value(value["sidebar"].clone()).unwrap();

        assert_eq!(sidebar, config.navigation);
    }
}
