//! Site configuration for docnav.
//!
//! Parses `docnav.toml` with serde and provides auto-discovery of the config
//! file in parent directories. The result is a validated, immutable
//! [`SiteConfig`] that is passed explicitly to whatever consumes it.
//!
//! Deployment-specific URL settings are applied during load via
//! [`ConfigOverrides`]: first a named `[profiles.<name>]` table, then explicit
//! values. Only `base` and `site` can be overridden.
//!
//! ## File Format
//!
//! ```toml
//! title = "Lune Custom Build"
//! base = "/"
//! site = "https://yanlvl99.github.io/lune-custom-build-doc"
//!
//! [logo]
//! src = "./src/assets/logo.svg"
//! replaces_title = true
//!
//! [[social]]
//! icon = "github"
//! label = "GitHub"
//! href = "https://github.com/yanlvl99/lune-custom-build"
//!
//! [profiles.github-pages]
//! base = "/lune-custom-build-doc"
//! site = "https://yanlvl99.github.io"
//!
//! [[sidebar]]
//! label = "Roblox"
//! [[sidebar.items]]
//! label = "Introduction"
//! slug = "roblox/1-introduction"
//! ```

mod site;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docnav_tree::{NavigationTree, NodeDefinition, ValidationError};
use serde::Deserialize;

pub use site::{Logo, SiteConfig, SocialLink};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docnav.toml";

/// Default content directory, relative to the config file.
const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Settings that override configuration file values.
///
/// All fields are optional. `profile` is applied first, then the explicit
/// `base` / `site` values.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Name of a `[profiles.<name>]` table to apply.
    pub profile: Option<String>,
    /// Override base path.
    pub base: Option<String>,
    /// Override site origin.
    pub site: Option<String>,
}

/// Raw configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    title: String,
    base: Option<String>,
    site: String,
    content_dir: Option<String>,
    logo: Option<Logo>,
    social: Vec<SocialLink>,
    sidebar: Vec<NodeDefinition>,
    profiles: BTreeMap<String, Profile>,
}

/// Deployment profile: URL settings only.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Profile {
    base: Option<String>,
    site: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Sidebar definition error.
    #[error("Sidebar error: {0}")]
    Navigation(#[from] ValidationError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(url, field)?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a base path to be absolute and free of whitespace.
fn require_base_path(base: &str, field: &str) -> Result<(), ConfigError> {
    if !base.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with '/'"
        )));
    }
    if base.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace"
        )));
    }
    Ok(())
}

/// Require a path to be relative and stay inside the project.
fn require_relative_path(path: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(path, field)?;
    let escapes = Path::new(path).components().any(|c| {
        !matches!(
            c,
            std::path::Component::Normal(_) | std::path::Component::CurDir
        )
    });
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the project"
        )));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, parsing fails, the selected
    /// profile doesn't exist, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_default();
                ConfigError::NotFound(cwd.join(CONFIG_FILENAME))
            })?,
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content, overrides)?;
        config.config_path = Some(path);

        tracing::info!(
            config = %config.config_path.as_deref().unwrap_or(Path::new("")).display(),
            base = %config.base_href,
            site = %config.site_origin,
            pages = config.navigation.leaf_count(),
            "Site configuration loaded"
        );

        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails, the selected profile doesn't exist,
    /// or validation fails.
    pub fn from_toml(
        content: &str,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut raw: RawConfig = toml::from_str(content)?;

        if let Some(overrides) = overrides {
            raw.apply_overrides(overrides)?;
        }
        raw.validate()?;

        let navigation = NavigationTree::build(raw.sidebar)?;

        Ok(Self {
            title: raw.title,
            base_href: raw.base.unwrap_or_else(|| "/".to_owned()),
            site_origin: raw.site,
            logo: raw.logo,
            social_links: raw.social,
            navigation,
            content_dir: raw
                .content_dir
                .unwrap_or_else(|| DEFAULT_CONTENT_DIR.to_owned()),
            config_path: None,
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}

impl RawConfig {
    /// Apply profile and explicit overrides.
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(name) = &overrides.profile {
            let profile = self.profiles.get(name).ok_or_else(|| {
                ConfigError::Validation(format!("unknown profile \"{name}\""))
            })?;
            if let Some(base) = &profile.base {
                self.base = Some(base.clone());
            }
            if let Some(site) = &profile.site {
                self.site.clone_from(site);
            }
            tracing::debug!(profile = %name, "Applied configuration profile");
        }
        if let Some(base) = &overrides.base {
            self.base = Some(base.clone());
        }
        if let Some(site) = &overrides.site {
            self.site.clone_from(site);
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// The sidebar is validated separately when the tree is built.
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_http_url(&self.site, "site")?;
        if let Some(base) = &self.base {
            require_base_path(base, "base")?;
        }
        if let Some(content_dir) = &self.content_dir {
            require_relative_path(content_dir, "content_dir")?;
        }
        if let Some(logo) = &self.logo {
            require_non_empty(&logo.src, "logo.src")?;
        }
        for (i, link) in self.social.iter().enumerate() {
            require_non_empty(&link.icon, &format!("social[{i}].icon"))?;
            require_non_empty(&link.label, &format!("social[{i}].label"))?;
            require_http_url(&link.href, &format!("social[{i}].href"))?;
        }
        for (name, profile) in &self.profiles {
            if let Some(base) = &profile.base {
                require_base_path(base, &format!("profiles.{name}.base"))?;
            }
            if let Some(site) = &profile.site {
                require_http_url(site, &format!("profiles.{name}.site"))?;
            }
        }
        Ok(())
    }
}
