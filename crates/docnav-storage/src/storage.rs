//! Storage trait and error types.
//!
//! Provides the core [`ContentStorage`] trait for locating content pages and
//! static assets, along with [`StorageError`] for unified error handling
//! across backends.
//!
//! # Slug Convention
//!
//! Content pages are addressed by **slugs**, not file paths:
//! - `""` - root page (`index.md`)
//! - `"roblox/1-introduction"` - `roblox/1-introduction.md` or `.mdx`
//! - `"api-reference"` - `api-reference/index.md` if present
//!
//! Storage implementations handle the mapping from slugs to their internal
//! storage format.

use std::path::PathBuf;

use serde::Deserialize;

/// Sidebar hints from a page's frontmatter `sidebar` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SidebarMeta {
    /// Label override for autogenerated entries.
    pub label: Option<String>,
    /// Sort key for autogenerated entries (lower first).
    pub order: Option<i64>,
    /// Exclude from autogenerated entries.
    pub hidden: bool,
}

/// Content page returned by storage lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPage {
    /// Slug (e.g., "", "roblox/1-introduction").
    pub slug: String,
    /// Backend location of the source file.
    pub path: PathBuf,
    /// Title from frontmatter.
    pub title: Option<String>,
    /// Sidebar hints from frontmatter.
    pub sidebar: SidebarMeta,
}

impl ContentPage {
    /// Create a page without frontmatter.
    #[must_use]
    pub fn new(slug: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            slug: slug.into(),
            path: path.into(),
            title: None,
            sidebar: SidebarMeta::default(),
        }
    }

    /// Label for autogenerated sidebar entries.
    ///
    /// Resolution order: `sidebar.label` > `title` > last slug segment.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.sidebar
            .label
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_else(|| self.slug.rsplit('/').next().unwrap_or_default())
    }

    /// Whether the page lives inside `directory` (at any depth).
    #[must_use]
    pub fn is_under(&self, directory: &str) -> bool {
        let directory = directory.trim_matches('/');
        if directory.is_empty() {
            return true;
        }
        self.slug == directory
            || self
                .slug
                .strip_prefix(directory)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Page frontmatter could not be parsed.
    InvalidFrontmatter,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidFrontmatter => "Invalid frontmatter",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Content lookup used to cross-check navigation against real pages.
///
/// Stands in for the site generator's content-file resolver and static-asset
/// loader. Implementations only read; they never create or modify content.
pub trait ContentStorage: Send + Sync {
    /// Scan and return all content pages, sorted by slug.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails (e.g., permission denied,
    /// unreadable frontmatter).
    fn scan(&self) -> Result<Vec<ContentPage>, StorageError>;

    /// Find the page for a slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(page))` - a source file exists for the slug
    /// - `Ok(None)` - no source file exists
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slug is malformed or the page can't be read.
    fn resolve(&self, slug: &str) -> Result<Option<ContentPage>, StorageError> {
        Ok(self.scan()?.into_iter().find(|page| page.slug == slug))
    }

    /// List pages inside a directory (recursively), sorted by slug.
    ///
    /// Returns an empty list if the directory doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory is malformed or can't be read.
    fn list(&self, directory: &str) -> Result<Vec<ContentPage>, StorageError> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|page| page.is_under(directory))
            .collect())
    }

    /// Check if a static asset exists.
    ///
    /// # Arguments
    ///
    /// * `path` - Asset path relative to the project root (e.g., "./src/assets/logo.svg")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the path is malformed.
    fn asset_exists(&self, path: &str) -> Result<bool, StorageError>;
}
