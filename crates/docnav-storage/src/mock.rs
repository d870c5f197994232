//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeSet;

use crate::storage::{ContentPage, ContentStorage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores pages and asset paths in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docnav_storage::{ContentStorage, MockStorage};
///
/// let storage = MockStorage::new()
///     .with_page("roblox/1-introduction", "Introduction")
///     .with_asset("./src/assets/logo.svg");
///
/// assert!(storage.resolve("roblox/1-introduction").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: Vec<ContentPage>,
    assets: BTreeSet<String>,
    failure: Option<StorageErrorKind>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given slug and frontmatter title.
    #[must_use]
    pub fn with_page(self, slug: impl Into<String>, title: impl Into<String>) -> Self {
        let slug = slug.into();
        let mut page = ContentPage::new(slug.clone(), format!("{slug}.md"));
        page.title = Some(title.into());
        self.with_content_page(page)
    }

    /// Add a fully specified page.
    #[must_use]
    pub fn with_content_page(mut self, page: ContentPage) -> Self {
        self.pages.push(page);
        self
    }

    /// Add a static asset path.
    ///
    /// A leading `./` is ignored on lookup.
    #[must_use]
    pub fn with_asset(mut self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        self.assets.insert(normalize_asset(&path).to_owned());
        self
    }

    /// Make every operation fail with the given error kind.
    #[must_use]
    pub fn failing(mut self, kind: StorageErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }

    fn check_failure(&self) -> Result<(), StorageError> {
        match self.failure {
            Some(kind) => Err(StorageError::new(kind).with_backend("Mock")),
            None => Ok(()),
        }
    }
}

impl ContentStorage for MockStorage {
    fn scan(&self) -> Result<Vec<ContentPage>, StorageError> {
        self.check_failure()?;
        let mut pages = self.pages.clone();
        pages.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(pages)
    }

    fn asset_exists(&self, path: &str) -> Result<bool, StorageError> {
        self.check_failure()?;
        Ok(self.assets.contains(normalize_asset(path)))
    }
}

fn normalize_asset(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_sorted_by_slug() {
        let storage = MockStorage::new()
            .with_page("roblox/2-examples", "Examples")
            .with_page("roblox/1-introduction", "Introduction");

        let slugs: Vec<_> = storage
            .scan()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();

        assert_eq!(slugs, vec!["roblox/1-introduction", "roblox/2-examples"]);
    }

    #[test]
    fn test_resolve_uses_default_impl() {
        let storage = MockStorage::new().with_page("packages/1-init", "Init");

        let page = storage.resolve("packages/1-init").unwrap().unwrap();

        assert_eq!(page.title.as_deref(), Some("Init"));
        assert!(storage.resolve("packages/2-install").unwrap().is_none());
    }

    #[test]
    fn test_list_filters_directory() {
        let storage = MockStorage::new()
            .with_page("api-reference/fs", "FS")
            .with_page("api-reference-old/fs", "Old FS")
            .with_page("roblox/1-introduction", "Introduction");

        let pages = storage.list("api-reference").unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug, "api-reference/fs");
    }

    #[test]
    fn test_asset_exists() {
        let storage = MockStorage::new().with_asset("./src/assets/logo.svg");

        assert!(storage.asset_exists("src/assets/logo.svg").unwrap());
        assert!(storage.asset_exists("./src/assets/logo.svg").unwrap());
        assert!(!storage.asset_exists("./src/assets/other.svg").unwrap());
    }

    #[test]
    fn test_failing() {
        let storage = MockStorage::new()
            .with_page("a", "A")
            .failing(StorageErrorKind::PermissionDenied);

        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.backend, Some("Mock"));
        assert!(storage.asset_exists("x").is_err());
    }
}
