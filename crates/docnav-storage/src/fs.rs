//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for locating content pages under a project's
//! content directory and static assets under the project root.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::frontmatter;
use crate::storage::{ContentPage, ContentStorage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default content directory, relative to the project root.
pub const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Recognized content file extensions.
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Filesystem storage implementation.
///
/// Maps a slug to `<content_dir>/<slug>.md`, `<slug>.mdx`, `<slug>/index.md`
/// or `<slug>/index.mdx`, in that order. Slugs ending in `index` never
/// resolve; `guide/index.md` is the page `guide`.
///
/// A missing directory scans as empty. Any other I/O error is returned.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docnav_storage::{ContentStorage, FsStorage};
///
/// let storage = FsStorage::new(PathBuf::from("."));
/// let page = storage.resolve("getting-started/1-installation")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Project root; static assets are resolved against it.
    project_dir: PathBuf,
    /// Root directory for content pages.
    content_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage with the default content directory.
    ///
    /// # Arguments
    ///
    /// * `project_dir` - Project root containing `src/content/docs`
    #[must_use]
    pub fn new(project_dir: PathBuf) -> Self {
        Self::with_content_dir(project_dir, DEFAULT_CONTENT_DIR)
    }

    /// Create a new filesystem storage with a custom content directory.
    ///
    /// # Arguments
    ///
    /// * `project_dir` - Project root
    /// * `content_dir` - Content directory, relative to `project_dir`
    #[must_use]
    pub fn with_content_dir(project_dir: PathBuf, content_dir: impl AsRef<Path>) -> Self {
        let content_dir = project_dir.join(content_dir);
        Self {
            project_dir,
            content_dir,
        }
    }

    /// Root directory for content pages.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Validate that a path doesn't escape its root directory.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Scan directory recursively and collect pages.
    fn scan_directory(
        &self,
        dir_path: &Path,
        base_path: &Path,
    ) -> Result<Vec<ContentPage>, StorageError> {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::dir_error(e, dir_path)),
        };

        let mut pages = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| Self::dir_error(e, dir_path))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            // Skip hidden and underscore-prefixed files/dirs
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let path = entry.path();
            let rel_path = base_path.join(&name);

            let file_type = entry.file_type().map_err(|e| Self::dir_error(e, &path))?;

            // Symlinked directories are not followed.
            if file_type.is_symlink() && path.is_dir() {
                tracing::debug!(path = %path.display(), "Skipping symlinked directory");
                continue;
            }

            if file_type.is_dir() {
                if name == "node_modules" {
                    continue;
                }
                pages.extend(self.scan_directory(&path, &rel_path)?);
            } else if has_content_extension(&path) {
                pages.push(Self::load_page(slug_for(&rel_path), path)?);
            }
        }

        Ok(pages)
    }

    fn dir_error(err: io::Error, path: &Path) -> StorageError {
        StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND)
    }

    /// Read a page's frontmatter.
    fn load_page(slug: String, path: PathBuf) -> Result<ContentPage, StorageError> {
        let content = fs::read_to_string(&path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;

        let fm = frontmatter::parse(&content).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidFrontmatter)
                .with_path(&path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        Ok(ContentPage {
            slug,
            path,
            title: fm.title,
            sidebar: fm.sidebar,
        })
    }

    /// Candidate source files for a slug, in lookup order.
    fn candidates(&self, slug: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(EXTENSIONS.len() * 2);
        if !slug.is_empty() {
            for ext in EXTENSIONS {
                candidates.push(self.content_dir.join(format!("{slug}.{ext}")));
            }
        }
        for ext in EXTENSIONS {
            candidates.push(self.content_dir.join(slug).join(format!("index.{ext}")));
        }
        candidates
    }
}

impl ContentStorage for FsStorage {
    fn scan(&self) -> Result<Vec<ContentPage>, StorageError> {
        let mut pages = self.scan_directory(&self.content_dir, Path::new(""))?;
        pages.sort_by(|a, b| a.slug.cmp(&b.slug));

        tracing::debug!(
            content_dir = %self.content_dir.display(),
            page_count = pages.len(),
            "Content scan completed"
        );

        Ok(pages)
    }

    fn resolve(&self, slug: &str) -> Result<Option<ContentPage>, StorageError> {
        Self::validate_path(Path::new(slug))?;

        // Index files are addressed by their directory's slug.
        if slug.rsplit('/').next() == Some("index") {
            return Ok(None);
        }

        match self.candidates(slug).into_iter().find(|c| c.is_file()) {
            Some(path) => Self::load_page(slug.to_owned(), path).map(Some),
            None => Ok(None),
        }
    }

    fn list(&self, directory: &str) -> Result<Vec<ContentPage>, StorageError> {
        let directory = directory.trim_matches('/');
        Self::validate_path(Path::new(directory))?;

        let mut pages =
            self.scan_directory(&self.content_dir.join(directory), Path::new(directory))?;
        pages.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(pages)
    }

    fn asset_exists(&self, path: &str) -> Result<bool, StorageError> {
        let relative = Path::new(path.strip_prefix("./").unwrap_or(path));
        Self::validate_path(relative)?;
        Ok(self.project_dir.join(relative).is_file())
    }
}

fn has_content_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e))
}

/// Derive the slug from a content-relative file path.
///
/// `guide/setup.md` -> `guide/setup`, `guide/index.md` -> `guide`,
/// `index.md` -> `""`.
fn slug_for(rel_path: &Path) -> String {
    let without_ext = rel_path.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> (TempDir, FsStorage) {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "src/content/docs/index.mdx", "---\ntitle: Home\n---\n");
        write(
            root,
            "src/content/docs/getting-started/1-installation.md",
            "---\ntitle: Installation\n---\n# Installation\n",
        );
        write(
            root,
            "src/content/docs/api-reference/fs.md",
            "---\ntitle: FS\nsidebar:\n  order: 2\n---\n",
        );
        write(root, "src/content/docs/api-reference/net/index.md", "# Net\n");
        write(root, "src/content/docs/_drafts/wip.md", "# WIP\n");
        write(root, "src/content/docs/.hidden.md", "# Hidden\n");
        write(root, "src/content/docs/notes.txt", "not content");
        write(root, "src/assets/logo.svg", "<svg/>");
        let storage = FsStorage::new(root.to_path_buf());
        (temp_dir, storage)
    }

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for(Path::new("guide/setup.md")), "guide/setup");
        assert_eq!(slug_for(Path::new("guide/index.mdx")), "guide");
        assert_eq!(slug_for(Path::new("index.md")), "");
    }

    #[test]
    fn test_scan_finds_pages_sorted() {
        let (_temp_dir, storage) = project();

        let slugs: Vec<_> = storage
            .scan()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();

        assert_eq!(
            slugs,
            vec![
                "",
                "api-reference/fs",
                "api-reference/net",
                "getting-started/1-installation",
            ]
        );
    }

    #[test]
    fn test_scan_missing_content_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_reads_frontmatter() {
        let (_temp_dir, storage) = project();

        let page = storage.resolve("api-reference/fs").unwrap().unwrap();

        assert_eq!(page.title.as_deref(), Some("FS"));
        assert_eq!(page.sidebar.order, Some(2));
        assert!(page.path.ends_with("api-reference/fs.md"));
    }

    #[test]
    fn test_resolve_index_page() {
        let (_temp_dir, storage) = project();

        let page = storage.resolve("api-reference/net").unwrap().unwrap();

        assert!(page.path.ends_with("api-reference/net/index.md"));
        assert!(page.title.is_none());
    }

    #[test]
    fn test_resolve_root() {
        let (_temp_dir, storage) = project();

        let page = storage.resolve("").unwrap().unwrap();

        assert_eq!(page.title.as_deref(), Some("Home"));
    }

    #[test]
    fn test_resolve_missing() {
        let (_temp_dir, storage) = project();

        assert!(storage.resolve("roblox/1-introduction").unwrap().is_none());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let (_temp_dir, storage) = project();

        let err = storage.resolve("../secrets").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_list_directory() {
        let (_temp_dir, storage) = project();

        let slugs: Vec<_> = storage
            .list("api-reference")
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();

        assert_eq!(slugs, vec!["api-reference/fs", "api-reference/net"]);
    }

    #[test]
    fn test_list_missing_directory() {
        let (_temp_dir, storage) = project();

        assert!(storage.list("roblox").unwrap().is_empty());
    }

    #[test]
    fn test_resolve_rejects_index_slug() {
        let (_temp_dir, storage) = project();

        assert!(storage.resolve("api-reference/net/index").unwrap().is_none());
        assert!(storage.resolve("index").unwrap().is_none());
        assert!(storage.resolve("api-reference/net").unwrap().is_some());
    }

    #[test]
    fn test_index_slug_agrees_with_scan() {
        let (_temp_dir, storage) = project();

        let scanned: Vec<_> = storage
            .scan()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();

        for slug in &scanned {
            assert!(storage.resolve(slug).unwrap().is_some(), "{slug}");
        }
        assert!(!scanned.contains(&"api-reference/net/index".to_owned()));
    }

    #[test]
    fn test_list_unreadable_directory_is_error() {
        let (temp_dir, storage) = project();
        write(temp_dir.path(), "src/content/docs/guide.md", "# Guide\n");

        let err = storage.list("guide.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Other);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(
            err.path,
            Some(temp_dir.path().join("src/content/docs/guide.md"))
        );
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_scan_content_dir_not_a_directory_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "docs", "not a directory");
        let storage = FsStorage::with_content_dir(temp_dir.path().to_path_buf(), "docs");

        assert!(storage.scan().is_err());
    }

    #[test]
    fn test_io_error_kinds() {
        let path = Path::new("src/content/docs/api-reference");
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        let err = FsStorage::dir_error(denied, path);

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.path.as_deref(), Some(path));
        assert_eq!(err.backend, Some("Fs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinked_directory() {
        let (temp_dir, storage) = project();
        let docs = temp_dir.path().join("src/content/docs");
        std::os::unix::fs::symlink(docs.join("api-reference"), docs.join("linked")).unwrap();

        let slugs: Vec<_> = storage
            .scan()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();

        assert!(!slugs.iter().any(|s| s.starts_with("linked")));
        assert!(slugs.contains(&"api-reference/fs".to_owned()));
    }

    #[test]
    fn test_invalid_frontmatter_is_error() {
        let (temp_dir, storage) = project();
        write(
            temp_dir.path(),
            "src/content/docs/broken.md",
            "---\ntitle: [oops\n---\n",
        );

        let err = storage.resolve("broken").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidFrontmatter);
        assert!(err.downcast_source::<serde_yaml::Error>().is_some());
    }

    #[test]
    fn test_asset_exists() {
        let (_temp_dir, storage) = project();

        assert!(storage.asset_exists("./src/assets/logo.svg").unwrap());
        assert!(storage.asset_exists("src/assets/logo.svg").unwrap());
        assert!(!storage.asset_exists("./src/assets/missing.png").unwrap());
        assert!(storage.asset_exists("../etc/passwd").is_err());
    }

    #[test]
    fn test_custom_content_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "docs/guide.md", "# Guide\n");
        let storage = FsStorage::with_content_dir(temp_dir.path().to_path_buf(), "docs");

        assert!(storage.resolve("guide").unwrap().is_some());
        assert_eq!(storage.content_dir(), temp_dir.path().join("docs"));
    }
}
