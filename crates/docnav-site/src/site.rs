//! Site: configuration bound to its content.
//!
//! [`Site`] pairs a validated [`SiteConfig`] with a [`ContentStorage`]
//! and answers questions that need both: do all sidebar slugs point at real
//! pages, what do autogenerated sections expand to, and which URLs belong in
//! the sitemap.

use std::sync::Arc;

use docnav_config::SiteConfig;
use docnav_storage::{ContentPage, ContentStorage, FsStorage, StorageError};
use docnav_tree::{NavigationNode, NavigationTree, NodeKind, NodePath, ValidationError};
use serde::Serialize;

use crate::report::VerifyReport;
use crate::sitemap::Sitemap;

/// Slugs that are never reported as orphans.
const RESERVED_SLUGS: [&str; 2] = ["", "404"];

/// Navigable page after autogenerated sections are expanded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Display label.
    pub label: String,
    /// Content page slug.
    pub slug: String,
    /// Nesting level; top-level leaves are at depth 0.
    pub depth: usize,
    /// True if the entry came from an autogenerate directory.
    pub autogenerated: bool,
}

/// Documentation site: validated configuration plus content access.
///
/// # Example
///
/// ```ignore
/// use docnav_config::SiteConfig;
/// use docnav_site::Site;
///
/// let config = SiteConfig::load(None, None)?;
/// let site = Site::from_config(config);
/// site.verify()?.into_result()?;
/// ```
pub struct Site {
    config: SiteConfig,
    storage: Arc<dyn ContentStorage>,
}

impl Site {
    /// Create a site over the given storage.
    #[must_use]
    pub fn new(config: SiteConfig, storage: Arc<dyn ContentStorage>) -> Self {
        Self { config, storage }
    }

    /// Create a site reading content from the filesystem.
    ///
    /// Content is read from `content_dir` relative to the config file's
    /// directory.
    #[must_use]
    pub fn from_config(config: SiteConfig) -> Self {
        let storage =
            FsStorage::with_content_dir(config.project_dir().to_path_buf(), &config.content_dir);
        Self::new(config, Arc::new(storage))
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Sidebar tree.
    #[must_use]
    pub fn navigation(&self) -> &NavigationTree {
        &self.config.navigation
    }

    /// Cross-check navigation and assets against the content.
    ///
    /// Every leaf must resolve to a page, every autogenerate directory must
    /// contain at least one page, and the logo asset must exist. Pages that
    /// no entry reaches are reported as orphans.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the content can't be read. Mismatches are
    /// reported in the [`VerifyReport`], not as errors.
    pub fn verify(&self) -> Result<VerifyReport, StorageError> {
        let mut report = VerifyReport::default();
        let mut covered_dirs = Vec::new();

        self.verify_nodes(
            self.navigation().roots(),
            &NodePath::root(),
            &mut report,
            &mut covered_dirs,
        )?;

        report.orphans = self
            .storage
            .scan()?
            .into_iter()
            .filter(|page| !self.is_reachable(page, &covered_dirs))
            .map(|page| page.slug)
            .collect();

        if let Some(logo) = &self.config.logo
            && !self.storage.asset_exists(&logo.src)?
        {
            tracing::warn!(src = %logo.src, "Logo asset not found");
            report.missing_logo = Some(logo.src.clone());
        }

        for orphan in &report.orphans {
            tracing::warn!(slug = %orphan, "Content page not reachable from navigation");
        }
        tracing::info!(
            errors = report.errors.len(),
            orphans = report.orphans.len(),
            "Site verification completed"
        );

        Ok(report)
    }

    fn verify_nodes(
        &self,
        nodes: &[NavigationNode],
        parent: &NodePath,
        report: &mut VerifyReport,
        covered_dirs: &mut Vec<String>,
    ) -> Result<(), StorageError> {
        for (index, node) in nodes.iter().enumerate() {
            let path = parent.child(&node.label, index);
            match &node.kind {
                NodeKind::Group { children } => {
                    self.verify_nodes(children, &path, report, covered_dirs)?;
                }
                NodeKind::Leaf { slug } => {
                    if self.storage.resolve(slug)?.is_none() {
                        report
                            .errors
                            .push(ValidationError::missing_content(slug, path));
                    }
                }
                NodeKind::Autogenerate { directory } => {
                    if self.storage.list(directory)?.is_empty() {
                        report
                            .errors
                            .push(ValidationError::dangling_directory(directory, path));
                    } else {
                        covered_dirs.push(directory.clone());
                    }
                }
            }
        }
        Ok(())
    }

    fn is_reachable(&self, page: &ContentPage, covered_dirs: &[String]) -> bool {
        RESERVED_SLUGS.contains(&page.slug.as_str())
            || self.navigation().contains(&page.slug)
            || covered_dirs.iter().any(|dir| page.is_under(dir))
    }

    /// Navigable pages in sidebar order.
    ///
    /// Like [`NavigationTree::flatten`], but each autogenerate node is replaced
    /// by the pages of its directory: ordered by `sidebar.order` (unordered
    /// pages last), then by slug, skipping pages marked `sidebar.hidden`.
    ///
    /// Subdirectories are not turned into nested groups. Every page found
    /// under the directory, however deep, sits one level below the
    /// autogenerate node.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a directory can't be listed.
    pub fn pages(&self) -> Result<Vec<PageEntry>, StorageError> {
        let mut entries = Vec::with_capacity(self.navigation().leaf_count());

        for visit in self.navigation().walk() {
            match &visit.node.kind {
                NodeKind::Group { .. } => {}
                NodeKind::Leaf { slug } => entries.push(PageEntry {
                    label: visit.node.label.clone(),
                    slug: slug.clone(),
                    depth: visit.depth,
                    autogenerated: false,
                }),
                NodeKind::Autogenerate { directory } => {
                    let mut pages = self.storage.list(directory)?;
                    pages.retain(|page| !page.sidebar.hidden);
                    pages.sort_by(|a, b| {
                        sort_order(a)
                            .cmp(&sort_order(b))
                            .then_with(|| a.slug.cmp(&b.slug))
                    });
                    entries.extend(pages.into_iter().map(|page| PageEntry {
                        label: page.display_label().to_owned(),
                        depth: visit.depth + 1,
                        slug: page.slug,
                        autogenerated: true,
                    }));
                }
            }
        }

        Ok(entries)
    }

    /// Render the sitemap for all navigable pages.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a directory can't be listed.
    pub fn sitemap(&self) -> Result<String, StorageError> {
        let urls = self
            .pages()?
            .into_iter()
            .map(|entry| self.config.page_url(&entry.slug));
        Ok(Sitemap::new(urls).into_xml())
    }
}

/// Unordered pages sort last.
fn sort_order(page: &ContentPage) -> i64 {
    page.sidebar.order.unwrap_or(i64::MAX)
}
