//! Content page resolution for documentation site navigation.
//!
//! This crate provides a [`ContentStorage`] trait for locating the content
//! pages that sidebar slugs point at, and the static assets the site config
//! references. This enables:
//!
//! - **Cross-checking** navigation against real content before a build
//! - **Unit testing** without touching the real filesystem
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentStorage`] trait with `scan()`, `resolve()`, `list()`, and `asset_exists()`
//! - [`FsStorage`] implementation reading `src/content/docs` and YAML frontmatter
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docnav_storage::{ContentStorage, FsStorage};
//!
//! let storage = FsStorage::new(PathBuf::from("."));
//! for page in storage.scan()? {
//!     println!("{}: {:?}", page.slug, page.title);
//! }
//! ```

mod frontmatter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::{DEFAULT_CONTENT_DIR, FsStorage};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{ContentPage, ContentStorage, SidebarMeta, StorageError, StorageErrorKind};
