//! Documentation site checks.
//!
//! Binds a [`SiteConfig`](docnav_config::SiteConfig) to the content it
//! describes. [`Site::verify`] reports sidebar entries without content,
//! autogenerate directories without pages, a missing logo asset, and
//! content pages no sidebar entry reaches. [`Site::pages`] lists navigable
//! pages with autogenerated sections expanded, and [`Site::sitemap`] renders
//! them for search engines.

mod report;
mod site;
mod sitemap;

pub use report::{SiteError, VerifyReport};
pub use site::{PageEntry, Site};
