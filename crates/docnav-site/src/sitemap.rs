//! Sitemap rendering.
//!
//! Renders the navigable pages as a sitemap document for search engine
//! indexing. Writing the file is left to the site generator.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/guide/</loc>
//!   </url>
//! </urlset>
//! ```

use std::collections::HashSet;

use quick_xml::escape::escape;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Ordered, de-duplicated list of page URLs.
pub(crate) struct Sitemap {
    urls: Vec<String>,
}

impl Sitemap {
    /// Collect URLs, keeping the first occurrence of each.
    pub(crate) fn new(urls: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let urls = urls
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();
        Self { urls }
    }

    pub(crate) fn into_xml(self) -> String {
        let mut xml = String::with_capacity(64 + self.urls.len() * 64);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for url in &self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape(url.as_str()));
            xml.push_str("</loc>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}
