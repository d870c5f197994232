//! YAML frontmatter extraction.

use serde::Deserialize;

use crate::storage::SidebarMeta;

/// Frontmatter fields relevant to navigation. Other keys are ignored.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Frontmatter {
    pub title: Option<String>,
    pub sidebar: SidebarMeta,
}

/// Parse the leading `---` delimited YAML block of a page.
///
/// Pages without a frontmatter block yield the default.
pub(crate) fn parse(content: &str) -> Result<Frontmatter, serde_yaml::Error> {
    match extract_block(content) {
        Some(block) if !block.trim().is_empty() => serde_yaml::from_str(block),
        _ => Ok(Frontmatter::default()),
    }
}

fn extract_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}
