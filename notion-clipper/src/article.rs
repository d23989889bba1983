//! Loads the article to save from disk.
//!
//! Two input shapes are accepted:
//! - `.json`: an [`ExtractedContent`] record as produced by the page extractor
//! - anything else: a markdown document; title and url are derived when not given

use anyhow::{Context, Result};
use notion_clipper_core::block::{Block, HeadingLevel};
use notion_clipper_core::page::ExtractedContent;
use notion_clipper_core::segment;
use reqwest::Url;
use std::path::Path;
use tracing::{debug, info};

/// Metadata given on the command line. Set fields win over whatever the input file says.
#[derive(Debug, Default, Clone)]
pub struct ArticleOverrides {
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
}

pub fn load_article(path: &Path, overrides: ArticleOverrides) -> Result<ExtractedContent> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read article {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut content = if is_json {
        debug!(path = %path.display(), "Reading article as extracted JSON");
        serde_json::from_str::<ExtractedContent>(&raw)
            .with_context(|| format!("Failed to parse article JSON {}", path.display()))?
    } else {
        debug!(path = %path.display(), "Reading article as markdown");
        ExtractedContent {
            title: derive_title(&raw, path),
            url: file_url(path)?,
            markdown: raw,
            ..ExtractedContent::default()
        }
    };

    if let Some(title) = overrides.title {
        content.title = title;
    }
    if let Some(url) = overrides.url {
        content.url = url;
    }
    if overrides.author.is_some() {
        content.author = overrides.author;
    }
    if overrides.site_name.is_some() {
        content.site_name = overrides.site_name;
    }

    info!(
        title = %content.title,
        url = %content.url,
        markdown_bytes = content.markdown.len(),
        "Loaded article"
    );
    Ok(content)
}

/// First level-1 heading, else the file stem.
fn derive_title(markdown: &str, path: &Path) -> String {
    segment(markdown)
        .into_iter()
        .find_map(|block| match block {
            Block::Heading {
                level: HeadingLevel::H1,
                text,
            } => Some(text),
            _ => None,
        })
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled".to_string())
        })
}

/// Percent-encoded `file://` URL of the canonical input path.
fn file_url(path: &Path) -> Result<String> {
    let absolute = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let url = Url::from_file_path(&absolute)
        .map_err(|()| anyhow::anyhow!("Cannot express {} as a file URL", absolute.display()))?;
    Ok(url.into())
}
