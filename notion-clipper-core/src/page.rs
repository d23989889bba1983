//! Page creation request: database parent, article properties and converted child blocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::{markdown_to_blocks, NotionBlock, RichText};

/// Article produced by the external extraction and HTML-to-markdown collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub title: String,
    /// Readability-reduced HTML. Carried along but not used for conversion.
    #[serde(default)]
    pub content: String,
    pub markdown: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: PageProperties,
    pub children: Vec<NotionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parent {
    pub database_id: String,
}

/// Database properties written for every saved article. The target database is expected
/// to define `Title`, `URL`, `Saved Date`, `Author` and `Site Name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageProperties {
    #[serde(rename = "Title")]
    pub title: TitleProperty,
    #[serde(rename = "URL")]
    pub url: UrlProperty,
    #[serde(rename = "Saved Date")]
    pub saved_date: DateProperty,
    #[serde(rename = "Author", skip_serializing_if = "Option::is_none")]
    pub author: Option<RichTextProperty>,
    #[serde(rename = "Site Name", skip_serializing_if = "Option::is_none")]
    pub site_name: Option<RichTextProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlProperty {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateProperty {
    pub date: DateValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

fn optional_text(value: Option<&str>) -> Option<RichTextProperty> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| RichTextProperty {
            rich_text: vec![RichText::plain(v)],
        })
}

/// Build the page creation request for `content`, converting its markdown into blocks.
pub fn build_page_request(
    content: &ExtractedContent,
    database_id: &str,
    saved_at: DateTime<Utc>,
) -> CreatePageRequest {
    CreatePageRequest {
        parent: Parent {
            database_id: database_id.to_string(),
        },
        properties: PageProperties {
            title: TitleProperty {
                title: vec![RichText::plain(&content.title)],
            },
            url: UrlProperty {
                url: content.url.clone(),
            },
            saved_date: DateProperty {
                date: DateValue {
                    start: saved_at.to_rfc3339(),
                },
            },
            author: optional_text(content.author.as_deref()),
            site_name: optional_text(content.site_name.as_deref()),
        },
        children: markdown_to_blocks(&content.markdown),
    }
}
