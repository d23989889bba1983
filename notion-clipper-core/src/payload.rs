//! Payload assembly: map [`Block`]s and their [`Run`]s onto the Notion block JSON shape.
//!
//! This is a plain tagged-variant dispatch; there is no registration or builder state.
//! Every function here is total.

use serde::Serialize;
use tracing::debug;

use crate::annotate::annotate;
use crate::block::{truncate_utf16, Block, HeadingLevel, Run, RunStyle, MAX_TEXT_CHARS};
use crate::segment::segment;

/// A child block in a page creation request: `{"object":"block","type":...,<type>:{...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotionBlock {
    pub object: &'static str,
    #[serde(flatten)]
    pub body: BlockBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum BlockBody {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextBody },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextBody },
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: TextBody },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: TextBody },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: TextBody },
    #[serde(rename = "code")]
    Code { code: CodeBody },
    #[serde(rename = "image")]
    Image { image: ImageBody },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBody {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBody {
    pub rich_text: Vec<RichText>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub external: ExternalFile,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalFile {
    pub url: String,
}

/// One entry of a Notion rich text array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
}

/// Only the active flag is serialized; the API treats absent flags as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
}

impl RichText {
    /// Unstyled text, truncated to the per-run character limit.
    pub fn plain(content: &str) -> Self {
        RichText::from_run(&Run::plain(truncate_utf16(content, MAX_TEXT_CHARS)))
    }

    pub fn from_run(run: &Run) -> Self {
        let (link, annotations) = match &run.style {
            RunStyle::Plain => (None, None),
            RunStyle::Link { url } => (Some(Link { url: url.clone() }), None),
            RunStyle::Bold => (
                None,
                Some(Annotations {
                    bold: Some(true),
                    ..Annotations::default()
                }),
            ),
            RunStyle::Italic => (
                None,
                Some(Annotations {
                    italic: Some(true),
                    ..Annotations::default()
                }),
            ),
            RunStyle::Code => (
                None,
                Some(Annotations {
                    code: Some(true),
                    ..Annotations::default()
                }),
            ),
        };
        RichText {
            kind: "text",
            text: TextContent {
                content: run.content.clone(),
                link,
            },
            annotations,
        }
    }
}

pub fn rich_text(runs: &[Run]) -> Vec<RichText> {
    runs.iter().map(RichText::from_run).collect()
}

/// Runs to render for `block`.
///
/// Code is never annotated: it becomes a single plain run of the verbatim text, truncated.
/// Images yield the annotated alt text (used as caption), or nothing when the alt is empty.
pub fn runs_for(block: &Block) -> Vec<Run> {
    match block {
        Block::Code { text, .. } => vec![Run::plain(truncate_utf16(text, MAX_TEXT_CHARS))],
        Block::Image { alt, .. } if alt.is_empty() => Vec::new(),
        Block::Image { alt, .. } => annotate(alt),
        Block::Heading { text, .. }
        | Block::Paragraph { text }
        | Block::BulletedItem { text }
        | Block::NumberedItem { text } => annotate(text),
    }
}

/// Map one block and its runs to the destination JSON shape.
pub fn assemble(block: &Block, runs: &[Run]) -> NotionBlock {
    let text_body = || TextBody {
        rich_text: rich_text(runs),
    };
    let body = match block {
        Block::Heading { level, .. } => match level {
            HeadingLevel::H1 => BlockBody::Heading1 {
                heading_1: text_body(),
            },
            HeadingLevel::H2 => BlockBody::Heading2 {
                heading_2: text_body(),
            },
            HeadingLevel::H3 => BlockBody::Heading3 {
                heading_3: text_body(),
            },
        },
        Block::Paragraph { .. } => BlockBody::Paragraph {
            paragraph: text_body(),
        },
        Block::BulletedItem { .. } => BlockBody::BulletedListItem {
            bulleted_list_item: text_body(),
        },
        Block::NumberedItem { .. } => BlockBody::NumberedListItem {
            numbered_list_item: text_body(),
        },
        Block::Code { language, .. } => BlockBody::Code {
            code: CodeBody {
                rich_text: rich_text(runs),
                language: language.clone(),
            },
        },
        Block::Image { url, .. } => BlockBody::Image {
            image: ImageBody {
                kind: "external",
                external: ExternalFile { url: url.clone() },
                caption: rich_text(runs),
            },
        },
    };
    NotionBlock {
        object: "block",
        body,
    }
}

/// Full conversion: segment, annotate every block, assemble.
pub fn markdown_to_blocks(markdown: &str) -> Vec<NotionBlock> {
    let blocks = segment(markdown);
    let assembled: Vec<NotionBlock> = blocks
        .iter()
        .map(|block| assemble(block, &runs_for(block)))
        .collect();
    debug!(
        input_bytes = markdown.len(),
        blocks = assembled.len(),
        "[CONVERT] Converted markdown to Notion blocks"
    );
    assembled
}
