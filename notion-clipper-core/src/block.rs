//! Block and run data model shared by the segmenter, the annotator and the payload assembler.
//!
//! Both [`Block`] and [`RunStyle`] are closed enums: every variant carries exactly the
//! fields its kind needs, so the assembler can `match` exhaustively.

use serde::Serialize;

/// Maximum number of child blocks the Notion API accepts in one page creation request.
pub const MAX_BLOCKS: usize = 100;

/// Maximum length of a single rich text `content` value, in UTF-16 code units.
pub const MAX_TEXT_CHARS: usize = 2000;

/// Language tag attached to every code block. Source language detection is not attempted.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Markdown prefix (hashes plus one space) that introduces this level.
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "# ",
            HeadingLevel::H2 => "## ",
            HeadingLevel::H3 => "### ",
        }
    }
}

/// One structural unit of the destination document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Paragraph { text: String },
    BulletedItem { text: String },
    NumberedItem { text: String },
    Code { text: String, language: String },
    Image { url: String, alt: String },
}

/// Flat discriminant of [`Block`], useful for assertions and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    BulletedItem,
    NumberedItem,
    Code,
    Image,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { level, .. } => match level {
                HeadingLevel::H1 => BlockKind::Heading1,
                HeadingLevel::H2 => BlockKind::Heading2,
                HeadingLevel::H3 => BlockKind::Heading3,
            },
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::BulletedItem { .. } => BlockKind::BulletedItem,
            Block::NumberedItem { .. } => BlockKind::NumberedItem,
            Block::Code { .. } => BlockKind::Code,
            Block::Image { .. } => BlockKind::Image,
        }
    }

    /// Raw textual payload of the block. `None` for images.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::BulletedItem { text }
            | Block::NumberedItem { text }
            | Block::Code { text, .. } => Some(text),
            Block::Image { .. } => None,
        }
    }
}

/// Inline style of a [`Run`]. The link target lives inside the `Link` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum RunStyle {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: String },
}

/// A contiguous span of inline-styled text within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub content: String,
    #[serde(flatten)]
    pub style: RunStyle,
}

impl Run {
    pub fn plain(content: impl Into<String>) -> Self {
        Run {
            content: content.into(),
            style: RunStyle::Plain,
        }
    }

    pub fn styled(content: impl Into<String>, style: RunStyle) -> Self {
        Run {
            content: content.into(),
            style,
        }
    }
}

/// Longest prefix of `text` spanning at most `max` UTF-16 code units, cut on a char boundary.
///
/// The API measures text length the way JavaScript does, so a character outside the
/// BMP costs two units. A surrogate pair is never split.
pub fn truncate_utf16(text: &str, max: usize) -> &str {
    let mut units = 0;
    for (byte_idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max {
            return &text[..byte_idx];
        }
    }
    text
}
