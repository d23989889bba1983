//! Block segmentation: split a flat markdown document into typed [`Block`]s.
//!
//! The grammar is small. Each non-blank line is classified by prefix, in this
//! priority order:
//!
//! 1. `# `, `## `, `### ` headings
//! 2. fenced code (```` ``` ````), collected verbatim until the closing fence or end of input
//! 3. `- ` / `* ` bulleted items
//! 4. `<digits>. ` numbered items
//! 5. `![alt](url)` images
//! 6. anything else is a paragraph
//!
//! Segmentation stops once [`MAX_BLOCKS`] blocks exist; the rest of the input is dropped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::block::{Block, HeadingLevel, DEFAULT_CODE_LANGUAGE, MAX_BLOCKS};

const FENCE: &str = "```";

static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("numbered marker pattern is valid"));

static IMAGE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image reference pattern is valid")
});

/// Split `markdown` into at most [`MAX_BLOCKS`] blocks, preserving source order.
pub fn segment(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut lines = markdown.lines();

    while blocks.len() < MAX_BLOCKS {
        let Some(raw) = lines.next() else {
            return blocks;
        };
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(FENCE) {
            // Interior lines are kept verbatim, untrimmed. An unclosed fence runs to the end.
            let mut code_lines = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim().starts_with(FENCE) {
                    break;
                }
                code_lines.push(inner);
            }
            blocks.push(Block::Code {
                text: code_lines.join("\n"),
                language: DEFAULT_CODE_LANGUAGE.to_string(),
            });
            continue;
        }

        blocks.push(classify_line(line));
    }

    if lines.any(|l| !l.trim().is_empty()) {
        debug!(
            max_blocks = MAX_BLOCKS,
            "[CONVERT] Block cap reached, discarding remaining markdown"
        );
    }
    blocks
}

/// Classify a trimmed, non-blank, non-fence line.
fn classify_line(line: &str) -> Block {
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        if let Some(text) = line.strip_prefix(level.marker()) {
            return Block::Heading {
                level,
                text: text.to_string(),
            };
        }
    }

    if let Some(text) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        return Block::BulletedItem {
            text: text.to_string(),
        };
    }

    if let Some(marker) = NUMBERED_MARKER.find(line) {
        return Block::NumberedItem {
            text: line[marker.end()..].to_string(),
        };
    }

    if let Some(caps) = IMAGE_REFERENCE.captures(line) {
        return Block::Image {
            url: caps[2].to_string(),
            alt: caps[1].to_string(),
        };
    }

    Block::Paragraph {
        text: line.to_string(),
    }
}
