//! Inline annotation: turn a block's raw text into styled [`Run`]s.
//!
//! Four pattern families (link, bold, italic, inline code) are matched independently
//! against the same truncated text, so their candidate spans may overlap. Candidates are
//! ordered by start offset (ties keep discovery order: link, bold, italic, code) and any
//! candidate starting before the end of the previously accepted one is dropped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::{truncate_utf16, Run, RunStyle, MAX_TEXT_CHARS};

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+)_").expect("italic pattern is valid"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern is valid"));

/// A detected inline-markup match, before overlap resolution. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    start: usize,
    end: usize,
    content: String,
    style: RunStyle,
}

/// Annotate `text`, truncated to [`MAX_TEXT_CHARS`] first.
///
/// Never returns an empty list: input without markup (including the empty string)
/// yields a single plain run.
pub fn annotate(text: &str) -> Vec<Run> {
    let source = truncate_utf16(text, MAX_TEXT_CHARS);
    let spans = resolve_overlaps(candidates(source));

    if spans.is_empty() {
        return vec![Run::plain(source)];
    }

    let mut runs = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            runs.push(Run::plain(&source[cursor..span.start]));
        }
        runs.push(Run::styled(span.content, span.style));
        cursor = span.end;
    }
    if cursor < source.len() {
        runs.push(Run::plain(&source[cursor..]));
    }
    runs
}

fn candidates(source: &str) -> Vec<Candidate> {
    let families: [(&Regex, fn(&Captures<'_>) -> RunStyle); 4] = [
        (&*LINK, link_style),
        (&*BOLD, |_| RunStyle::Bold),
        (&*ITALIC, |_| RunStyle::Italic),
        (&*INLINE_CODE, |_| RunStyle::Code),
    ];

    let mut found = Vec::new();
    for (pattern, style_of) in families {
        for caps in pattern.captures_iter(source) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            found.push(Candidate {
                start: whole.start(),
                end: whole.end(),
                content: inner.as_str().to_string(),
                style: style_of(&caps),
            });
        }
    }
    found
}

fn link_style(caps: &Captures<'_>) -> RunStyle {
    RunStyle::Link {
        url: caps[2].to_string(),
    }
}

/// Keep the first of any overlapping candidates. `sort_by_key` is stable, which preserves
/// family priority on equal start offsets.
fn resolve_overlaps(mut found: Vec<Candidate>) -> Vec<Candidate> {
    found.sort_by_key(|c| c.start);

    let mut accepted: Vec<Candidate> = Vec::with_capacity(found.len());
    for candidate in found {
        match accepted.last() {
            Some(prev) if candidate.start < prev.end => continue,
            _ => accepted.push(candidate),
        }
    }
    accepted
}
