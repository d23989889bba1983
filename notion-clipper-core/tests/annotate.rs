use notion_clipper_core::annotate;
use notion_clipper_core::block::{Run, RunStyle, MAX_TEXT_CHARS};

fn styles(runs: &[Run]) -> Vec<RunStyle> {
    runs.iter().map(|r| r.style.clone()).collect()
}

fn contents(runs: &[Run]) -> Vec<&str> {
    runs.iter().map(|r| r.content.as_str()).collect()
}

fn joined(runs: &[Run]) -> String {
    runs.iter().map(|r| r.content.as_str()).collect()
}

#[test]
fn mixed_emphasis_in_source_order() {
    let runs = annotate("**bold** and _italic_ and `code`");
    assert_eq!(
        styles(&runs),
        vec![
            RunStyle::Bold,
            RunStyle::Plain,
            RunStyle::Italic,
            RunStyle::Plain,
            RunStyle::Code
        ]
    );
    assert_eq!(
        contents(&runs),
        vec!["bold", " and ", "italic", " and ", "code"]
    );
}

#[test]
fn lone_link_is_a_single_link_run() {
    let runs = annotate("[label](http://x)");
    assert_eq!(
        runs,
        vec![Run::styled(
            "label",
            RunStyle::Link {
                url: "http://x".into()
            }
        )]
    );
}

#[test]
fn text_without_markup_is_one_plain_run() {
    assert_eq!(annotate("nothing special"), vec![Run::plain("nothing special")]);
    assert_eq!(annotate(""), vec![Run::plain("")]);
}

#[test]
fn leading_and_trailing_plain_text_is_kept() {
    let runs = annotate("see [docs](https://docs.rs) for more");
    assert_eq!(contents(&runs), vec!["see ", "docs", " for more"]);
    assert_eq!(runs[0].style, RunStyle::Plain);
    assert_eq!(
        runs[1].style,
        RunStyle::Link {
            url: "https://docs.rs".into()
        }
    );
    assert_eq!(runs[2].style, RunStyle::Plain);
}

#[test]
fn overlapping_spans_keep_the_first_and_drop_the_rest() {
    // Inline code containing bold markup: only the code span survives.
    let runs = annotate("`**x**`");
    assert_eq!(runs, vec![Run::styled("**x**", RunStyle::Code)]);

    // Bold text wrapping a link: the bold span starts first and wins.
    let runs = annotate("**[a](http://b)** tail");
    assert_eq!(
        runs,
        vec![
            Run::styled("[a](http://b)", RunStyle::Bold),
            Run::plain(" tail")
        ]
    );
}

#[test]
fn link_text_with_underscores_is_not_double_counted() {
    let runs = annotate("[snake_case_name](http://x/a_b) done");
    assert_eq!(contents(&runs), vec!["snake_case_name", " done"]);
    assert_eq!(joined(&runs), "snake_case_name done");
}

#[test]
fn unmatched_delimiters_stay_plain() {
    let runs = annotate("a ** b _ c ` d");
    assert_eq!(runs, vec![Run::plain("a ** b _ c ` d")]);
}

#[test]
fn concatenated_runs_reproduce_text_without_delimiters() {
    let cases = [
        ("plain **bold** plain", "plain bold plain"),
        ("_it_ and `c` and [l](u)", "it and c and l"),
        ("x**y**z_w_", "xyzw"),
        ("`a` `b`", "a b"),
    ];
    for (input, expected) in cases {
        assert_eq!(joined(&annotate(input)), expected, "input: {input}");
    }
}

#[test]
fn long_text_is_truncated_to_the_character_cap() {
    let text = "a".repeat(MAX_TEXT_CHARS + 500);
    let runs = annotate(&text);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].content.chars().count(), MAX_TEXT_CHARS);
}

#[test]
fn truncation_happens_before_span_extraction() {
    // The bold span straddles the cut, so it is never detected.
    let mut text = "a".repeat(MAX_TEXT_CHARS - 3);
    text.push_str("**bold**");
    let runs = annotate(&text);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].style, RunStyle::Plain);
    assert!(runs[0].content.ends_with("a**b"));
    assert_eq!(runs[0].content.chars().count(), MAX_TEXT_CHARS);
}

#[test]
fn multibyte_text_is_cut_on_characters() {
    let text = "é".repeat(MAX_TEXT_CHARS + 1);
    let runs = annotate(&text);
    assert_eq!(joined(&runs).chars().count(), MAX_TEXT_CHARS);
}

#[test]
fn astral_characters_count_double_against_the_cap() {
    let text = format!("**\u{1F600}**{}", "\u{1F600}".repeat(MAX_TEXT_CHARS));
    let runs = annotate(&text);
    assert_eq!(runs[0].style, RunStyle::Bold);
    assert_eq!(runs[0].content, "\u{1F600}");
    assert_eq!(joined(&runs).encode_utf16().count(), MAX_TEXT_CHARS - 4);
}
