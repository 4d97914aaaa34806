//! Plain-text excerpts
//!
//! Listing views fall back to a pruned excerpt of the body when a post
//! declares no description. Markdown structure is dropped by walking the
//! pulldown event stream and keeping only prose text; fenced code blocks are
//! skipped so an excerpt never opens mid-snippet.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract a plain-text excerpt of at most `limit` characters, cut at a word
/// boundary with a trailing ellipsis when the body is longer.
pub fn excerpt(markdown: &str, limit: usize) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) if !in_code_block => text.push_str(&t),
            Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => text.push(' '),
            _ => {}
        }

        // The prune only ever shortens, so stop once we have enough
        if text.chars().count() > limit + 1 {
            break;
        }
    }

    prune(&text, limit)
}

/// Cut `text` to at most `limit` characters at the last word boundary
fn prune(text: &str, limit: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= limit {
        return text;
    }

    let cut: String = text.chars().take(limit).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) => &cut[..pos],
        None => cut.as_str(),
    };
    format!("{}…", cut.trim_end_matches(['.', ',', ';', ':']))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
