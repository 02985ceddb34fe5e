//! Case-insensitive query highlighting for menu rows.

use ratatui::style::Style;
use ratatui::text::Span;

/// Byte range of the first case-insensitive occurrence of `needle` in `text`.
#[must_use]
pub fn find_ignore_case(text: &str, needle: &str) -> Option<(usize, usize)> {
    let needle = needle.trim();
    if needle.is_empty() {
        return None;
    }
    text.char_indices().find_map(|(start, _)| {
        let mut haystack = text[start..].char_indices();
        for expected in needle.chars() {
            let (_, actual) = haystack.next()?;
            if !actual.to_lowercase().eq(expected.to_lowercase()) {
                return None;
            }
        }
        let end = haystack.next().map_or(text.len(), |(offset, _)| start + offset);
        Some((start, end))
    })
}

/// Split `text` into spans, styling the matched part of the query.
#[must_use]
pub fn highlight_spans<'a>(text: &'a str, query: &str, base: Style, highlight: Style) -> Vec<Span<'a>> {
    match find_ignore_case(text, query) {
        Some((start, end)) => [
            Span::styled(&text[..start], base),
            Span::styled(&text[start..end], base.patch(highlight)),
            Span::styled(&text[end..], base),
        ]
        .into_iter()
        .filter(|span| !span.content.is_empty())
        .collect(),
        None => vec![Span::styled(text, base)],
    }
}
