//! Text helpers over `scraper` element nodes.

use scraper::ElementRef;

/// Element text with runs of whitespace collapsed to single spaces and the
/// ends trimmed. Empty when the element holds no visible text.
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Element text exactly as it appears in the source. Code blocks must keep
/// their internal whitespace.
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn first<'a>(document: &'a Html, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).expect("parse selector");
        document.select(&selector).next().expect("element present")
    }

    #[test]
    fn collapsed_text_joins_nested_fragments() {
        let document = Html::parse_fragment("<p><strong>Last updated</strong> on  Jan\n1</p>");
        assert_eq!(collapsed_text(first(&document, "p")), "Last updated on Jan 1");
    }

    #[test]
    fn collapsed_text_is_empty_for_whitespace_only() {
        let document = Html::parse_fragment("<p>  \n\t </p>");
        assert_eq!(collapsed_text(first(&document, "p")), "");
    }

    #[test]
    fn raw_text_preserves_internal_whitespace() {
        let document = Html::parse_fragment("<pre>  indented\n    more</pre>");
        assert_eq!(raw_text(first(&document, "pre")), "  indented\n    more");
    }
}
