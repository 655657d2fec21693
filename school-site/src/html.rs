//! Small HTML helpers shared by the page parsers.

use scraper::{Html, Node, Selector};

use crate::error::SiteError;

/// Elements whose text is never rendered.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

/// Compile a CSS selector.
pub(crate) fn css(selector: &'static str) -> Result<Selector, SiteError> {
    Selector::parse(selector).map_err(|e| SiteError::Selector {
        css: selector,
        reason: e.to_string(),
    })
}

/// Visible text of a document: every text node outside script/style blocks,
/// trimmed, empty ones dropped, joined with a single space.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|el| HIDDEN.contains(&el.name()))
                });
                (!hidden).then(|| text.trim())
            }
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
