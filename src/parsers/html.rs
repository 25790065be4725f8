use crate::parsers::{ParseResult, text};
use scraper::{ElementRef, Html, Node};

/// Elements whose contents are never rendered as page text
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Parses an HTML document into normalized visible text and anchor targets
///
/// html5ever recovers from any malformed input, so this never fails: broken
/// fragments either end up as text nodes or are dropped.
pub fn parse(html: &str) -> ParseResult {
    let doc = Html::parse_document(html);

    let mut fragments: Vec<&str> = Vec::new();
    let mut links = Vec::new();

    for node in doc.tree.root().descendants() {
        match node.value() {
            Node::Text(t) => {
                let hidden = node.ancestors().any(|ancestor| {
                    matches!(
                        ancestor.value(),
                        Node::Element(e) if HIDDEN_ELEMENTS.contains(&e.name())
                    )
                });
                if !hidden {
                    fragments.push(&**t);
                }
            }
            Node::Element(e) if e.name() == "a" => {
                if let Some(href) = e.attr("href") {
                    links.push(href.to_string());
                }
            }
            Node::Element(e) if e.name() == "noscript" => {
                if let Some(element) = ElementRef::wrap(node) {
                    links.extend(noscript_links(element));
                }
            }
            _ => {}
        }
    }

    let content = text::normalize(&fragments.join(" "));

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    ParseResult::new(content, links)
}

/// Anchor targets inside a `<noscript>` block
///
/// With scripting enabled html5ever keeps the block's markup as raw text, so
/// it is parsed again on its own.
fn noscript_links(noscript: ElementRef<'_>) -> Vec<String> {
    let markup: String = noscript
        .children()
        .filter_map(|child| child.value().as_text().map(|t| &**t))
        .collect();
    if markup.trim().is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(&markup);
    let links: Vec<String> = fragment
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Element(e) if e.name() == "a" => e.attr("href").map(str::to_string),
            _ => None,
        })
        .collect();

    ::log::trace!("Found {} links inside <noscript>", links.len());
    links
}
