use crate::selectors::{BODY_SELECTOR, H1_SELECTOR, TITLE_SELECTOR};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text is never part of the visible page.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Headline text of an HTML document.
pub(super) fn headline(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in [&*TITLE_SELECTOR, &*H1_SELECTOR, &*BODY_SELECTOR] {
        if let Some(text) = first_text(&document, selector) {
            return text;
        }
    }

    String::new()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Visible text under `element`, one space between text nodes.
fn element_text(element: ElementRef<'_>) -> String {
    let parts: Vec<&str> = element
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) if !node.ancestors().any(|a| is_hidden(a.value())) => {
                Some(&**text)
            }
            _ => None,
        })
        .collect();
    collapse_whitespace(&parts.join(" "))
}

fn is_hidden(node: &Node) -> bool {
    node.as_element()
        .map_or(false, |el| HIDDEN_ELEMENTS.contains(&el.name()))
}

pub(super) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
