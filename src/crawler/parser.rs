//! Field extraction from a result page
//!
//! This module turns one page body into a list of item field maps:
//! - Every element matching the container selector is an item block
//! - Every leaf selector is resolved against the first matching descendant of
//!   the block
//!
//! Extraction is pure: the same HTML and selector tree always give the same
//! items in the same order.

use crate::selector::{SelectorSpec, SelectorTree};
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;

/// Resolved leaf values of one item block, keyed by field name
pub type ExtractedFields = BTreeMap<String, Option<String>>;

/// Items extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// One entry per container match, in document order
    pub items: Vec<ExtractedFields>,
}

impl ParsedPage {
    /// Number of container matches on the page
    pub fn container_count(&self) -> usize {
        self.items.len()
    }
}

/// Parses a page body and extracts every item block
///
/// # Example
///
/// ```
/// use price_scout::crawler::parse_page;
/// use price_scout::selector::{SelectorSpec, SelectorTree};
///
/// let tree = SelectorTree::new(SelectorSpec::new("li").with_attr("class", "item"))
///     .with_field("price", SelectorSpec::new("b"));
/// let html = r#"<ul><li class="item"><b> $5 </b></li><li class="item"></li></ul>"#;
///
/// let page = parse_page(html, &tree);
/// assert_eq!(page.container_count(), 2);
/// assert_eq!(page.items[0]["price"], Some("$5".to_string()));
/// assert_eq!(page.items[1]["price"], None);
/// ```
pub fn parse_page(html: &str, tree: &SelectorTree) -> ParsedPage {
    let document = Html::parse_document(html);

    let items = find_containers(&document, &tree.container)
        .into_iter()
        .map(|container| extract_container(container, tree))
        .collect();

    ParsedPage { items }
}

/// Finds every element in the document matching the container selector
pub fn find_containers<'a>(document: &'a Html, selector: &SelectorSpec) -> Vec<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| selector.matches(element.value()))
        .collect()
}

/// Resolves every leaf field of the tree inside one item block
pub fn extract_container(container: ElementRef<'_>, tree: &SelectorTree) -> ExtractedFields {
    tree.fields
        .iter()
        .map(|(name, spec)| (name.clone(), resolve_field(container, Some(spec))))
        .collect()
}

/// Resolves one leaf selector inside a parent element
///
/// Returns `None` if no selector is configured or no descendant matches.
/// Otherwise returns the text of the first matching descendant.
pub fn resolve_field(parent: ElementRef<'_>, selector: Option<&SelectorSpec>) -> Option<String> {
    let selector = selector?;

    parent
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| selector.matches(element.value()))
        .map(stripped_text)
}

/// Concatenates the element's text nodes, each trimmed, skipping blank ones
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
