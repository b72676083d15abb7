//! Tree navigation helpers shared by the extractors
//!
//! Thin wrappers over `scraper` for the lookups the protocol page needs:
//! first descendant by selector, text-node labels and fixed-depth ancestors.

use scraper::{CaseSensitivity, ElementRef, Html, Selector};

use crate::error::{ProtocolError, Result};

/// Compile a CSS selector, surfacing parse failures as `ProtocolError::Selector`
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ProtocolError::Selector(format!("{}: {}", css, e)))
}

/// First descendant of `element` matching `css`
pub fn find<'a>(element: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(element.select(&sel).next())
}

/// First element of the document matching `css`
pub fn find_in<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).next())
}

/// Concatenated text of the element, trimmed
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Concatenated text of the element, untouched
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element
        .value()
        .has_class(class, CaseSensitivity::CaseSensitive)
}

/// Element holding the first text node whose trimmed content equals `label`
pub fn find_text_parent<'a>(root: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter(|node| node.value().as_text().is_some_and(|t| t.trim() == label))
        .find_map(|node| node.parent().and_then(ElementRef::wrap))
}

/// Whether any text node of the document reads exactly `label`
pub fn contains_text(document: &Html, label: &str) -> bool {
    find_text_parent(document.root_element(), label).is_some()
}

/// Walk up `levels` parents; `None` once the chain leaves the element tree
pub fn ancestor(element: ElementRef<'_>, levels: usize) -> Option<ElementRef<'_>> {
    let mut current = element;
    for _ in 0..levels {
        current = current.parent().and_then(ElementRef::wrap)?;
    }
    Some(current)
}

/// Ancestor `depth` levels above the text node labelled `label`.
///
/// Depth counts from the text node itself, so a depth of one is the element
/// directly wrapping the label.
pub fn heading_ancestor<'a>(
    root: ElementRef<'a>,
    label: &str,
    depth: usize,
) -> Option<ElementRef<'a>> {
    let holder = find_text_parent(root, label)?;
    ancestor(holder, depth.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_ancestor() {
        let html = r#"
        <section id="outer">
            <div id="middle">
                <h2><span>Heading</span></h2>
            </div>
            <ul class="target"><li>x</li></ul>
        </section>
        "#;
        let document = Html::parse_document(html);
        let root = document.root_element();

        let holder = find_text_parent(root, "Heading").unwrap();
        assert_eq!(holder.value().name(), "span");

        let third = heading_ancestor(root, "Heading", 3).unwrap();
        assert_eq!(third.value().attr("id"), Some("middle"));

        let fourth = heading_ancestor(root, "Heading", 4).unwrap();
        assert!(find(fourth, "ul.target").unwrap().is_some());

        assert!(heading_ancestor(root, "Missing", 1).is_none());
        assert!(heading_ancestor(root, "Heading", 50).is_none());
    }

    #[test]
    fn test_text_helpers() {
        let html = r#"<p class="a b"> Hello <small>(K)</small> </p>"#;
        let document = Html::parse_document(html);
        let p = find_in(&document, "p").unwrap().unwrap();

        assert!(has_class(p, "b"));
        assert!(!has_class(p, "c"));
        assert_eq!(text(p), "Hello (K)");
        assert_eq!(raw_text(p), " Hello (K) ");
        assert!(contains_text(&document, "(K)"));
        assert!(!contains_text(&document, "Hello (K)"));
    }

    #[test]
    fn test_bad_selector() {
        assert!(matches!(selector("li[["), Err(ProtocolError::Selector(_))));
    }
}
