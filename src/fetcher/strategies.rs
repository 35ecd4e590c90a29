//! # Content Extraction Strategies
//!
//! Extraction of article text from fetched HTML. Strategies form an ordered
//! list of `(name, extract_fn)` pairs tried until one returns non-empty
//! text:
//!
//! 1. `document-text`: the whole document body minus boilerplate elements
//!    (navigation, headers, footers, scripts, and the like)
//! 2. `article-text`: article-specific heuristics, taking the contents of an
//!    `<article>` element or all `<p>` elements joined together
//!
//! Extracted text is normalized so that paragraphs are separated by blank
//! lines, which the chunker later uses as its highest-priority boundary.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use super::error::FetchError;

/// Elements whose subtrees never contribute article text.
const EXCLUDED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe",
];

/// Elements treated as block-level when reassembling text.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "blockquote", "table", "tr", "h1",
    "h2", "h3", "h4", "h5", "h6", "br",
];

type ExtractFn = fn(&Html) -> Option<String>;

/// Extraction strategies in the order they are tried.
const STRATEGIES: &[(&str, ExtractFn)] = &[
    ("document-text", extract_document_text),
    ("article-text", extract_article_text),
];

/// Run the strategy chain over an HTML page.
///
/// Returns the extracted text and the name of the strategy that produced it.
pub(crate) fn extract_content(html: &str) -> Result<(String, &'static str), FetchError> {
    let document = Html::parse_document(html);
    for &(name, extract) in STRATEGIES {
        if let Some(text) = extract(&document) {
            debug!(strategy = name, "extracted {} characters", text.chars().count());
            return Ok((text, name));
        }
    }
    Err(FetchError::Extraction(
        "no extraction strategy produced any text".to_string(),
    ))
}

/// Extract the page title, if the document has a non-empty one.
pub(crate) fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title = document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())?;
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Whole-body text with boilerplate subtrees removed.
fn extract_document_text(document: &Html) -> Option<String> {
    let selector = Selector::parse("body").ok()?;
    let body = document.select(&selector).next()?;
    let mut raw = String::new();
    push_element_text(body, &mut raw);
    normalize(&raw)
}

/// Article-specific extraction: `<article>` contents, else joined `<p>` tags.
fn extract_article_text(document: &Html) -> Option<String> {
    let article_selector = Selector::parse("article").ok()?;
    if let Some(article) = document.select(&article_selector).next() {
        let mut raw = String::new();
        push_element_text(article, &mut raw);
        if let Some(text) = normalize(&raw) {
            return Some(text);
        }
    }

    let paragraph_selector = Selector::parse("p").ok()?;
    let joined = document
        .select(&paragraph_selector)
        .map(|p| p.text().collect::<String>())
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    normalize(&joined)
}

/// Collect the text of an element, skipping excluded subtrees and inserting
/// line breaks around block-level elements.
fn push_element_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) => {
                if EXCLUDED_ELEMENTS.contains(&e.name()) {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&e.name());
                if block {
                    out.push('\n');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_element_text(child_element, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of whitespace and rebuild paragraphs separated by blank
/// lines. Returns `None` when nothing but whitespace remains.
fn normalize(raw: &str) -> Option<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in raw.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current = Vec::new();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    (!paragraphs.is_empty()).then(|| paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_text_skips_boilerplate() {
        let html = r#"<html><head><title>T</title></head><body>
            <nav>Site navigation</nav>
            <p>The actual story text.</p>
            <script>var tracking = 1;</script>
            <footer>Copyright</footer>
        </body></html>"#;

        let (text, strategy) = extract_content(html).unwrap();

        assert_eq!(strategy, "document-text");
        assert!(text.contains("The actual story text."));
        assert!(!text.contains("Site navigation"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_paragraphs_are_blank_line_separated() {
        let html = "<html><body><p>First paragraph.</p><p>Second paragraph.</p></body></html>";

        let (text, _) = extract_content(html).unwrap();

        assert_eq!(text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_falls_back_to_article_text() {
        // Everything sits inside excluded elements, so the document strategy
        // comes up empty; the paragraph heuristic still finds the text.
        let html = "<html><body><nav><p>Buried story text.</p></nav></body></html>";

        let (text, strategy) = extract_content(html).unwrap();

        assert_eq!(strategy, "article-text");
        assert!(text.contains("Buried story text."));
    }

    #[test]
    fn test_article_element_wins_over_loose_paragraphs() {
        let html = "<html><body><nav><article><p>In the article.</p></article>\
                    <p>Elsewhere.</p></nav></body></html>";

        let document = Html::parse_document(html);
        let text = extract_article_text(&document).unwrap();

        assert!(text.contains("In the article."));
        assert!(!text.contains("Elsewhere."));
    }

    #[test]
    fn test_no_content_anywhere_is_an_error() {
        let html = "<html><body><script>only();</script></body></html>";

        assert!(matches!(
            extract_content(html),
            Err(FetchError::Extraction(_))
        ));
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title> A Headline </title></head><body><p>x</p></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("A Headline"));

        let html = "<html><head><title>  </title></head><body><p>x</p></body></html>";
        assert_eq!(extract_title(html), None);
    }
}
