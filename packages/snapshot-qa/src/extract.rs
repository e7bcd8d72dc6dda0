//! HTML to plain text extraction.

use scraper::{Html, Node};

/// Elements whose content never counts as readable text.
const STRIP_TAGS: &[&str] = &["style", "script", "meta", "link", "noscript"];

/// Extract readable text from an HTML document.
///
/// Drops `style`, `script`, `meta`, `link` and `noscript` subtrees, collects
/// the remaining text nodes in document order, then collapses every run of
/// blank lines to a single line break. Malformed markup is parsed
/// best-effort and never errors.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for node in document.root_element().descendants() {
        if let Node::Text(chunk) = node.value() {
            let stripped = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(el) if STRIP_TAGS.contains(&el.name()))
            });
            if !stripped {
                text.push_str(chunk);
            }
        }
    }

    collapse_blank_lines(&text)
}

/// Collapse `\n\n` into `\n`, repeatedly, until no double line break remains.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("\n\n") {
        out = out.replace("\n\n", "\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_content() {
        let html = "<html><script>x()</script><body>A\n\n\nB</body></html>";
        let text = extract_text(html);

        assert!(!text.contains("x()"));
        assert!(text.contains("A\nB"));
    }

    #[test]
    fn test_strips_all_non_content_tags() {
        let html = r#"<html><head>
            <style>.a { color: red }</style>
            <meta name="x" content="meta-text">
            <link rel="stylesheet" href="a.css">
        </head><body>
            <noscript>enable javascript</noscript>
            <p>visible</p>
        </body></html>"#;

        let text = extract_text(html);

        assert!(text.contains("visible"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("enable javascript"));
    }

    #[test]
    fn test_collapses_blank_line_runs() {
        assert_eq!(collapse_blank_lines("A\n\nB"), "A\nB");
        assert_eq!(collapse_blank_lines("A\n\n\n\n\nB"), "A\nB");
        assert_eq!(collapse_blank_lines("A\nB"), "A\nB");
    }

    #[test]
    fn test_malformed_markup_never_panics() {
        let text = extract_text("<div><p>unclosed <b>bold <span>text");
        assert!(text.contains("unclosed"));
        assert!(text.contains("text"));

        assert_eq!(extract_text(""), "");
        extract_text("<<<>>>");
    }

    #[test]
    fn test_nested_script_inside_body() {
        let html = "<body>before<div><script>var x = 1;</script></div>after</body>";
        let text = extract_text(html);

        assert!(text.contains("before"));
        assert!(text.contains("after"));
        assert!(!text.contains("var x"));
    }
}
