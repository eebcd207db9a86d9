use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never shows up on the rendered page.
const HIDDEN_TEXT_PARENTS: [&str; 3] = ["script", "style", "template"];

/// Parsed with scripting enabled, so its children arrive as one raw text node.
const NOSCRIPT: &str = "noscript";

/// 寬鬆解析 HTML；不完整的標記不會造成錯誤
pub fn parse_document(text: &str) -> Html {
    Html::parse_document(text)
}

pub fn parse_fragment(text: &str) -> Html {
    Html::parse_fragment(text)
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::SelectorError {
        selector: css.to_string(),
    })
}

/// `tag.class` 選擇器；class 為空時只比對標籤
pub fn class_selector(tag: &str, class: &str) -> Result<Selector> {
    if class.trim().is_empty() {
        selector(tag)
    } else {
        selector(&format!("{}.{}", tag, class.trim()))
    }
}

/// First matching descendant of `scope`.
pub fn find_first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// 每段文字去除前後空白、丟棄空段後直接串接
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Stripped text of the whole document, skipping script-like containers.
/// `noscript` content is re-parsed and counted where it appears.
pub fn visible_text(document: &Html) -> String {
    let mut visible = String::new();

    for node in document.root_element().descendants() {
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| e.name() == NOSCRIPT || HIDDEN_TEXT_PARENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }

        match node.value() {
            Node::Text(text) => visible.push_str(text.trim()),
            Node::Element(element) if element.name() == NOSCRIPT => {
                let raw: String = node
                    .children()
                    .filter_map(|child| child.value().as_text().map(|text| &**text))
                    .collect();
                visible.push_str(&visible_text(&parse_fragment(&raw)));
            }
            _ => {}
        }
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripped_text_joins_trimmed_fragments() {
        let doc = parse_fragment("<dd>\n  Oblique aerial <b> view </b>\n</dd>");
        let sel = selector("dd").unwrap();
        let dd = doc.select(&sel).next().unwrap();
        assert_eq!(stripped_text(dd), "Oblique aerialview");
    }

    #[test]
    fn test_class_selector_matches_tag_and_class() {
        let doc = parse_document(
            r#"<div class="a b">one</div><div class="b">two</div><span class="a">three</span>"#,
        );
        let sel = class_selector("div", "a").unwrap();
        let found: Vec<String> = doc.select(&sel).map(stripped_text).collect();
        assert_eq!(found, vec!["one"]);
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let err = class_selector("div", "[[").unwrap_err();
        assert!(matches!(err, ScrapeError::SelectorError { .. }));
    }

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let doc = parse_document(
            r#"<html><head><title> Photo </title><style>p { color: red }</style></head>
            <body><script>var x = 1;</script><p>Aerial</p> <p> view </p></body></html>"#,
        );
        assert_eq!(visible_text(&doc), "PhotoAerialview");
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let doc = parse_document("<div><p>unclosed <b>bold</div><a href='/x'>link");
        let sel = selector("a").unwrap();
        let a = doc.select(&sel).next().unwrap();
        assert_eq!(attr(a, "href"), Some("/x"));
        assert!(visible_text(&doc).contains("bold"));
    }

    #[test]
    fn test_visible_text_includes_noscript_content_in_place() {
        let doc = parse_document(
            "<html><head><title>T</title></head><body><noscript><p>Enable JavaScript</p></noscript><p>Kenwood</p><script>x()</script></body></html>",
        );
        assert_eq!(visible_text(&doc), "TEnable JavaScriptKenwood");
    }

    #[test]
    fn test_script_inside_noscript_stays_hidden() {
        let doc = parse_document(
            "<body><p>a</p><noscript><script>x()</script><b> b </b></noscript><p>c</p></body>",
        );
        assert_eq!(visible_text(&doc), "abc");
    }
}
