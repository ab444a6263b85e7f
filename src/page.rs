//! Parsed-page handle shared by the link and article extractors.
//!
//! A [`Page`] bundles the resolved URL, the raw response body, and the
//! parsed DOM. Extractors borrow it for the duration of one extraction call
//! and never retain it. `scraper::Html` is not `Send`, so a `Page` must not
//! be held across an await point — the crawl driver fetches, extracts
//! synchronously, and drops.

use scraper::{Html, Selector, html::Select};
use url::Url;

/// One fetched, parsed document.
pub struct Page {
    url: Url,
    body: String,
    doc: Html,
}

impl Page {
    /// Build a page from a resolved URL and its HTML body.
    ///
    /// This is also the test seam: fixtures construct pages directly
    /// without going through the fetch collaborator.
    pub fn from_html(url: Url, body: impl Into<String>) -> Self {
        let body = body.into();
        let doc = Html::parse_document(&body);
        Self { url, body, doc }
    }

    /// The URL the response actually resolved to (after redirects).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw response body. Script-block regexes run against this, not the DOM.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Iterate elements matching `selector`.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.doc.select(selector)
    }

    /// Concatenated text of the first element matching `selector`.
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.doc
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Attribute value of the first element matching `selector`.
    pub fn first_attr(&self, selector: &Selector, attr: &str) -> Option<String> {
        self.doc
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string)
    }

    /// Attribute values of every element matching `selector`, in page order.
    /// Elements without the attribute are skipped.
    pub fn attr_all(&self, selector: &Selector, attr: &str) -> Vec<String> {
        self.doc
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::to_string)
            .collect()
    }

    /// Every text node under every element matching `selector`, unstripped.
    pub fn text_nodes(&self, selector: &Selector) -> Vec<String> {
        self.doc
            .select(selector)
            .flat_map(|el| el.text())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> Page {
        Page::from_html(Url::parse("https://example.com/a/b").unwrap(), html)
    }

    #[test]
    fn test_first_text_and_attr() {
        let p = page(r#"<html><head><title>기사 제목</title></head><body><span class="t" data-x="1"></span><span class="t" data-x="2"></span></body></html>"#);
        let title_sel = Selector::parse("head title").unwrap();
        let span_sel = Selector::parse("span.t").unwrap();
        assert_eq!(p.first_text(&title_sel).unwrap(), "기사 제목");
        assert_eq!(p.first_attr(&span_sel, "data-x").unwrap(), "1");
        assert_eq!(p.attr_all(&span_sel, "data-x"), vec!["1", "2"]);
        assert_eq!(p.first_attr(&span_sel, "data-missing"), None);
    }

    #[test]
    fn test_text_nodes_keeps_whitespace_and_order() {
        let p = page("<div id=\"c\">  one \n<strong>two</strong> three </div>");
        let sel = Selector::parse("div#c").unwrap();
        let nodes = p.text_nodes(&sel);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1], "two");
    }

    #[test]
    fn test_no_match_yields_empty() {
        let p = page("<html><body></body></html>");
        let sel = Selector::parse("div.absent").unwrap();
        assert!(p.text_nodes(&sel).is_empty());
        assert!(p.attr_all(&sel, "href").is_empty());
        assert_eq!(p.first_text(&sel), None);
    }
}
