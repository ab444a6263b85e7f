//! Pagination and article-link extraction from listing pages.
//!
//! Listing pages enumerate article anchors and a pagination strip. The
//! general spider passes article links through untouched; sectioned spiders
//! rewrite each link onto their own article form via [`convert_article_url`]:
//! path-form links get their `mnews` segment substituted, query-form links
//! are rebuilt from their `oid`/`aid` parameters.

use once_cell::sync::Lazy;
use scraper::Selector;
use url::Url;

use crate::error::ScrapeError;
use crate::page::Page;
use crate::spiders::{NewsSpider, PAGINATION_BASE, fmt_article_url};
use crate::utils::remove_query_and_fragment;

static PAGING_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.paging a").unwrap());
static ARTICLE_LINK_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.list_body ul.type02 li a").unwrap());

impl NewsSpider {
    /// Links to the other pages of this listing. The pagination strip uses
    /// relative hrefs (`?mode=...&page=N`); each is resolved against the
    /// listing base. Zero links is a normal end-of-pagination result.
    pub fn extract_pagination_links(&self, page: &Page) -> Vec<String> {
        page.attr_all(&PAGING_SEL, "href")
            .into_iter()
            .map(|href| format!("{PAGINATION_BASE}{href}"))
            .collect()
    }

    /// Article links from this listing page, rewritten per section.
    ///
    /// Zero anchors yields `Ok` with an empty vec. A link that can be
    /// neither segment-substituted nor rebuilt from query parameters is a
    /// [`ScrapeError::Format`].
    pub fn extract_article_links(&self, page: &Page) -> Result<Vec<String>, ScrapeError> {
        let raw = page.attr_all(&ARTICLE_LINK_SEL, "href");
        match self.config.target_segment.as_deref() {
            None => Ok(raw),
            Some(target) => raw
                .iter()
                .map(|link| convert_article_url(link, target, &self.config.article_url))
                .collect(),
        }
    }
}

/// Rewrite one listing link onto the section's article form.
///
/// Path-form links carrying the generic `mnews` segment have it replaced by
/// `target` (unless the target *is* the generic form); anything else is
/// expected to carry `oid`/`aid` query parameters and is rebuilt from
/// `article_template`. Both branches strip query and fragment.
pub(crate) fn convert_article_url(
    raw: &str,
    target: &str,
    article_template: &str,
) -> Result<String, ScrapeError> {
    if raw.contains("mnews") && target != "mnews" {
        return remove_query_and_fragment(&raw.replace("mnews", target));
    }

    let parsed = Url::parse(raw).map_err(|e| ScrapeError::Format(format!("{raw}: {e}")))?;
    let mut oid = None;
    let mut aid = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "oid" => oid = Some(value.into_owned()),
            "aid" => aid = Some(value.into_owned()),
            _ => {}
        }
    }
    match (oid, aid) {
        (Some(oid), Some(aid)) => {
            remove_query_and_fragment(&fmt_article_url(article_template, &oid, &aid))
        }
        _ => Err(ScrapeError::Format(format!(
            "listing link carries neither a rewritable segment nor oid/aid parameters: {raw}"
        ))),
    }
}
