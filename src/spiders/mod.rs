//! Spiders for the portal's listing-page sections.
//!
//! One parameterized [`NewsSpider`] covers every section; the variants
//! differ only in the [`SectionConfig`] value they are constructed with:
//!
//! | Section | Constructor | Listing mode | Link rewriting |
//! |---------|-------------|--------------|----------------|
//! | General (all sections) | [`SectionConfig::general`] | `LS2D` | none |
//! | Single section by sid | [`SectionConfig::section`] | `LSD` | rebuild from `oid`/`aid` query |
//! | Entertainment (sid 106) | [`SectionConfig::entertainment`] | `LSD` | `mnews` → `entertain` |
//! | Sports (sid 107) | [`SectionConfig::sports`] | `LSD` | `mnews` → `sports`, canonical override |
//!
//! # Submodules
//!
//! - [`links`]: pagination and article-link extraction with per-section
//!   URL rewriting
//! - [`article`]: article-page extraction into [`crate::models::NewsItem`]
//! - [`crawl`]: the list → paginate → article control loop

pub mod article;
pub mod crawl;
pub mod links;

use crate::utils::today_stamp;

/// Listing URL for the all-sections title list (`LS2D` mode).
pub const GENERAL_LIST_URL: &str = "https://news.naver.com/main/list.naver?mode=LS2D&mid=sec&listType=title&date={date}&page={page}";
/// Listing URL for a single section (`LSD` mode), `{sid1}` filled per spider.
pub const SECTION_LIST_URL: &str = "https://news.naver.com/main/list.naver?mode=LSD&mid=sec&listType=title&sid1={sid1}&date={date}&page={page}";
/// Generic mobile article URL.
pub const MNEWS_ARTICLE_URL: &str = "https://n.news.naver.com/mnews/article/{oid}/{aid}";
/// Entertainment-portal article URL.
pub const ENTERTAIN_ARTICLE_URL: &str = "https://n.news.naver.com/entertain/article/{oid}/{aid}";
/// Sports-portal article URL.
pub const SPORTS_ARTICLE_URL: &str = "https://n.news.naver.com/sports/article/{oid}/{aid}";
/// Journalist profile URL.
pub const AUTHOR_PROFILE_URL: &str = "https://media.naver.com/journalist/{office_id}/{author_id}";
/// Base that relative pagination hrefs are resolved against.
pub const PAGINATION_BASE: &str = "https://news.naver.com/main/list.naver";

/// Static per-section configuration. One instance per spider.
#[derive(Debug, Clone)]
pub struct SectionConfig {
    /// Section label, used for logging and output file names.
    pub name: String,
    /// Section id for `LSD` listings; `None` for the all-sections list.
    pub sid: Option<String>,
    /// Listing URL template with `{sid1}`/`{date}`/`{page}` placeholders.
    pub list_url: String,
    /// Article URL template with `{oid}`/`{aid}` placeholders, used when a
    /// listing link must be rebuilt from query parameters.
    pub article_url: String,
    /// Path segment that replaces `mnews` in listing links; `None` means
    /// links are taken from the DOM as-is.
    pub target_segment: Option<String>,
    /// When set, the extracted record's URL is rebuilt from this template
    /// instead of the fetched page's own URL.
    pub canonical_url: Option<String>,
}

impl SectionConfig {
    /// All sections, title list, no link rewriting.
    pub fn general() -> Self {
        Self {
            name: "general".to_string(),
            sid: None,
            list_url: GENERAL_LIST_URL.to_string(),
            article_url: MNEWS_ARTICLE_URL.to_string(),
            target_segment: None,
            canonical_url: None,
        }
    }

    /// A single sid-partitioned section (e.g. "100" politics), generic
    /// article form.
    pub fn section(sid: impl Into<String>) -> Self {
        let sid = sid.into();
        Self {
            name: sid.clone(),
            sid: Some(sid),
            list_url: SECTION_LIST_URL.to_string(),
            article_url: MNEWS_ARTICLE_URL.to_string(),
            target_segment: Some("mnews".to_string()),
            canonical_url: None,
        }
    }

    /// Entertainment section: links rewritten onto the entertain portal.
    pub fn entertainment() -> Self {
        Self {
            name: "entertain".to_string(),
            sid: Some("106".to_string()),
            list_url: SECTION_LIST_URL.to_string(),
            article_url: ENTERTAIN_ARTICLE_URL.to_string(),
            target_segment: Some("entertain".to_string()),
            canonical_url: None,
        }
    }

    /// Sports section: links rewritten onto the sports portal, and the
    /// record's canonical URL rebuilt onto it as well.
    pub fn sports() -> Self {
        Self {
            name: "sports".to_string(),
            sid: Some("107".to_string()),
            list_url: SECTION_LIST_URL.to_string(),
            article_url: SPORTS_ARTICLE_URL.to_string(),
            target_segment: Some("sports".to_string()),
            canonical_url: Some(SPORTS_ARTICLE_URL.to_string()),
        }
    }
}

/// Per-crawl options with documented defaults: today's date, newline join.
#[derive(Debug, Clone)]
pub struct SpiderOptions {
    /// Listing date, `YYYYMMDD`.
    pub date: String,
    /// Separator between body text fragments.
    pub join_char: String,
}

impl Default for SpiderOptions {
    fn default() -> Self {
        Self {
            date: today_stamp(),
            join_char: "\n".to_string(),
        }
    }
}

/// A crawler for one section and one listing date.
///
/// Stateless between calls; all configuration is fixed at construction.
pub struct NewsSpider {
    pub(crate) config: SectionConfig,
    pub(crate) date: String,
    pub(crate) join_char: String,
}

impl NewsSpider {
    pub fn new(config: SectionConfig, options: SpiderOptions) -> Self {
        Self {
            config,
            date: options.date,
            join_char: options.join_char,
        }
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Listing URL for `page` of this spider's section and date.
    pub fn fmt_list_url(&self, page: u32) -> String {
        let mut url = self.config.list_url.clone();
        if let Some(sid) = &self.config.sid {
            url = url.replace("{sid1}", sid);
        }
        url.replace("{date}", &self.date)
            .replace("{page}", &page.to_string())
    }
}

/// Fill an article URL template with office and article identifiers.
pub(crate) fn fmt_article_url(template: &str, oid: &str, aid: &str) -> String {
    template.replace("{oid}", oid).replace("{aid}", aid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spider(config: SectionConfig) -> NewsSpider {
        NewsSpider::new(
            config,
            SpiderOptions {
                date: "20210101".to_string(),
                join_char: "\n".to_string(),
            },
        )
    }

    #[test]
    fn test_general_list_url() {
        assert_eq!(
            spider(SectionConfig::general()).fmt_list_url(1),
            "https://news.naver.com/main/list.naver?mode=LS2D&mid=sec&listType=title&date=20210101&page=1"
        );
    }

    #[test]
    fn test_sectioned_list_url_carries_sid() {
        assert_eq!(
            spider(SectionConfig::section("100")).fmt_list_url(3),
            "https://news.naver.com/main/list.naver?mode=LSD&mid=sec&listType=title&sid1=100&date=20210101&page=3"
        );
        assert_eq!(
            spider(SectionConfig::entertainment()).fmt_list_url(1),
            "https://news.naver.com/main/list.naver?mode=LSD&mid=sec&listType=title&sid1=106&date=20210101&page=1"
        );
        assert_eq!(
            spider(SectionConfig::sports()).fmt_list_url(1),
            "https://news.naver.com/main/list.naver?mode=LSD&mid=sec&listType=title&sid1=107&date=20210101&page=1"
        );
    }

    #[test]
    fn test_default_options() {
        let options = SpiderOptions::default();
        assert_eq!(options.date.len(), 8);
        assert_eq!(options.join_char, "\n");
    }

    #[test]
    fn test_fmt_article_url() {
        assert_eq!(
            fmt_article_url(SPORTS_ARTICLE_URL, "139", "0002144438"),
            "https://n.news.naver.com/sports/article/139/0002144438"
        );
    }
}
