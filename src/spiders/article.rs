//! Article-page extraction.
//!
//! An article page carries its metadata in two inline script blocks
//! (`var article = {...};` and `var office = {...};`) and the rest in the
//! DOM: title, body text, timestamps, and journalist subscribe buttons.
//! Extraction is strict — a page whose script blocks are missing or
//! malformed (layout change, blocked response) fails with a hard error for
//! that article instead of producing a partial record.
//!
//! Office and article identifiers are taken from the page URL's last two
//! path segments, not from the embedded JSON; this keeps them consistent
//! with the link-derived form whatever the script blocks claim.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use crate::error::ScrapeError;
use crate::models::{Author, NewsItem};
use crate::page::Page;
use crate::spiders::{AUTHOR_PROFILE_URL, NewsSpider, fmt_article_url};
use crate::utils::{js_object_to_json, office_and_article_id, remove_query_and_fragment, strip_and_filter};

static ARTICLE_STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var article = (\{[^;]+});").unwrap());
static OFFICE_STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var office = (\{[^;]+});").unwrap());

static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("head title").unwrap());
static CONTENT_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("div#dic_area").unwrap());
static UPLOAD_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span._ARTICLE_DATE_TIME").unwrap());
static EDITED_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span._ARTICLE_MODIFY_DATE_TIME").unwrap());
static AUTHOR_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("button.media_end_head_journalist_btn_subscribe._UNSUBSCRIBE").unwrap()
});

impl NewsSpider {
    /// Extract one [`NewsItem`] from a fetched article page.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::MissingField`]: no title, or no upload timestamp
    /// - [`ScrapeError::Parse`]: script block absent or not valid JSON
    ///   after rewriting, or section info incomplete
    /// - [`ScrapeError::Format`]: page URL without office/article segments,
    ///   or a malformed author channel key
    ///
    /// Missing edit timestamps, section sublevels, and authors are not
    /// errors; they take their documented defaults.
    pub fn extract_article(&self, page: &Page) -> Result<NewsItem, ScrapeError> {
        let title = page
            .first_text(&TITLE_SEL)
            .ok_or(ScrapeError::MissingField("title"))?;

        let article_src = ARTICLE_STATE_RE
            .captures(page.body())
            .and_then(|c| c.get(1))
            .ok_or_else(|| ScrapeError::Parse("article state block not found".to_string()))?;
        let article_state = js_object_to_json(article_src.as_str(), &["document.title"])?;
        let office_src = OFFICE_STATE_RE
            .captures(page.body())
            .and_then(|c| c.get(1))
            .ok_or_else(|| ScrapeError::Parse("office state block not found".to_string()))?;
        let office_state = js_object_to_json(office_src.as_str(), &[])?;

        let (office_id, article_id) = office_and_article_id(page.url().as_str())?;

        let content = strip_and_filter(page.text_nodes(&CONTENT_SEL)).join(&self.join_char);

        let sections = &article_state["sectionInfo"];
        let category_id = sections["firstSection"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ScrapeError::Parse("article state has no sectionInfo.firstSection".to_string())
            })?;
        let subcategory_id = sections["secondSection"].as_str().map(str::to_string);
        let subcategory_id2 = sections["thirdSection"].as_str().map(str::to_string);

        let press = office_state["name"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ScrapeError::Parse("office state has no name".to_string()))?;

        let url = match &self.config.canonical_url {
            Some(template) => fmt_article_url(template, &office_id, &article_id),
            None => remove_query_and_fragment(page.url().as_str())?,
        };

        let upload_time = page
            .first_attr(&UPLOAD_SEL, "data-date-time")
            .ok_or(ScrapeError::MissingField("upload timestamp"))?;
        let edited_time = page
            .first_attr(&EDITED_SEL, "data-modify-date-time")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| upload_time.clone());

        let authors = self.extract_authors(page, &office_id)?;

        Ok(NewsItem {
            office_id,
            article_id,
            title,
            content,
            category_id,
            subcategory_id,
            subcategory_id2,
            url,
            upload_time,
            edited_time,
            press,
            authors,
        })
    }

    /// Byline entries from the journalist subscribe buttons, in page order.
    ///
    /// The button's channel key is `{office}_{author}`; the second token is
    /// the author id. No buttons means no authors, which is valid.
    fn extract_authors(&self, page: &Page, office_id: &str) -> Result<Vec<Author>, ScrapeError> {
        let mut authors = Vec::new();
        for button in page.select(&AUTHOR_SEL) {
            let channel_key = button
                .value()
                .attr("data-channelkey")
                .ok_or(ScrapeError::MissingField("author channel key"))?;
            let author_id = channel_key.split('_').nth(1).ok_or_else(|| {
                ScrapeError::Format(format!(
                    "author channel key without office prefix: {channel_key}"
                ))
            })?;
            let name = button
                .value()
                .attr("data-messagevalue")
                .ok_or(ScrapeError::MissingField("author name"))?;
            let profile_url = AUTHOR_PROFILE_URL
                .replace("{office_id}", office_id)
                .replace("{author_id}", author_id);
            authors.push(Author {
                id: author_id.to_string(),
                name: name.to_string(),
                office_id: office_id.to_string(),
                profile_url,
            });
        }
        Ok(authors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiders::{SectionConfig, SpiderOptions};
    use url::Url;

    struct ArticleFixture<'a> {
        url: &'a str,
        title: &'a str,
        json_office_id: &'a str,
        json_article_id: &'a str,
        sections: (&'a str, &'a str, &'a str),
        upload: &'a str,
        edited: Option<&'a str>,
        press: &'a str,
        authors: &'a [(&'a str, &'a str)],
        paragraphs: &'a [&'a str],
    }

    fn render(fixture: &ArticleFixture) -> Page {
        let authors_html: String = fixture
            .authors
            .iter()
            .map(|(key, name)| {
                format!(
                    "<button class=\"media_end_head_journalist_btn_subscribe _UNSUBSCRIBE\" \
                     data-channelkey=\"{key}\" data-messagevalue=\"{name}\">구독</button>"
                )
            })
            .collect();
        let edited_html = fixture
            .edited
            .map(|edited| {
                format!(
                    "<span class=\"_ARTICLE_MODIFY_DATE_TIME\" data-modify-date-time=\"{edited}\">{edited}</span>"
                )
            })
            .unwrap_or_default();
        let content_html: String = fixture
            .paragraphs
            .iter()
            .map(|p| format!("  {p}<br>\n"))
            .collect();
        let (sid1, sid2, sid3) = fixture.sections;
        let html = format!(
            "<html>\n<head><title>{title}</title></head>\n<body>\n\
             <script type=\"text/javascript\">\n\
             var article = {{\n\
             \tisSubscribe: false,\n\
             \tofficeId: \"{joid}\",\n\
             \tarticleId: \"{jaid}\",\n\
             \tsectionId: \"{sid1}\",\n\
             \tgdid: \"88000107_000000000000000004476873\",\n\
             \ttype: \"1\",\n\
             \tsectionInfo: {{\n\
             \t\tfirstSection: \"{sid1}\",\n\
             \t\tsecondSection: \"{sid2}\",\n\
             \t\tthirdSection: \"{sid3}\"\n\
             \t}},\n\
             \ttitle: document.title\n\
             }};\n\
             var office = {{\n\
             \tofficeId: \"{joid}\",\n\
             \tname: \"{press}\",\n\
             \tsubscribe: false\n\
             }};\n\
             </script>\n\
             <div class=\"media_end_head_journalist\">{authors_html}</div>\n\
             <span class=\"_ARTICLE_DATE_TIME\" data-date-time=\"{upload}\">{upload}</span>\n\
             {edited_html}\n\
             <div id=\"dic_area\" class=\"go_trans _article_content\">\n{content_html}</div>\n\
             </body>\n</html>",
            title = fixture.title,
            joid = fixture.json_office_id,
            jaid = fixture.json_article_id,
            press = fixture.press,
            upload = fixture.upload,
        );
        Page::from_html(Url::parse(fixture.url).unwrap(), html)
    }

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
    fn test_extract_article_single_author() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/mnews/article/015/0004476873?sid=103",
            title: "새해 첫날 증시 전망",
            json_office_id: "015",
            json_article_id: "0004476873",
            sections: ("103", "321", "000"),
            upload: "2021-01-01 23:59:39",
            edited: None,
            press: "한국경제",
            authors: &[("015_74440", "김기자")],
            paragraphs: &["본문 첫 줄", "본문 둘째 줄"],
        });
        let item = spider(SectionConfig::general()).extract_article(&page).unwrap();

        assert_eq!(item.office_id, "015");
        assert_eq!(item.article_id, "0004476873");
        assert_eq!(item.title, "새해 첫날 증시 전망");
        assert_eq!(item.category_id, "103");
        assert_eq!(item.subcategory_id.as_deref(), Some("321"));
        assert_eq!(item.subcategory_id2.as_deref(), Some("000"));
        assert_eq!(item.url, "https://n.news.naver.com/mnews/article/015/0004476873");
        assert_eq!(item.upload_time, "2021-01-01 23:59:39");
        assert_eq!(item.edited_time, "2021-01-01 23:59:39");
        assert_eq!(item.press, "한국경제");
        assert_eq!(item.content, "본문 첫 줄\n본문 둘째 줄");
        assert_eq!(item.authors.len(), 1);
        assert_eq!(item.authors[0].office_id, "015");
        assert_eq!(item.authors[0].id, "74440");
        assert_eq!(item.authors[0].name, "김기자");
        assert_eq!(
            item.authors[0].profile_url,
            "https://media.naver.com/journalist/015/74440"
        );
    }

    #[test]
    fn test_extract_article_multiple_authors_in_page_order() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/mnews/article/056/0010963679",
            title: "신년 국정 운영 구상",
            json_office_id: "056",
            json_article_id: "0010963679",
            sections: ("100", "269", "000"),
            upload: "2021-01-01 21:25:01",
            edited: Some("2021-01-01 22:19:26"),
            press: "KBS",
            authors: &[("056_71060", "이기자"), ("056_71477", "박기자")],
            paragraphs: &["첫 문단", "둘째 문단", "셋째 문단"],
        });
        let item = spider(SectionConfig::general()).extract_article(&page).unwrap();

        assert_eq!(item.office_id, "056");
        assert_eq!(item.article_id, "0010963679");
        assert_eq!(item.upload_time, "2021-01-01 21:25:01");
        assert_eq!(item.edited_time, "2021-01-01 22:19:26");
        assert_eq!(item.authors.len(), 2);
        assert_eq!(item.authors[0].office_id, "056");
        assert_eq!(item.authors[0].id, "71060");
        assert_eq!(item.authors[1].office_id, "056");
        assert_eq!(item.authors[1].id, "71477");
    }

    #[test]
    fn test_extract_sports_article_uses_canonical_override() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/sports/article/139/0002144438",
            title: "시즌 개막전 결과",
            json_office_id: "139",
            json_article_id: "0002144438",
            sections: ("107", "77a", "77b"),
            upload: "2021-01-01 23:58:42",
            edited: None,
            press: "스포츠조선",
            authors: &[("139_43052", "최기자")],
            paragraphs: &["경기 내용"],
        });
        let item = spider(SectionConfig::sports()).extract_article(&page).unwrap();

        assert_eq!(item.office_id, "139");
        assert_eq!(item.article_id, "0002144438");
        assert_eq!(item.url, "https://n.news.naver.com/sports/article/139/0002144438");
        assert_eq!(item.category_id, "107");
        assert_eq!(item.subcategory_id.as_deref(), Some("77a"));
        assert_eq!(item.subcategory_id2.as_deref(), Some("77b"));
        assert_eq!(item.edited_time, item.upload_time);
    }

    #[test]
    fn test_identifiers_come_from_url_not_embedded_json() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/mnews/article/014/0004557309",
            title: "제목",
            json_office_id: "999",
            json_article_id: "0000000000",
            sections: ("101", "258", "000"),
            upload: "2021-01-02 09:00:00",
            edited: None,
            press: "파이낸셜뉴스",
            authors: &[],
            paragraphs: &["본문"],
        });
        let item = spider(SectionConfig::general()).extract_article(&page).unwrap();
        assert_eq!(item.office_id, "014");
        assert_eq!(item.article_id, "0004557309");
    }

    #[test]
    fn test_video_only_page_has_empty_content_and_no_authors() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/mnews/article/437/0000256432",
            title: "영상 뉴스",
            json_office_id: "437",
            json_article_id: "0000256432",
            sections: ("102", "250", "000"),
            upload: "2021-01-01 12:00:00",
            edited: None,
            press: "JTBC",
            authors: &[],
            paragraphs: &[],
        });
        let item = spider(SectionConfig::general()).extract_article(&page).unwrap();
        assert_eq!(item.content, "");
        assert!(item.authors.is_empty());
    }

    #[test]
    fn test_missing_title_is_missing_field() {
        let page = Page::from_html(
            Url::parse("https://n.news.naver.com/mnews/article/015/0004476873").unwrap(),
            "<html><body><p>blocked</p></body></html>",
        );
        let err = spider(SectionConfig::general())
            .extract_article(&page)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField("title")));
    }

    #[test]
    fn test_missing_script_block_is_parse_error() {
        let page = Page::from_html(
            Url::parse("https://n.news.naver.com/mnews/article/015/0004476873").unwrap(),
            "<html><head><title>점검 중</title></head><body><p>서비스 점검 안내</p></body></html>",
        );
        let err = spider(SectionConfig::general())
            .extract_article(&page)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_malformed_author_channel_key_is_format_error() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/mnews/article/015/0004476873",
            title: "제목",
            json_office_id: "015",
            json_article_id: "0004476873",
            sections: ("103", "321", "000"),
            upload: "2021-01-01 23:59:39",
            edited: None,
            press: "한국경제",
            authors: &[("nounderscore", "김기자")],
            paragraphs: &["본문"],
        });
        let err = spider(SectionConfig::general())
            .extract_article(&page)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Format(_)));
    }

    #[test]
    fn test_custom_join_char() {
        let page = render(&ArticleFixture {
            url: "https://n.news.naver.com/mnews/article/015/0004476873",
            title: "제목",
            json_office_id: "015",
            json_article_id: "0004476873",
            sections: ("103", "321", "000"),
            upload: "2021-01-01 23:59:39",
            edited: None,
            press: "한국경제",
            authors: &[],
            paragraphs: &["하나", "둘"],
        });
        let spider = NewsSpider::new(
            SectionConfig::general(),
            SpiderOptions {
                date: "20210101".to_string(),
                join_char: " ".to_string(),
            },
        );
        let item = spider.extract_article(&page).unwrap();
        assert_eq!(item.content, "하나 둘");
    }
}
