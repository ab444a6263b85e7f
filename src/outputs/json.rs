//! JSON Lines output for crawled records.
//!
//! One file per crawl: `{output_dir}/{date}/{section}.jsonl`, one
//! serialized [`NewsItem`] per line. Downstream consumers stream the file
//! line by line without loading the whole crawl.

use std::error::Error;

use tokio::fs;
use tracing::{info, instrument};

use crate::models::NewsItem;

/// Write `items` to `{output_dir}/{date}/{section}.jsonl`.
///
/// Creates the date directory when missing and returns the written path.
///
/// # Errors
///
/// Directory creation, serialization, or file write failures.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, date = %date, section = %section))]
pub async fn write_records(
    items: &[NewsItem],
    output_dir: &str,
    date: &str,
    section: &str,
) -> Result<String, Box<dyn Error>> {
    let dir = format!("{}/{}", output_dir.trim_end_matches('/'), date);
    fs::create_dir_all(&dir).await?;

    let mut lines = String::new();
    for item in items {
        lines.push_str(&serde_json::to_string(item)?);
        lines.push('\n');
    }

    let path = format!("{dir}/{section}.jsonl");
    fs::write(&path, lines).await?;
    info!(path = %path, count = items.len(), "Wrote news records");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsItem;

    fn item(article_id: &str) -> NewsItem {
        NewsItem {
            office_id: "015".to_string(),
            article_id: article_id.to_string(),
            title: "제목".to_string(),
            content: "본문".to_string(),
            category_id: "103".to_string(),
            subcategory_id: None,
            subcategory_id2: None,
            url: format!("https://n.news.naver.com/mnews/article/015/{article_id}"),
            upload_time: "2021-01-01 23:59:39".to_string(),
            edited_time: "2021-01-01 23:59:39".to_string(),
            press: "한국경제".to_string(),
            authors: vec![],
        }
    }

    #[tokio::test]
    async fn test_write_records_one_line_per_item() {
        let dir = std::env::temp_dir().join("naver_news_json_test");
        let dir = dir.to_str().unwrap();
        let items = vec![item("0004476873"), item("0004476874")];

        let path = write_records(&items, dir, "20210101", "general")
            .await
            .unwrap();
        assert!(path.ends_with("20210101/general.jsonl"));

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: NewsItem = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, items[0]);

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_records_empty_crawl_writes_empty_file() {
        let dir = std::env::temp_dir().join("naver_news_json_empty_test");
        let dir = dir.to_str().unwrap();

        let path = write_records(&[], dir, "20210101", "sports").await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.is_empty());

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
