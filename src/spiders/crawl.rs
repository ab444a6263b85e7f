//! The list → paginate → article control loop.
//!
//! Listing pages are walked breadth-first starting at page 1 of the
//! spider's section and date. Pagination links are tracked against a
//! visited set (pagination strips link to each other, so a raw refetch
//! policy would not terminate); article links are followed as discovered,
//! without deduplication. Article fetches run concurrently up to the
//! fetcher's configured bound.
//!
//! Failures follow the per-item policy: a listing page that cannot be
//! fetched or parsed is logged and skipped, an article that fails
//! extraction is logged and skipped, and the crawl carries on either way.

use std::collections::{HashSet, VecDeque};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::fetch::Fetcher;
use crate::models::NewsItem;
use crate::spiders::NewsSpider;

impl NewsSpider {
    /// Crawl this spider's section for its configured date.
    ///
    /// Returns every article that fetched and extracted cleanly; the rest
    /// are logged and skipped. The crawl ends when no unvisited pagination
    /// links remain.
    #[instrument(level = "info", skip_all, fields(section = %self.config.name, date = %self.date))]
    pub async fn crawl(&self, fetcher: &Fetcher) -> Vec<NewsItem> {
        let start = self.fmt_list_url(1);
        let mut visited: HashSet<String> = HashSet::from([start.clone()]);
        let mut pending: VecDeque<String> = VecDeque::from([start]);
        let mut items: Vec<NewsItem> = Vec::new();

        while let Some(list_url) = pending.pop_front() {
            let links = {
                let page = match fetcher.fetch(&list_url).await {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(url = %list_url, error = %e, "Listing fetch failed; skipping page");
                        continue;
                    }
                };
                for next in self.extract_pagination_links(&page) {
                    if visited.insert(next.clone()) {
                        pending.push_back(next);
                    }
                }
                match self.extract_article_links(&page) {
                    Ok(links) => links,
                    Err(e) => {
                        warn!(url = %list_url, error = %e, "Unusable article links; skipping page");
                        continue;
                    }
                }
            };
            debug!(url = %list_url, count = links.len(), "Extracted article links");
            items.extend(self.fetch_articles(fetcher, links).await);
        }

        info!(count = items.len(), "Crawl complete");
        items
    }

    /// Fetch and extract a batch of article URLs concurrently.
    async fn fetch_articles(&self, fetcher: &Fetcher, urls: Vec<String>) -> Vec<NewsItem> {
        stream::iter(urls)
            .map(|url| async move {
                let page = match fetcher.fetch(&url).await {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(%url, error = %e, "Article fetch failed; skipping");
                        return None;
                    }
                };
                match self.extract_article(&page) {
                    Ok(item) => {
                        debug!(%url, office_id = %item.office_id, article_id = %item.article_id, "Extracted article");
                        Some(item)
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "Article extraction failed; skipping");
                        None
                    }
                }
            })
            .buffer_unordered(fetcher.concurrency())
            .filter_map(std::future::ready)
            .collect()
            .await
    }
}
