//! Crawl the Naver News portal and extract normalized article records.
//!
//! The crate walks a date's listing pages, follows pagination, derives
//! article links with per-section URL-rewrite rules, and extracts one
//! [`models::NewsItem`] per article page from two embedded metadata script
//! blocks plus DOM fields.
//!
//! # Layout
//!
//! - [`utils`]: string cleanup, quasi-JSON parsing, URL canonicalization,
//!   localized timestamps
//! - [`page`]: the parsed-page handle extractors operate on
//! - [`fetch`]: the HTTP collaborator (retry, backoff, politeness delay)
//! - [`spiders`]: section configuration, link and article extraction, and
//!   the crawl-control loop
//! - [`models`]: the extracted record types
//! - [`outputs`]: the default JSON Lines sink used by the CLI
//!
//! # Example
//!
//! ```ignore
//! use naver_news::fetch::{FetchConfig, Fetcher};
//! use naver_news::spiders::{NewsSpider, SectionConfig, SpiderOptions};
//!
//! let fetcher = Fetcher::new(FetchConfig::default())?;
//! let spider = NewsSpider::new(SectionConfig::entertainment(), SpiderOptions::default());
//! let items = spider.crawl(&fetcher).await;
//! ```

pub mod cli;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod page;
pub mod spiders;
pub mod utils;
