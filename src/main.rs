//! # Naver News
//!
//! CLI entry point for the crawler. One invocation crawls one section for
//! one listing date and writes the extracted records as JSON Lines.
//!
//! ## Usage
//!
//! ```sh
//! naver_news -o ./out --section entertain --date 20210101
//! ```
//!
//! ## Pipeline
//!
//! 1. **Listing**: fetch the section's title list for the date, page 1
//! 2. **Pagination**: follow discovered page links breadth-first
//! 3. **Articles**: fetch discovered article links concurrently and extract
//!    each into a normalized record; failures are logged and skipped
//! 4. **Output**: write the records to `{out}/{date}/{section}.jsonl`

use chrono::NaiveDate;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use naver_news::cli::Cli;
use naver_news::fetch::{FetchConfig, Fetcher};
use naver_news::outputs;
use naver_news::spiders::{NewsSpider, SpiderOptions};
use naver_news::utils::today_stamp;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("naver_news starting up");

    let args = Cli::parse();
    debug!(?args.section, ?args.date, ?args.output_dir, "Parsed CLI arguments");

    let date = match args.date.clone() {
        Some(date) => {
            NaiveDate::parse_from_str(&date, "%Y%m%d")
                .map_err(|e| format!("--date must be YYYYMMDD, got {date:?}: {e}"))?;
            date
        }
        None => today_stamp(),
    };

    let config = args.section_config();
    let section = config.name.clone();
    info!(%section, %date, "Configured crawl");

    let mut fetch_config = FetchConfig::default();
    if let Some(user_agent) = args.user_agent.clone() {
        fetch_config.user_agent = user_agent;
    }
    let fetcher = Fetcher::new(fetch_config)?;

    let spider = NewsSpider::new(
        config,
        SpiderOptions {
            date: date.clone(),
            join_char: args.join_char.clone(),
        },
    );

    let items = spider.crawl(&fetcher).await;
    info!(count = items.len(), "Crawl finished");

    let path = outputs::json::write_records(&items, &args.output_dir, &date, &section).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        count = items.len(),
        path = %path,
        "Execution complete"
    );

    Ok(())
}
