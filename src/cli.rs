//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. The section argument accepts the named variants as well as any
//! raw sid code, so one binary covers every listing partition.

use clap::Parser;

use crate::spiders::SectionConfig;

/// Command-line arguments for the Naver News crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl today's general title list
/// naver_news -o ./out
///
/// # Crawl the entertainment section for a specific day
/// naver_news -o ./out --section entertain --date 20210101
///
/// # Crawl the politics section (sid 100)
/// naver_news -o ./out --section 100
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Section to crawl: general, entertain, sports, or a raw sid code
    #[arg(short, long, default_value = "general")]
    pub section: String,

    /// Listing date as YYYYMMDD; defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Output directory for the JSON Lines file
    #[arg(short, long)]
    pub output_dir: String,

    /// Separator inserted between body text fragments
    #[arg(long, default_value = "\n")]
    pub join_char: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "NAVER_NEWS_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl Cli {
    /// Resolve the section argument into a [`SectionConfig`].
    pub fn section_config(&self) -> SectionConfig {
        match self.section.as_str() {
            "general" => SectionConfig::general(),
            "entertain" | "entertainment" => SectionConfig::entertainment(),
            "sports" => SectionConfig::sports(),
            sid => SectionConfig::section(sid),
        }
    }
}
