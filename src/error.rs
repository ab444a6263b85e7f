//! Error types for crawling and extraction.
//!
//! Extraction is strict by design: malformed embedded state or an unexpected
//! URL shape is a hard error for that article rather than a silently partial
//! record. The crawl driver catches per article, logs, and moves on — see
//! [`crate::spiders::crawl`].

use thiserror::Error;

/// Everything that can go wrong while fetching or extracting a page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// An embedded script block was missing or did not parse as JSON after
    /// rewriting, or a datetime did not match its expected pattern.
    #[error("failed to parse embedded page state: {0}")]
    Parse(String),

    /// A URL lacked the expected path segments or query parameters.
    #[error("unexpected URL shape: {0}")]
    Format(String),

    /// A required DOM field was absent from the page.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The fetch collaborator failed: transport error, timeout, or a
    /// non-success status that outlived the retry budget.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}
