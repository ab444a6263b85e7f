//! Utility functions for string cleanup, embedded-object parsing, URL
//! canonicalization, and localized timestamp handling.
//!
//! Everything here is pure and synchronous. The quasi-JSON rewriter
//! [`js_object_to_json`] is the single seam coupling this crate to the
//! portal's inline-script markup; if the site changes its script blocks,
//! this is where the breakage surfaces as [`ScrapeError::Parse`].

use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::ScrapeError;

/// Korean meridiem markers and their `%p` equivalents.
pub const MERIDIEM_TOKENS: &[(&str, &str)] = &[("오전", "AM"), ("오후", "PM")];

static BARE_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s*:").unwrap());

/// Trim every entry and drop the ones that end up empty. Order-preserving.
pub fn strip_and_filter<I, S>(strings: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    strip_and_filter_by(strings, |s| !s.is_empty())
}

/// Trim every entry and keep only those passing `keep`. Order-preserving.
pub fn strip_and_filter_by<I, S, F>(strings: I, keep: F) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    strings
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| keep(s))
        .collect()
}

/// Convert a JavaScript object literal into a parsed JSON value.
///
/// Bare identifier keys are quoted (`officeId:` becomes `"officeId":`),
/// then every token in `blank_tokens` is replaced with an empty string
/// literal (used for values like `document.title` that only exist in the
/// browser), and the result is parsed as strict JSON.
///
/// # Errors
///
/// [`ScrapeError::Parse`] when the rewritten fragment is not valid JSON —
/// the page layout changed, or the response was an interstitial.
pub fn js_object_to_json(
    fragment: &str,
    blank_tokens: &[&str],
) -> Result<serde_json::Value, ScrapeError> {
    let mut rewritten = BARE_KEY_RE.replace_all(fragment, "\"${1}\":").into_owned();
    for token in blank_tokens {
        rewritten = rewritten.replace(token, "\"\"");
    }
    serde_json::from_str(&rewritten)
        .map_err(|e| ScrapeError::Parse(format!("embedded object is not valid JSON: {e}")))
}

/// Strip the query string and fragment from a URL. Idempotent.
pub fn remove_query_and_fragment(url: &str) -> Result<String, ScrapeError> {
    let mut parsed =
        Url::parse(url).map_err(|e| ScrapeError::Format(format!("{url}: {e}")))?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed.into())
}

/// Split the office id and article id out of an article URL.
///
/// The two identifiers are always the last two path segments, e.g.
/// `https://n.news.naver.com/mnews/article/015/0004476873` yields
/// `("015", "0004476873")`.
///
/// # Errors
///
/// [`ScrapeError::Format`] when the URL does not parse or its path has
/// fewer than two segments.
pub fn office_and_article_id(url: &str) -> Result<(String, String), ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::Format(format!("{url}: {e}")))?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();
    if segments.len() < 2 {
        return Err(ScrapeError::Format(format!(
            "article URL needs at least two path segments: {url}"
        )));
    }
    let office_id = segments[segments.len() - 2].to_string();
    let article_id = segments[segments.len() - 1].to_string();
    Ok((office_id, article_id))
}

/// Parse a localized timestamp after substituting locale tokens.
///
/// The default token map ([`MERIDIEM_TOKENS`]) turns the portal's 오전/오후
/// markers into `AM`/`PM` so `%p` patterns apply. Values are naive local
/// time; no timezone is attached.
pub fn parse_localized_datetime(
    text: &str,
    fmt: &str,
    replacements: &[(&str, &str)],
) -> Result<NaiveDateTime, ScrapeError> {
    let mut normalized = text.to_string();
    for (from, to) in replacements {
        normalized = normalized.replace(from, to);
    }
    NaiveDateTime::parse_from_str(&normalized, fmt)
        .map_err(|e| ScrapeError::Parse(format!("datetime {text:?} does not match {fmt:?}: {e}")))
}

/// Format a naive datetime. No timezone conversion.
pub fn format_datetime(value: &NaiveDateTime, fmt: &str) -> String {
    value.format(fmt).to_string()
}

/// Current local day as a `YYYYMMDD` stamp, the default crawl cursor date.
pub fn today_stamp() -> String {
    format_datetime(&Local::now().naive_local(), "%Y%m%d")
}
