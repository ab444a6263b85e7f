//! Data models for extracted news records.
//!
//! This module defines the normalized output of the crawler:
//! - [`NewsItem`]: one article page reduced to structured fields
//! - [`Author`]: a bylined journalist attached to an article
//!
//! Both are plain data with `serde` derives so downstream sinks can write
//! them as JSON without further mapping.

use serde::{Deserialize, Serialize};

/// A journalist credited on an article page.
///
/// Derived entirely from the article page itself; authors have no lifecycle
/// of their own. The profile URL is built from the publisher's office id and
/// the author id taken from the subscribe button markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    /// Author identifier, the second token of the button's channel key.
    pub id: String,
    /// Display name as shown in the byline.
    pub name: String,
    /// Office (publisher) the author writes for.
    pub office_id: String,
    /// Journalist profile page URL.
    pub profile_url: String,
}

/// One normalized news article.
///
/// Created once per article fetch and immutable afterwards.
///
/// # Invariants
///
/// - `office_id`/`article_id` come from the last two path segments of the
///   final article URL — never from query parameters or the embedded JSON.
/// - `edited_time` equals `upload_time` when the page carries no edit marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// Publisher (press outlet) identifier.
    pub office_id: String,
    /// Article identifier, unique within an office.
    pub article_id: String,
    /// Article title from the document head.
    pub title: String,
    /// Body text, fragments joined with the spider's join character.
    /// Empty for video-only pages.
    pub content: String,
    /// Primary section id (e.g. "100" politics, "106" entertainment).
    pub category_id: String,
    /// Secondary section id, when the page reports one.
    pub subcategory_id: Option<String>,
    /// Tertiary section id, when the page reports one.
    pub subcategory_id2: Option<String>,
    /// Canonical article URL: query and fragment stripped, possibly
    /// rewritten to the section's own article form.
    pub url: String,
    /// Upload timestamp, pre-formatted by the page (`YYYY-MM-DD HH:MM:SS`).
    pub upload_time: String,
    /// Last-edit timestamp; equals `upload_time` when never edited.
    pub edited_time: String,
    /// Publisher display name from the embedded office state.
    pub press: String,
    /// Credited journalists, in page order. May be empty.
    pub authors: Vec<Author>,
}
