//! crates/cloutline_core/src/share.rs
//!
//! Builds "share this" intent links for social platforms.

use serde::{Deserialize, Serialize};
use url::Url;

const APP_URL: &str = "https://cloutline.app";
const TWITTER_SIGNATURE: &str = "\n\nGenerated with @Cloutline";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Youtube,
    Twitter,
    Linkedin,
    Facebook,
    Whatsapp,
    Telegram,
    Reddit,
}

impl SharePlatform {
    /// Characters the platform accepts in a single post, where it enforces one.
    pub fn character_limit(&self) -> Option<usize> {
        match self {
            SharePlatform::Twitter => Some(280),
            SharePlatform::Linkedin => Some(3000),
            _ => None,
        }
    }
}

/// Returns the intent URL that pre-fills `text` on `platform`.
pub fn share_url(platform: SharePlatform, text: &str) -> Result<Url, url::ParseError> {
    let (base, params): (&str, Vec<(&str, String)>) = match platform {
        SharePlatform::Youtube => (
            "https://www.youtube.com/results",
            vec![("search_query", text.to_string())],
        ),
        SharePlatform::Twitter => (
            "https://twitter.com/intent/tweet",
            vec![("text", format!("{}{}", text, TWITTER_SIGNATURE))],
        ),
        SharePlatform::Linkedin => (
            "https://www.linkedin.com/sharing/share-offsite/",
            vec![("url", APP_URL.to_string()), ("summary", text.to_string())],
        ),
        SharePlatform::Facebook => (
            "https://www.facebook.com/sharer/sharer.php",
            vec![("u", APP_URL.to_string()), ("quote", text.to_string())],
        ),
        SharePlatform::Whatsapp => ("https://wa.me/", vec![("text", text.to_string())]),
        SharePlatform::Telegram => (
            "https://t.me/share/url",
            vec![("url", APP_URL.to_string()), ("text", text.to_string())],
        ),
        SharePlatform::Reddit => (
            "https://reddit.com/submit",
            vec![("title", text.to_string()), ("url", APP_URL.to_string())],
        ),
    };
    Url::parse_with_params(base, params)
}
