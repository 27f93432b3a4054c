//! Remote fetching for the docs and store-listing detectors.

use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};

use crate::error::DetectError;

pub const DEFAULT_PLAY_BASE_URL: &str = "https://play.google.com";

/// Candidate languages probed against a store listing. The set of languages a
/// listing supports is discovered by requesting the localized page per
/// candidate and checking whether the store actually served that language.
pub const PROBE_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "ja", "ko", "zh", "pt", "ru", "ar", "hi", "it", "nl", "pl", "tr",
    "vi", "th", "id",
];

fn html_lang_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<html\b[^>]*\blang\s*=\s*["']([a-zA-Z-]+)["']"#)
            .expect("valid html-lang regex")
    })
}

/// HTTP fetcher shared by the docs and store-listing checks.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, DetectError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches a documentation page body as text.
    ///
    /// # Errors
    ///
    /// - [`DetectError::RateLimited`] — HTTP 429.
    /// - [`DetectError::NotFound`] — HTTP 404.
    /// - [`DetectError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`DetectError::Http`] — network or TLS failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, DetectError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DetectError::RateLimited {
                url: url.to_string(),
                retry_after_secs,
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DetectError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DetectError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Discovers the display languages a store listing supports by probing
    /// the localized page per candidate language.
    ///
    /// A candidate counts as supported when the listing page comes back with
    /// an `<html lang="…">` attribute matching the requested language — the
    /// store serves the fallback language otherwise. A 404 for the listing
    /// itself is an error; a candidate that fails to match is simply absent
    /// from the result.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::NotFound`] if the listing does not exist, or
    /// the transport/status errors of [`PageFetcher::fetch_text`] for the
    /// first probe that fails at the HTTP level.
    pub async fn fetch_store_languages(
        &self,
        base_url: &str,
        package_id: &str,
    ) -> Result<BTreeSet<String>, DetectError> {
        let mut supported = BTreeSet::new();

        for lang in PROBE_LANGUAGES {
            let url = format!(
                "{}/store/apps/details?id={package_id}&hl={lang}",
                base_url.trim_end_matches('/')
            );
            let body = self.fetch_text(&url).await?;
            if served_language(&body).is_some_and(|served| {
                served == *lang || served.starts_with(&format!("{lang}-"))
            }) {
                supported.insert((*lang).to_string());
            }
        }

        Ok(supported)
    }
}

/// The language the server actually rendered, from the `<html lang>` attribute.
fn served_language(html: &str) -> Option<String> {
    html_lang_re()
        .captures(html)
        .map(|cap| cap[1].to_lowercase())
}
