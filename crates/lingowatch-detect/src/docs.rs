//! Docs detector: a content-hash gate over fetched documentation pages, with
//! hreflang set diffing and keyword scanning when the page actually changed.

use lingowatch_core::rules;
use lingowatch_core::{Signal, SignalKind, SourceKind};

use crate::html;
use crate::snapshot::DocsSnapshot;

/// Parsed view of one fetched documentation page.
#[derive(Debug, Clone)]
pub struct DocPage {
    pub text: String,
    pub content_hash: String,
    pub hreflangs: std::collections::BTreeSet<String>,
}

/// Extract visible text, hash it, and collect hreflang locales from raw HTML.
#[must_use]
pub fn analyze_page(html: &str) -> DocPage {
    let text = html::extract_visible_text(html);
    let content_hash = html::content_hash(&text);
    let hreflangs = html::parse_hreflangs(html);
    DocPage {
        text,
        content_hash,
        hreflangs,
    }
}

/// Diff a fetched page against the prior snapshot.
///
/// If the content hash is unchanged, no signals are produced and the prior
/// snapshot is returned as-is. On change, each locale in
/// `hreflangs − known_hreflang_locales` emits `NEW_HREFLANG`, and keyword
/// matches in the visible text emit one `KEYWORD` signal (re-scanned in full
/// on every change). The first check establishes the baseline silently.
#[must_use]
pub fn diff_doc(
    company: &str,
    url: &str,
    page: &DocPage,
    prior: Option<&DocsSnapshot>,
) -> (Vec<Signal>, DocsSnapshot) {
    let Some(prior) = prior else {
        return (
            Vec::new(),
            DocsSnapshot {
                content_hash: Some(page.content_hash.clone()),
                known_hreflang_locales: page.hreflangs.clone(),
            },
        );
    };

    if prior.content_hash.as_deref() == Some(page.content_hash.as_str()) {
        return (Vec::new(), prior.clone());
    }

    let mut signals = Vec::new();

    for locale in page.hreflangs.difference(&prior.known_hreflang_locales) {
        signals.push(Signal::new(
            SignalKind::NewHreflang,
            company,
            SourceKind::Docs,
            format!("New regional docs version: {locale}"),
            format!("hreflang '{locale}' appeared on {url}"),
            vec![locale.clone()],
            Some(url.to_string()),
        ));
    }

    let matched = rules::matched_keywords(&page.text);
    if !matched.is_empty() {
        signals.push(Signal::new(
            SignalKind::Keyword,
            company,
            SourceKind::Docs,
            format!("Doc change detected: {url}"),
            format!("Keywords in changed page: {}", matched.join(", ")),
            matched.iter().map(ToString::to_string).collect(),
            Some(url.to_string()),
        ));
    }

    let snapshot = DocsSnapshot {
        content_hash: Some(page.content_hash.clone()),
        known_hreflang_locales: prior
            .known_hreflang_locales
            .union(&page.hreflangs)
            .cloned()
            .collect(),
    };

    (signals, snapshot)
}
