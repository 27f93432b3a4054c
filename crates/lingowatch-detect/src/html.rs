//! HTML extraction helpers for documentation pages: hreflang attributes,
//! visible text, and the content hash that gates the docs diff.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use sha2::{Digest, Sha256};

fn link_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<link\b[^>]*>").expect("valid link-tag regex"))
}

fn hreflang_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)hreflang\s*=\s*["']([^"']+)["']"#).expect("valid hreflang regex")
    })
}

fn rel_alternate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)rel\s*=\s*["']alternate["']"#).expect("valid rel regex")
    })
}

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b.*?</(script|style)>").expect("valid script regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"))
}

/// Extract `hreflang` locales from `<link rel="alternate" …>` tags.
///
/// Attribute order within the tag does not matter. Locales are lowercased and
/// `x-default` is excluded (it marks the fallback page, not a region).
pub(crate) fn parse_hreflangs(html: &str) -> BTreeSet<String> {
    link_tag_re()
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| rel_alternate_re().is_match(tag))
        .filter_map(|tag| hreflang_re().captures(tag))
        .map(|cap| cap[1].to_lowercase())
        .filter(|lang| !lang.is_empty() && lang != "x-default")
        .collect()
}

/// Strip script/style blocks and markup, decode common entities, and collapse
/// whitespace, leaving the text a reader would see.
pub(crate) fn extract_visible_text(html: &str) -> String {
    let without_scripts = script_style_re().replace_all(html, " ");
    let without_tags = tag_re().replace_all(&without_scripts, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable hex sha-256 of the extracted text. Hashing the visible text rather
/// than raw bytes keeps cache-busted asset URLs from churning the hash.
pub(crate) fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{digest:x}")
}
