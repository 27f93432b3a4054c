//! Store-listing detector: set difference over supported display languages.

use std::collections::BTreeSet;

use lingowatch_core::rules;
use lingowatch_core::{Signal, SignalKind, SourceKind};

use crate::snapshot::StoreSnapshot;

/// Diff the currently supported language set against the prior snapshot.
///
/// Each language in `current − known` emits one `NEW_APP_LANG` signal with a
/// target-market hint. Removed languages are absorbed silently — the known
/// set only grows, so a language flapping in and out of the listing never
/// re-signals. The first check establishes the baseline without signaling.
#[must_use]
pub fn diff_store_languages(
    company: &str,
    package_id: &str,
    current: &BTreeSet<String>,
    prior: Option<&StoreSnapshot>,
) -> (Vec<Signal>, StoreSnapshot) {
    let Some(prior) = prior else {
        return (
            Vec::new(),
            StoreSnapshot {
                known_languages: current.clone(),
            },
        );
    };

    let listing_url = format!("https://play.google.com/store/apps/details?id={package_id}");

    let signals = current
        .difference(&prior.known_languages)
        .map(|lang| {
            let hints = rules::market_hints(lang);
            let details = if hints.is_empty() {
                format!("Listing now localized for '{lang}'")
            } else {
                format!(
                    "Listing now localized for '{lang}' (target markets: {})",
                    hints.join(", ")
                )
            };
            Signal::new(
                SignalKind::NewAppLang,
                company,
                SourceKind::PlayStore,
                format!("{package_id}: new language {lang}"),
                details,
                vec![lang.clone()],
                Some(listing_url.clone()),
            )
        })
        .collect();

    let snapshot = StoreSnapshot {
        known_languages: prior.known_languages.union(current).cloned().collect(),
    };

    (signals, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn new_arabic_language_signals_with_market_hint() {
        let prior = StoreSnapshot {
            known_languages: langs(&["en", "de"]),
        };
        let current = langs(&["en", "de", "ar"]);

        let (signals, next) =
            diff_store_languages("Acme", "com.acme.app", &current, Some(&prior));

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::NewAppLang);
        assert_eq!(signals[0].keywords, vec!["ar"]);
        assert!(signals[0].details.contains("Middle East"));
        assert!(signals[0].details.contains("North Africa"));
        assert_eq!(next.known_languages, langs(&["en", "de", "ar"]));
    }

    #[test]
    fn already_known_language_never_resignals() {
        let prior = StoreSnapshot {
            known_languages: langs(&["en", "de", "ar"]),
        };
        let current = langs(&["en", "de", "ar"]);
        let (signals, _) = diff_store_languages("Acme", "com.acme.app", &current, Some(&prior));
        assert!(signals.is_empty());
    }

    #[test]
    fn removed_language_is_absorbed_not_signaled() {
        let prior = StoreSnapshot {
            known_languages: langs(&["en", "de"]),
        };
        let current = langs(&["en"]);

        let (signals, next) = diff_store_languages("Acme", "com.acme.app", &current, Some(&prior));

        assert!(signals.is_empty());
        // Monotonic growth: the known set never shrinks.
        assert_eq!(next.known_languages, langs(&["en", "de"]));
    }

    #[test]
    fn removed_then_returning_language_does_not_resignal() {
        let prior = StoreSnapshot {
            known_languages: langs(&["en", "de"]),
        };
        let (_, after_removal) =
            diff_store_languages("Acme", "com.acme.app", &langs(&["en"]), Some(&prior));
        let (signals, _) = diff_store_languages(
            "Acme",
            "com.acme.app",
            &langs(&["en", "de"]),
            Some(&after_removal),
        );
        assert!(signals.is_empty());
    }

    #[test]
    fn baseline_check_emits_nothing() {
        let current = langs(&["en", "fr", "ja"]);
        let (signals, next) = diff_store_languages("Acme", "com.acme.app", &current, None);
        assert!(signals.is_empty());
        assert_eq!(next.known_languages, current);
    }

    #[test]
    fn multiple_new_languages_emit_one_signal_each() {
        let prior = StoreSnapshot {
            known_languages: langs(&["en"]),
        };
        let current = langs(&["en", "ja", "ko"]);
        let (signals, _) = diff_store_languages("Acme", "com.acme.app", &current, Some(&prior));
        assert_eq!(signals.len(), 2);
        let codes: Vec<&str> = signals.iter().map(|s| s.keywords[0].as_str()).collect();
        assert!(codes.contains(&"ja"));
        assert!(codes.contains(&"ko"));
    }
}
