//! Static matching rules shared by all detectors: localization keywords,
//! automation-account deny-list, localization file patterns, language codes,
//! and the language → target-market hint table.

/// Keywords indicating localization intent in commit messages, PR titles,
/// and documentation text. Matched case-insensitively as substrings.
pub const KEYWORDS: &[&str] = &[
    "i18n",
    "l10n",
    "localization",
    "localisation",
    "translate",
    "translation",
    "rtl",
    "right-to-left",
    "pluralization",
    "language",
    "locale",
    "gettext",
    "es.json",
    "fr.json",
    "de.json",
    "ar.json",
    "ja.json",
    "ko.json",
    "zh.json",
    "arabic",
    "spanish",
    "french",
    "german",
    "korean",
    "hindi",
    "japanese",
    "chinese",
    "portuguese",
    "italian",
    "dutch",
    "russian",
    "turkish",
    "phrase",
    "strings",
    "string file",
    "translations",
    "multi-language",
    "international",
    "internationalization",
    "i18next",
    "formatjs",
    "intl",
    "polyglot",
    "globalize",
    "messageformat",
];

/// Known automation identities. A commit or PR authored by a matching account
/// never produces a signal, regardless of keyword matches.
pub const BOT_PATTERNS: &[&str] = &[
    "[bot]",
    "dependabot",
    "github-actions",
    "renovate",
    "greenkeeper",
    "snyk-bot",
    "codecov",
    "semantic-release",
    "auto-merge",
];

/// Directory fragments that mark a path as localization-related.
pub const LOCALIZATION_DIRS: &[&str] = &[
    "locales/",
    "locale/",
    "i18n/",
    "l10n/",
    "translations/",
    "lang/",
    "languages/",
    "res/values-",
    "strings/",
    "messages/",
    "intl/",
];

/// File extensions commonly used for translation resources.
pub const LOCALIZATION_EXTENSIONS: &[&str] = &[
    ".json",
    ".yaml",
    ".yml",
    ".properties",
    ".po",
    ".pot",
    ".xliff",
    ".strings",
    ".resx",
    ".arb",
];

/// Language codes recognized in file names and paths.
pub const LANGUAGE_CODES: &[&str] = &[
    "ar", "zh", "cs", "da", "nl", "fi", "fr", "de", "el", "he", "hi", "hu", "id", "it", "ja", "ko",
    "ms", "no", "pl", "pt", "pt-br", "ro", "ru", "sk", "es", "sv", "th", "tr", "uk", "vi", "bn",
    "ta", "te", "mr", "gu", "kn", "ml", "pa", "sw", "zu", "af", "sq", "am", "hy", "az", "eu", "be",
    "bs", "bg", "ca", "hr", "et", "fil", "gl", "ka", "is", "lv", "lt", "mk", "mt", "mn", "ne",
    "fa", "sr", "si", "sl",
];

/// Language code → target-market hints. Many-to-many: several languages point
/// at overlapping markets, and one language can indicate several markets.
const MARKET_HINTS: &[(&str, &[&str])] = &[
    ("ar", &["Middle East", "North Africa"]),
    ("de", &["Germany", "Austria", "Switzerland"]),
    ("es", &["Spain", "Latin America"]),
    ("fa", &["Iran", "Middle East"]),
    ("fr", &["France", "Canada", "West Africa"]),
    ("he", &["Israel", "Middle East"]),
    ("hi", &["India"]),
    ("id", &["Indonesia", "Southeast Asia"]),
    ("it", &["Italy"]),
    ("ja", &["Japan"]),
    ("ko", &["South Korea"]),
    ("ms", &["Malaysia", "Southeast Asia"]),
    ("nl", &["Netherlands", "Belgium"]),
    ("pl", &["Poland"]),
    ("pt", &["Portugal", "Brazil"]),
    ("pt-br", &["Brazil"]),
    ("ru", &["Russia", "Central Asia"]),
    ("sv", &["Sweden", "Nordics"]),
    ("th", &["Thailand", "Southeast Asia"]),
    ("tr", &["Turkey"]),
    ("vi", &["Vietnam", "Southeast Asia"]),
    ("zh", &["China", "Taiwan", "Singapore"]),
];

/// Returns the keywords from [`KEYWORDS`] present in `text` (case-insensitive).
#[must_use]
pub fn matched_keywords(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lower.contains(kw))
        .collect()
}

/// True if `author` matches one of the known automation patterns.
#[must_use]
pub fn is_bot_author(author: &str) -> bool {
    let lower = author.to_lowercase();
    BOT_PATTERNS.iter().any(|bot| lower.contains(bot))
}

/// True if the path sits under a recognized localization directory AND has a
/// recognized translation-resource extension. Both conditions are required so
/// that `docs/lang/history.md` or a stray `config.json` does not match.
#[must_use]
pub fn is_localization_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    let in_dir = LOCALIZATION_DIRS.iter().any(|dir| lower.contains(dir));
    let has_ext = LOCALIZATION_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext));
    in_dir && has_ext
}

/// Extract a recognized language code from a file path.
///
/// Matches the bare file stem (`fr.json`), `_xx`/`-xx` stem suffixes
/// (`messages_fr.json`), path segments (`locales/fr/app.json`), and Android
/// resource directories (`res/values-fr/strings.xml`).
#[must_use]
pub fn extract_language_code(path: &str) -> Option<&'static str> {
    let lower = path.to_lowercase();
    let filename = lower.rsplit('/').next().unwrap_or(&lower);
    let stem = filename.rsplit_once('.').map_or(filename, |(s, _)| s);

    for code in LANGUAGE_CODES {
        if stem == *code
            || stem.ends_with(&format!("_{code}"))
            || stem.ends_with(&format!("-{code}"))
        {
            return Some(code);
        }
        if lower.contains(&format!("/{code}/")) || lower.contains(&format!("/{code}.")) {
            return Some(code);
        }
        if lower.contains(&format!("values-{code}")) {
            return Some(code);
        }
    }
    None
}

/// Target-market hints for a language code. Empty for unmapped codes.
#[must_use]
pub fn market_hints(language_code: &str) -> &'static [&'static str] {
    MARKET_HINTS
        .iter()
        .find(|(code, _)| *code == language_code)
        .map_or(&[], |(_, hints)| hints)
}
