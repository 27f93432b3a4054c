use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which external source a check or signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Github,
    PlayStore,
    Docs,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Github => "github",
            SourceKind::PlayStore => "playstore",
            SourceKind::Docs => "docs",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::Github),
            "playstore" => Ok(Self::PlayStore),
            "docs" => Ok(Self::Docs),
            other => Err(format!(
                "unknown source '{other}' (expected github, playstore, or docs)"
            )),
        }
    }
}

/// Kind of detected localization-intent event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    NewLangFile,
    NewHreflang,
    NewAppLang,
    OpenPr,
    Keyword,
}

impl SignalKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::NewLangFile => "NEW_LANG_FILE",
            SignalKind::NewHreflang => "NEW_HREFLANG",
            SignalKind::NewAppLang => "NEW_APP_LANG",
            SignalKind::OpenPr => "OPEN_PR",
            SignalKind::Keyword => "KEYWORD",
        }
    }

    /// Strong purchase-intent evidence, versus secondary keyword matches.
    #[must_use]
    pub fn is_high_value(self) -> bool {
        !matches!(self, SignalKind::Keyword)
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected event. Immutable after creation: detectors build it, the
/// alert sink owns it from then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub company: String,
    pub source: SourceKind,
    pub title: String,
    pub details: String,
    pub keywords: Vec<String>,
    pub url: Option<String>,
    pub detected_at: DateTime<Utc>,
}

impl Signal {
    #[must_use]
    pub fn new(
        kind: SignalKind,
        company: &str,
        source: SourceKind,
        title: String,
        details: String,
        keywords: Vec<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            kind,
            company: company.to_string(),
            source,
            title,
            details,
            keywords,
            url,
            detected_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_kind_wire_format() {
        assert_eq!(SignalKind::NewLangFile.as_str(), "NEW_LANG_FILE");
        assert_eq!(SignalKind::NewHreflang.as_str(), "NEW_HREFLANG");
        assert_eq!(SignalKind::NewAppLang.as_str(), "NEW_APP_LANG");
        assert_eq!(SignalKind::OpenPr.as_str(), "OPEN_PR");
        assert_eq!(SignalKind::Keyword.as_str(), "KEYWORD");
    }

    #[test]
    fn keyword_is_not_high_value() {
        assert!(!SignalKind::Keyword.is_high_value());
        assert!(SignalKind::NewLangFile.is_high_value());
        assert!(SignalKind::OpenPr.is_high_value());
    }

    #[test]
    fn source_kind_display() {
        assert_eq!(SourceKind::Github.to_string(), "github");
        assert_eq!(SourceKind::PlayStore.to_string(), "playstore");
        assert_eq!(SourceKind::Docs.to_string(), "docs");
    }

    #[test]
    fn source_kind_parses_from_cli_strings() {
        assert_eq!("github".parse::<SourceKind>(), Ok(SourceKind::Github));
        assert_eq!("playstore".parse::<SourceKind>(), Ok(SourceKind::PlayStore));
        assert!("appstore".parse::<SourceKind>().is_err());
    }

    #[test]
    fn signal_kind_serde_roundtrip() {
        let json = serde_json::to_string(&SignalKind::NewAppLang).unwrap();
        assert_eq!(json, "\"NEW_APP_LANG\"");
        let back: SignalKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SignalKind::NewAppLang);
    }
}
