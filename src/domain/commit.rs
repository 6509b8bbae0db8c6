use crate::config::KeywordsConfig;
use crate::domain::version::VersionBump;
use crate::error::Result;
use regex::Regex;

/// A single keyword test, either a plain substring or a regex
#[derive(Debug, Clone)]
enum Keyword {
    Disabled,
    Literal(String),
    Pattern(Regex),
}

impl Keyword {
    fn new(raw: &str, use_regex: bool) -> Result<Self> {
        if raw.is_empty() {
            Ok(Keyword::Disabled)
        } else if use_regex {
            Ok(Keyword::Pattern(Regex::new(raw)?))
        } else {
            Ok(Keyword::Literal(raw.to_string()))
        }
    }

    fn is_match(&self, message: &str) -> bool {
        match self {
            Keyword::Disabled => false,
            Keyword::Literal(s) => message.contains(s.as_str()),
            Keyword::Pattern(re) => re.is_match(message),
        }
    }
}

/// Detects version keywords such as `[major]` in commit messages
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    major: Keyword,
    minor: Keyword,
    patch: Keyword,
}

impl KeywordMatcher {
    pub fn new(config: &KeywordsConfig) -> Result<Self> {
        Ok(KeywordMatcher {
            major: Keyword::new(&config.major, config.use_regex)?,
            minor: Keyword::new(&config.minor, config.use_regex)?,
            patch: Keyword::new(&config.patch, config.use_regex)?,
        })
    }

    /// Strongest bump requested by a commit message, if any
    pub fn detect(&self, message: &str) -> Option<VersionBump> {
        if self.major.is_match(message) {
            Some(VersionBump::Major)
        } else if self.minor.is_match(message) {
            Some(VersionBump::Minor)
        } else if self.patch.is_match(message) {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }

    /// Keyword text to put in a commit message requesting `bump`
    pub fn keyword_for(config: &KeywordsConfig, bump: VersionBump) -> &str {
        match bump {
            VersionBump::Major => &config.major,
            VersionBump::Minor => &config.minor,
            VersionBump::Patch => &config.patch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_literal_keywords() {
        let matcher = KeywordMatcher::new(&KeywordsConfig::default()).unwrap();
        assert_eq!(matcher.detect("[major] drop api"), Some(VersionBump::Major));
        assert_eq!(matcher.detect("feature [minor]"), Some(VersionBump::Minor));
        assert_eq!(matcher.detect("fix\n\n[patch]"), Some(VersionBump::Patch));
        assert_eq!(matcher.detect("plain commit"), None);
    }

    #[test]
    fn test_major_wins_over_minor() {
        let matcher = KeywordMatcher::new(&KeywordsConfig::default()).unwrap();
        assert_eq!(
            matcher.detect("[minor] and [major]"),
            Some(VersionBump::Major)
        );
    }

    #[test]
    fn test_detect_regex_keywords() {
        let config = KeywordsConfig {
            major: r"^BREAKING".to_string(),
            minor: r"^feat(\(.+\))?:".to_string(),
            patch: r"^fix:".to_string(),
            use_regex: true,
        };
        let matcher = KeywordMatcher::new(&config).unwrap();
        assert_eq!(matcher.detect("feat(api): add"), Some(VersionBump::Minor));
        assert_eq!(matcher.detect("fix: typo"), Some(VersionBump::Patch));
        assert_eq!(matcher.detect("docs: fix: typo"), None);
    }

    #[test]
    fn test_invalid_regex_keyword() {
        let config = KeywordsConfig {
            major: "(".to_string(),
            use_regex: true,
            ..KeywordsConfig::default()
        };
        assert!(KeywordMatcher::new(&config).is_err());
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let config = KeywordsConfig {
            patch: String::new(),
            ..KeywordsConfig::default()
        };
        let matcher = KeywordMatcher::new(&config).unwrap();
        assert_eq!(matcher.detect("anything"), None);
    }

    #[test]
    fn test_keyword_for() {
        let config = KeywordsConfig::default();
        assert_eq!(KeywordMatcher::keyword_for(&config, VersionBump::Minor), "[minor]");
    }
}
