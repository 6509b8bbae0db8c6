use crate::domain::version::SemVer;
use crate::error::Result;
use git2::Oid;
use regex::Regex;

/// Default version-tag pattern: optional `refs/tags/`, optional `v`, then `X.Y.Z`
pub const DEFAULT_TAG_PATTERN: &str =
    r"^(?:refs/tags/)?(?P<tag>v?(?P<version>(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)))$";

/// A tag whose name matched the version pattern, bound to the commit it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    /// Short tag name, e.g. `v1.2.3`
    pub name: String,
    /// Bare version text used when rendering, e.g. `1.2.3`
    pub version_text: String,
    pub version: SemVer,
    pub target: Oid,
}

/// Result of matching a tag name against the version pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagMatch {
    /// Name does not match the pattern at all
    NoMatch,
    /// Name matches, but the captured version is invalid
    Unparsable { reason: String },
    Version { version_text: String, version: SemVer },
}

/// Compiled version-tag regex with `major`, `minor`, `patch` capture groups
///
/// An optional `version` group selects the text rendered for `%t`; without it
/// the rendered text is `major.minor.patch`.
#[derive(Debug, Clone)]
pub struct TagMatcher {
    regex: Regex,
}

impl TagMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(TagMatcher {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Match a tag name (short or full `refs/tags/...` form)
    pub fn match_name(&self, name: &str) -> TagMatch {
        let Some(captures) = self.regex.captures(name) else {
            return TagMatch::NoMatch;
        };

        let group = |key: &str| captures.name(key).map(|m| m.as_str()).unwrap_or("");
        let (major, minor, patch) = (group("major"), group("minor"), group("patch"));
        let core = format!("{}.{}.{}", major, minor, patch);

        let version = match SemVer::parse(&core) {
            Ok(version) => version,
            Err(e) => {
                return TagMatch::Unparsable {
                    reason: e.to_string(),
                }
            }
        };

        let version_text = match captures.name("version") {
            Some(m) => m.as_str().to_string(),
            None => core,
        };

        TagMatch::Version {
            version_text,
            version,
        }
    }
}

/// Strip the `refs/tags/` prefix from a reference name
pub fn short_tag_name(reference: &str) -> &str {
    reference.strip_prefix("refs/tags/").unwrap_or(reference)
}
