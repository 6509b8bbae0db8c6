use crate::domain::identifier::Identifier;
use crate::error::{Result, VersionerError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const COMPONENT_SHAPE: &str = "a non-negative integer without leading zeros";

/// Semantic version with prerelease and build identifiers
///
/// Ordering compares major, minor and patch, then the prerelease identifiers
/// pairwise, where a shorter list is lesser once all shared elements are equal.
/// Build identifiers only break the remaining ties so that the order stays
/// consistent with equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVer {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<Identifier>,
}

impl SemVer {
    /// Create a plain `major.minor.patch` version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Create a version from signed components, rejecting negatives
    pub fn from_components(major: i64, minor: i64, patch: i64) -> Result<Self> {
        let check = |value: i64| {
            u64::try_from(value)
                .map_err(|_| VersionerError::invalid_identifier(value.to_string(), COMPONENT_SHAPE))
        };
        Ok(SemVer::new(check(major)?, check(minor)?, check(patch)?))
    }

    /// Attach validated prerelease identifiers
    pub fn with_prerelease<S: AsRef<str>>(mut self, identifiers: &[S]) -> Result<Self> {
        self.prerelease = identifiers
            .iter()
            .map(|s| Identifier::parse(s.as_ref()))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Attach validated build identifiers
    pub fn with_build<S: AsRef<str>>(mut self, identifiers: &[S]) -> Result<Self> {
        self.build = identifiers
            .iter()
            .map(|s| Identifier::parse(s.as_ref()))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Parse `1.2.3`, `v1.2.3-rc.1` or `1.2.3+build.5`
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[Identifier] {
        &self.build
    }

    /// Bump version according to bump type, dropping prerelease and build data
    ///
    /// A component already at `u64::MAX` stays there.
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        match bump_type {
            VersionBump::Major => SemVer::new(self.major.saturating_add(1), 0, 0),
            VersionBump::Minor => SemVer::new(self.major, self.minor.saturating_add(1), 0),
            VersionBump::Patch => {
                SemVer::new(self.major, self.minor, self.patch.saturating_add(1))
            }
        }
    }
}

fn parse_component(raw: &str, whole: &str) -> Result<u64> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(VersionerError::invalid_identifier(
            whole,
            format!("major.minor.patch with {}", COMPONENT_SHAPE),
        ));
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return Err(VersionerError::invalid_identifier(raw, COMPONENT_SHAPE));
    }
    raw.parse::<u64>()
        .map_err(|_| VersionerError::invalid_identifier(raw, COMPONENT_SHAPE))
}

impl FromStr for SemVer {
    type Err = VersionerError;

    fn from_str(s: &str) -> Result<Self> {
        let clean = s.trim_start_matches(['v', 'V']);

        let (rest, build) = match clean.split_once('+') {
            Some((rest, build)) => (rest, Identifier::parse_list(build)?),
            None => (clean, Vec::new()),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, Identifier::parse_list(pre)?),
            None => (rest, Vec::new()),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionerError::invalid_identifier(
                s,
                "a version of the form X.Y.Z",
            ));
        }

        Ok(SemVer {
            major: parse_component(parts[0], s)?,
            minor: parse_component(parts[1], s)?,
            patch: parse_component(parts[2], s)?,
            prerelease,
            build,
        })
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        let join = |ids: &[Identifier]| {
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".")
        };
        if !self.prerelease.is_empty() {
            write!(f, "-{}", join(&self.prerelease))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", join(&self.build))?;
        }
        Ok(())
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemVer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = SemVer::parse("v1.2.3").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.patch(), 3);
    }

    #[test]
    fn test_version_parse_without_v() {
        assert_eq!(SemVer::parse("1.2.3").unwrap(), SemVer::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_prerelease_and_build() {
        let v = SemVer::parse("1.2.3-rc.1+build.5").unwrap();
        assert_eq!(
            v.prerelease(),
            &[
                Identifier::Alphanumeric("rc".to_string()),
                Identifier::Numeric(1)
            ]
        );
        assert_eq!(v.build().len(), 2);
        assert_eq!(v.to_string(), "1.2.3-rc.1+build.5");
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(SemVer::parse("1.2").is_err());
        assert!(SemVer::parse("v1.2.3.4").is_err());
        assert!(SemVer::parse("1.02.3").is_err());
        assert!(SemVer::parse("1.2.3-").is_err());
        assert!(SemVer::parse("1.2.3-0001234").is_err());
    }

    #[test]
    fn test_negative_component_rejected() {
        let err = SemVer::from_components(1, -1, 0).unwrap_err();
        assert!(matches!(err, VersionerError::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("-1"));
        assert_eq!(SemVer::from_components(1, 2, 3).unwrap(), SemVer::new(1, 2, 3));
    }

    #[test]
    fn test_prerelease_validation() {
        assert!(SemVer::new(1, 0, 0).with_prerelease(&["0001234"]).is_err());
        assert!(SemVer::new(1, 0, 0).with_prerelease(&["1000234"]).is_ok());
        assert!(SemVer::new(1, 0, 0).with_build(&["bad_id"]).is_err());
    }

    #[test]
    fn test_ordering_by_components() {
        assert!(SemVer::new(2, 0, 0) > SemVer::new(1, 9, 9));
        assert!(SemVer::new(1, 3, 0) > SemVer::new(1, 2, 9));
        assert!(SemVer::new(1, 2, 4) > SemVer::new(1, 2, 3));
    }

    #[test]
    fn test_ordering_by_prerelease() {
        let numeric = SemVer::parse("1.0.0-1").unwrap();
        let alpha = SemVer::parse("1.0.0-alpha").unwrap();
        let alpha_1 = SemVer::parse("1.0.0-alpha.1").unwrap();
        let beta = SemVer::parse("1.0.0-beta").unwrap();
        assert!(numeric < alpha);
        assert!(alpha < alpha_1);
        assert!(alpha_1 < beta);
        assert!(SemVer::parse("1.0.0-2").unwrap() < SemVer::parse("1.0.0-10").unwrap());
    }

    #[test]
    fn test_shorter_prerelease_list_is_lesser() {
        assert!(SemVer::new(1, 0, 0) < SemVer::parse("1.0.0-alpha").unwrap());
    }

    #[test]
    fn test_build_breaks_ties() {
        let a = SemVer::parse("1.0.0+a").unwrap();
        let b = SemVer::parse("1.0.0+b").unwrap();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_version_bump() {
        let v = SemVer::parse("1.2.3-rc.1").unwrap();
        assert_eq!(v.bump(VersionBump::Major), SemVer::new(2, 0, 0));
        assert_eq!(v.bump(VersionBump::Minor), SemVer::new(1, 3, 0));
        assert_eq!(v.bump(VersionBump::Patch), SemVer::new(1, 2, 4));
    }

    #[test]
    fn test_version_bump_saturates() {
        let top = SemVer::new(u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(top.bump(VersionBump::Major), SemVer::new(u64::MAX, 0, 0));
        assert_eq!(top.bump(VersionBump::Minor), SemVer::new(u64::MAX, u64::MAX, 0));
        assert_eq!(top.bump(VersionBump::Patch), top);
    }

    #[test]
    fn test_serde_uses_display_form() {
        let v = SemVer::parse("1.2.3-rc.1").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
        let back: SemVer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<SemVer>("\"1.x.3\"").is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(SemVer::new(1, 2, 3).to_string(), "1.2.3");
    }
}
