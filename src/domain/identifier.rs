//! Prerelease and build identifiers
//!
//! An identifier is a dot-separated component such as `rc`, `1` or `x-7`.
//! It must match `^[0-9A-Za-z-]+$`, and a purely numeric identifier must not
//! carry a leading zero.

use crate::error::{Result, VersionerError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const IDENTIFIER_SHAPE: &str = "an identifier matching ^[0-9A-Za-z-]+$";
const NUMERIC_SHAPE: &str = "a numeric identifier without leading zeros";

/// A single prerelease or build identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Purely numeric identifier, compared numerically
    Numeric(u64),
    /// Identifier containing at least one letter or hyphen, compared lexically
    Alphanumeric(String),
}

impl Identifier {
    /// Parse and validate a single identifier
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Parse a dot-separated identifier list such as `rc.1`
    pub fn parse_list(s: &str) -> Result<Vec<Self>> {
        s.split('.').map(Identifier::parse).collect()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl FromStr for Identifier {
    type Err = VersionerError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty()
            || !s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(VersionerError::invalid_identifier(s, IDENTIFIER_SHAPE));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return Err(VersionerError::invalid_identifier(s, NUMERIC_SHAPE));
            }
            let value = s
                .parse::<u64>()
                .map_err(|_| VersionerError::invalid_identifier(s, NUMERIC_SHAPE))?;
            return Ok(Identifier::Numeric(value));
        }

        Ok(Identifier::Alphanumeric(s.to_string()))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::Alphanumeric(_)) => Ordering::Less,
            (Identifier::Alphanumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Alphanumeric(a), Identifier::Alphanumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alphanumeric(s) => write!(f, "{}", s),
        }
    }
}
