use std::fmt;

/// Warnings that occur while resolving a version near repository boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag matched the pattern but does not resolve to a commit
    MalformedTag { tag: String, kind: String },
    /// Tag matched the pattern but its version cannot be parsed
    UnparsableTag { tag: String, reason: String },
    /// No ancestor of HEAD carries a matching tag
    NoMatchingTag { commits: u32 },
    /// HEAD is not on a branch
    DetachedHead { hash: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MalformedTag { tag, kind } => {
                write!(
                    f,
                    "Skipping tag '{}': it points to a {} instead of a commit",
                    tag, kind
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoMatchingTag { commits } => {
                write!(
                    f,
                    "No matching tag found in history; counting all {} commits",
                    commits
                )
            }
            BoundaryWarning::DetachedHead { hash } => {
                let short_hash = if hash.len() > 8 { &hash[..8] } else { hash.as_str() };
                write!(f, "HEAD is detached at {}", short_hash)
            }
        }
    }
}
