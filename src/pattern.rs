//! Version pattern rendering
//!
//! A pattern mixes literal text, bare tokens such as `%t`, and optional groups
//! such as `(-%c)`. Tokens are processed one at a time in a fixed order. For
//! each token, every innermost parenthesised group holding it is either
//! dropped (when the value is empty or `"0"`) or unwrapped with the value
//! substituted; bare occurrences are then replaced with the value as-is.
//!
//! ```
//! use git_versioner::pattern::{render, TagToken};
//! use std::collections::HashMap;
//!
//! let values = HashMap::from([
//!     (TagToken::Tag, "1.2.3".to_string()),
//!     (TagToken::Commits, "0".to_string()),
//! ]);
//! assert_eq!(render("%t(-%c)", &values), "1.2.3");
//! ```

use std::collections::HashMap;
use std::hash::Hash;

/// A closed set of substitution points for one rendering mode
pub trait PatternToken: Copy + Eq + Hash + 'static {
    /// Every token in processing order
    fn all() -> &'static [Self];

    /// Literal placeholder, e.g. `%t`
    fn placeholder(self) -> &'static str;
}

/// Tokens of the tag-based strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagToken {
    Tag,
    Commits,
    Snapshot,
    Branch,
    DevBranch,
    HashShort,
    Hash,
    Dirty,
}

impl PatternToken for TagToken {
    fn all() -> &'static [Self] {
        &[
            TagToken::Tag,
            TagToken::Commits,
            TagToken::Snapshot,
            TagToken::Branch,
            TagToken::DevBranch,
            TagToken::HashShort,
            TagToken::Hash,
            TagToken::Dirty,
        ]
    }

    fn placeholder(self) -> &'static str {
        match self {
            TagToken::Tag => "%t",
            TagToken::Commits => "%c",
            TagToken::Snapshot => "%S",
            TagToken::Branch => "%b",
            TagToken::DevBranch => "%B",
            TagToken::HashShort => "%h",
            TagToken::Hash => "%H",
            TagToken::Dirty => "%d",
        }
    }
}

/// Tokens of the keyword-based strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordToken {
    Major,
    Minor,
    Patch,
    Commits,
    Snapshot,
    Branch,
    DevBranch,
    HashShort,
    Hash,
    Dirty,
}

impl PatternToken for KeywordToken {
    fn all() -> &'static [Self] {
        &[
            KeywordToken::Major,
            KeywordToken::Minor,
            KeywordToken::Patch,
            KeywordToken::Commits,
            KeywordToken::Snapshot,
            KeywordToken::Branch,
            KeywordToken::DevBranch,
            KeywordToken::HashShort,
            KeywordToken::Hash,
            KeywordToken::Dirty,
        ]
    }

    fn placeholder(self) -> &'static str {
        match self {
            KeywordToken::Major => "%M",
            KeywordToken::Minor => "%m",
            KeywordToken::Patch => "%p",
            KeywordToken::Commits => "%c",
            KeywordToken::Snapshot => "%S",
            KeywordToken::Branch => "%b",
            KeywordToken::DevBranch => "%B",
            KeywordToken::HashShort => "%h",
            KeywordToken::Hash => "%H",
            KeywordToken::Dirty => "%d",
        }
    }
}

/// A value counts as empty when it is `""` or `"0"`
pub fn is_empty_value(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// Render `pattern`, looking every token up in `values` (absent means empty)
pub fn render<T: PatternToken>(pattern: &str, values: &HashMap<T, String>) -> String {
    T::all().iter().fold(pattern.to_string(), |acc, token| {
        let value = values.get(token).map(String::as_str).unwrap_or("");
        substitute(&acc, token.placeholder(), value)
    })
}

/// Apply a single placeholder to `pattern`
///
/// Innermost groups are found in one left-to-right pass. Substituted values
/// are never rescanned, so parentheses inside a value stay literal.
pub fn substitute(pattern: &str, placeholder: &str, value: &str) -> String {
    let drop_group = is_empty_value(value);
    let mut out = String::with_capacity(pattern.len());
    let mut open = None;

    for c in pattern.chars() {
        match c {
            '(' => {
                open = Some(out.len());
                out.push(c);
            }
            ')' => match open.take() {
                Some(start) if out[start + 1..].contains(placeholder) => {
                    let inner = out[start + 1..].replacen(placeholder, value, 1);
                    out.truncate(start);
                    if !drop_group {
                        out.push_str(&inner);
                    }
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }

    out.replace(placeholder, value)
}
