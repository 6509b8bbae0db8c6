//! Domain logic - pure version rules independent of git operations

pub mod branch;
pub mod commit;
pub mod identifier;
pub mod refs;
pub mod state;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use commit::KeywordMatcher;
pub use identifier::Identifier;
pub use refs::RefData;
pub use state::{ResolvedVersionState, DEFAULT_TAG};
pub use tag::{TagCandidate, TagMatch, TagMatcher, DEFAULT_TAG_PATTERN};
pub use version::{SemVer, VersionBump};
