//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository reads
//! that version resolution needs, plus the two writes the CLI performs
//! (tagging and keyword commits).
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! Resolution code depends on the [Repository] trait rather than a concrete
//! implementation.
//!
//! ```rust
//! # use git_versioner::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_versioner::Result<()> {
//! let head = repo.head_commit()?;
//! for oid in repo.ancestry(head)? {
//!     println!("{}", oid?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::PathBuf;

/// A reference under `refs/tags/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Full reference name, e.g. `refs/tags/v1.2.3`
    pub name: String,
    /// Object the reference points at directly
    pub target: Oid,
    /// Cached peeled object id, when the ref store has one
    pub peeled: Option<Oid>,
}

/// The part of a repository object that dereferencing cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoObject {
    Commit,
    /// Annotated tag pointing at `target`
    Tag { target: Oid },
    /// Tree, blob or anything else, named by kind
    Other(String),
}

impl RepoObject {
    pub fn kind_name(&self) -> &str {
        match self {
            RepoObject::Commit => "commit",
            RepoObject::Tag { .. } => "tag",
            RepoObject::Other(kind) => kind,
        }
    }
}

/// Commit ids in reverse-chronological, topological order
pub type Ancestry<'a> = Box<dyn Iterator<Item = Result<Oid>> + 'a>;

/// Repository operations used by version resolution
///
/// ## Error Handling
///
/// Read failures surface as [crate::error::VersionerError::ObjectRead] and a
/// repository without commits as [crate::error::VersionerError::NoHead].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation with an in-memory commit graph
pub trait Repository {
    /// Stable identity used as a cache key, typically the `.git` directory
    fn identity(&self) -> PathBuf;

    /// Commit that HEAD resolves to
    ///
    /// # Returns
    /// * `Ok(Oid)` - The HEAD commit
    /// * `Err(NoHead)` - If the repository has no commits yet
    fn head_commit(&self) -> Result<Oid>;

    /// Walk ancestry starting at (and including) `from`
    ///
    /// Every commit is yielded once; merge commits are treated like any other
    /// commit and each commit is yielded before all of its parents.
    fn ancestry(&self, from: Oid) -> Result<Ancestry<'_>>;

    /// All tag references, in discovery order
    fn tag_refs(&self) -> Result<Vec<TagRef>>;

    /// Read the kind (and tag target) of an object
    fn read_object(&self, oid: Oid) -> Result<RepoObject>;

    /// Full message of a commit
    fn commit_message(&self, oid: Oid) -> Result<String>;

    /// Current branch name, or the full HEAD hash when detached
    fn current_branch(&self) -> Result<String>;

    /// Whether the working tree has uncommitted changes (submodules ignored)
    fn is_dirty(&self) -> Result<bool>;

    /// Create a tag at `target`; annotated when `message` is given
    fn create_tag(&mut self, name: &str, target: Oid, message: Option<&str>) -> Result<()>;

    /// Create a commit on HEAD that reuses the HEAD tree
    fn commit_empty(&mut self, message: &str) -> Result<Oid>;
}
