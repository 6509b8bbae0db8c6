//! Tag dereferencing
//!
//! A tag reference may point straight at a commit (lightweight tag) or at a
//! chain of annotated tag objects that eventually reaches one. Peeled refs
//! carry the final object id and skip the chain.

use crate::domain::tag::short_tag_name;
use crate::error::{Result, VersionerError};
use crate::git::{RepoObject, Repository, TagRef};
use git2::Oid;
use std::collections::HashSet;

/// One object visited while dereferencing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerefObject {
    pub oid: Oid,
    pub object: RepoObject,
}

/// Outcome of following a tag: the visited chain, or the kind that ended it
enum Chain {
    Commit { commit: Oid, chain: Vec<DerefObject> },
    Dangling(String),
}

fn follow<R: Repository + ?Sized>(repo: &R, tag: &TagRef) -> Result<Chain> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = tag.peeled.unwrap_or(tag.target);

    loop {
        if !seen.insert(current) {
            return Ok(Chain::Dangling("tag cycle".to_string()));
        }

        let object = repo.read_object(current)?;
        match object {
            RepoObject::Commit => {
                chain.push(DerefObject {
                    oid: current,
                    object,
                });
                return Ok(Chain::Commit {
                    commit: current,
                    chain,
                });
            }
            RepoObject::Tag { target } => {
                chain.push(DerefObject {
                    oid: current,
                    object,
                });
                current = target;
            }
            RepoObject::Other(kind) => return Ok(Chain::Dangling(kind)),
        }
    }
}

/// Follow `tag` through annotated tags down to a commit
///
/// The returned chain ends with the commit; it is empty when the chain ends
/// in a tree, blob or other non-commit object. Read failures propagate.
pub fn dereference<R: Repository + ?Sized>(repo: &R, tag: &TagRef) -> Result<Vec<DerefObject>> {
    match follow(repo, tag)? {
        Chain::Commit { chain, .. } => Ok(chain),
        Chain::Dangling(_) => Ok(Vec::new()),
    }
}

/// Commit that `tag` ultimately targets
///
/// # Returns
/// * `Ok(Oid)` - Target commit
/// * `Err(MalformedTag)` - The tag ends in a non-commit object
/// * `Err(ObjectRead)` - An object could not be read
pub fn peel_to_commit<R: Repository + ?Sized>(repo: &R, tag: &TagRef) -> Result<Oid> {
    match follow(repo, tag)? {
        Chain::Commit { commit, .. } => Ok(commit),
        Chain::Dangling(kind) => Err(VersionerError::malformed_tag(
            short_tag_name(&tag.name),
            kind,
        )),
    }
}
