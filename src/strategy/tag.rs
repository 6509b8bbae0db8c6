//! Nearest-tag strategy
//!
//! Walks history from HEAD until the first commit carrying a matching tag.
//! Commits visited before it are the commits since the tag.

use super::{reference_state, Resolution};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::state::{ResolvedVersionState, DEFAULT_TAG};
use crate::domain::tag::{TagCandidate, TagMatcher};
use crate::domain::SemVer;
use crate::error::Result;
use crate::git::Repository;
use crate::resolver::TagIndex;
use git2::Oid;
use tracing::{debug, info};

/// Outcome of walking history against a tag index
#[derive(Debug, Clone, PartialEq)]
pub struct WalkResult {
    /// Highest tag on the nearest tagged ancestor, if any
    pub tag: Option<TagCandidate>,
    /// Commits visited before the tagged commit, or all commits if none
    pub commits: u32,
}

/// Walk ancestry from `head` until a commit with a matching tag
pub fn walk<R: Repository + ?Sized>(repo: &R, head: Oid, index: &TagIndex) -> Result<WalkResult> {
    let mut commits = 0u32;

    for oid in repo.ancestry(head)? {
        let oid = oid?;
        if let Some(best) = index.best(oid) {
            debug!(tag = %best.name, commit = %oid, commits, "found nearest tag");
            return Ok(WalkResult {
                tag: Some(best.clone()),
                commits,
            });
        }
        commits = commits.saturating_add(1);
    }

    debug!(commits, "history exhausted without a matching tag");
    Ok(WalkResult { tag: None, commits })
}

/// Resolve the working state with a freshly built tag index
pub fn resolve<R: Repository + ?Sized>(repo: &R, config: &Config) -> Result<ResolvedVersionState> {
    let matcher = TagMatcher::new(&config.tag_pattern)?;
    let index = TagIndex::build(repo, &matcher)?;
    Ok(resolve_with_index(repo, config, &index)?.state)
}

/// Resolve the working state against an existing tag index
///
/// Warnings from building the index are carried into the result.
pub fn resolve_with_index<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    index: &TagIndex,
) -> Result<Resolution> {
    let head = repo.head_commit()?;
    let (refs, dirty, mut warnings) = reference_state(repo, head)?;
    warnings.splice(0..0, index.warnings().iter().cloned());

    let outcome = walk(repo, head, index)?;
    let (tag, version) = match outcome.tag {
        Some(candidate) => (candidate.version_text, candidate.version),
        None => {
            let warning = BoundaryWarning::NoMatchingTag {
                commits: outcome.commits,
            };
            info!("{}", warning);
            warnings.push(warning);
            (DEFAULT_TAG.to_string(), SemVer::new(0, 0, 0))
        }
    };

    let state = ResolvedVersionState {
        tag,
        version,
        refs,
        commits: outcome.commits,
        dirty,
        release_branches: config.release_branches.clone(),
    };

    Ok(Resolution { state, warnings })
}
