use crate::boundary::BoundaryWarning;
use crate::domain::tag::{short_tag_name, TagCandidate, TagMatch, TagMatcher};
use crate::error::{Result, VersionerError};
use crate::git::{Repository, TagRef};
use crate::resolver::deref::peel_to_commit;
use git2::Oid;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Matching tags grouped by the commit they resolve to
///
/// Candidates for each commit are sorted highest version first; equal
/// versions keep the order in which their tags were discovered.
#[derive(Debug, Default)]
pub struct TagIndex {
    by_commit: HashMap<Oid, Vec<TagCandidate>>,
    warnings: Vec<BoundaryWarning>,
}

impl TagIndex {
    /// Index every tag of `repo` whose name matches `matcher`
    ///
    /// Tags that fail to parse or do not reach a commit are skipped and
    /// recorded as warnings; object read failures abort the build.
    pub fn build<R: Repository + ?Sized>(repo: &R, matcher: &TagMatcher) -> Result<Self> {
        let mut index = TagIndex::default();

        for tag_ref in repo.tag_refs()? {
            let name = short_tag_name(&tag_ref.name).to_string();

            let (version_text, version) = match match_tag(matcher, &tag_ref) {
                TagMatch::NoMatch => continue,
                TagMatch::Unparsable { reason } => {
                    index.skip(BoundaryWarning::UnparsableTag { tag: name, reason });
                    continue;
                }
                TagMatch::Version {
                    version_text,
                    version,
                } => (version_text, version),
            };

            let target = match peel_to_commit(repo, &tag_ref) {
                Ok(oid) => oid,
                Err(VersionerError::MalformedTag { tag, kind }) => {
                    index.skip(BoundaryWarning::MalformedTag { tag, kind });
                    continue;
                }
                Err(e) => return Err(e),
            };

            index
                .by_commit
                .entry(target)
                .or_default()
                .push(TagCandidate {
                    name,
                    version_text,
                    version,
                    target,
                });
        }

        for candidates in index.by_commit.values_mut() {
            candidates.sort_by(|a, b| b.version.cmp(&a.version));
        }

        debug!(
            commits = index.by_commit.len(),
            skipped = index.warnings.len(),
            "built tag index"
        );
        Ok(index)
    }

    fn skip(&mut self, warning: BoundaryWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Candidates on `commit`, highest version first
    pub fn candidates(&self, commit: Oid) -> &[TagCandidate] {
        self.by_commit
            .get(&commit)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highest candidate on `commit`
    pub fn best(&self, commit: Oid) -> Option<&TagCandidate> {
        self.candidates(commit).first()
    }

    /// Number of tagged commits
    pub fn len(&self) -> usize {
        self.by_commit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_commit.is_empty()
    }

    /// Tags skipped while building the index
    pub fn warnings(&self) -> &[BoundaryWarning] {
        &self.warnings
    }
}

/// Match the short name first, then the full reference name
fn match_tag(matcher: &TagMatcher, tag_ref: &TagRef) -> TagMatch {
    match matcher.match_name(short_tag_name(&tag_ref.name)) {
        TagMatch::NoMatch => matcher.match_name(&tag_ref.name),
        found => found,
    }
}
