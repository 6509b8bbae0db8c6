use crate::domain::branch::BranchContext;
use crate::domain::refs::RefData;
use crate::domain::version::SemVer;
use crate::pattern::{self, KeywordToken, TagToken};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag reported when no matching tag is reachable
pub const DEFAULT_TAG: &str = "0.0.0";

const SNAPSHOT_MARKER: &str = "SNAPSHOT";
const DIRTY_MARKER: &str = "dirty";

/// Version-relevant facts of the working state, built once per resolution
///
/// Both rendering modes read from this one type: the tag strategy through
/// [`TagToken`], the keyword strategy through [`KeywordToken`]. The release
/// branch set is carried along from the configuration so that `%B` can be
/// derived without looking the configuration up again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedVersionState {
    pub tag: String,
    pub version: SemVer,
    pub refs: RefData,
    pub commits: u32,
    pub dirty: bool,
    #[serde(skip)]
    pub release_branches: Vec<String>,
}

impl Default for ResolvedVersionState {
    fn default() -> Self {
        ResolvedVersionState {
            tag: DEFAULT_TAG.to_string(),
            version: SemVer::new(0, 0, 0),
            refs: RefData::default(),
            commits: 0,
            dirty: false,
            release_branches: Vec::new(),
        }
    }
}

impl ResolvedVersionState {
    pub fn branch(&self) -> BranchContext {
        BranchContext::new(self.refs.branch.clone(), &self.release_branches)
    }

    /// `SNAPSHOT` when commits were made since the tag
    pub fn snapshot_marker(&self) -> &'static str {
        if self.commits > 0 {
            SNAPSHOT_MARKER
        } else {
            ""
        }
    }

    pub fn dirty_marker(&self) -> &'static str {
        if self.dirty {
            DIRTY_MARKER
        } else {
            ""
        }
    }

    pub fn tag_values(&self) -> HashMap<TagToken, String> {
        let branch = self.branch();
        HashMap::from([
            (TagToken::Tag, self.tag.clone()),
            (TagToken::Commits, self.commits.to_string()),
            (TagToken::Snapshot, self.snapshot_marker().to_string()),
            (TagToken::DevBranch, branch.dev_branch().to_string()),
            (TagToken::Branch, branch.name),
            (TagToken::HashShort, self.refs.hash_short().to_string()),
            (TagToken::Hash, self.refs.hash.clone()),
            (TagToken::Dirty, self.dirty_marker().to_string()),
        ])
    }

    pub fn keyword_values(&self) -> HashMap<KeywordToken, String> {
        let branch = self.branch();
        HashMap::from([
            (KeywordToken::Major, self.version.major().to_string()),
            (KeywordToken::Minor, self.version.minor().to_string()),
            (KeywordToken::Patch, self.version.patch().to_string()),
            (KeywordToken::Commits, self.commits.to_string()),
            (KeywordToken::Snapshot, self.snapshot_marker().to_string()),
            (KeywordToken::DevBranch, branch.dev_branch().to_string()),
            (KeywordToken::Branch, branch.name),
            (KeywordToken::HashShort, self.refs.hash_short().to_string()),
            (KeywordToken::Hash, self.refs.hash.clone()),
            (KeywordToken::Dirty, self.dirty_marker().to_string()),
        ])
    }

    /// Render with the tag-strategy token set
    pub fn render_tag(&self, pattern: &str) -> String {
        pattern::render(pattern, &self.tag_values())
    }

    /// Render with the keyword-strategy token set
    pub fn render_keyword(&self, pattern: &str) -> String {
        pattern::render(pattern, &self.keyword_values())
    }
}
