//! Keyword strategy
//!
//! Computes a version from keywords in commit messages, oldest first.
//! Each major, minor or patch keyword bumps the version and restarts the
//! commit counter; every other commit increments the counter.

use super::{reference_state, Resolution};
use crate::config::Config;
use crate::domain::commit::KeywordMatcher;
use crate::domain::state::ResolvedVersionState;
use crate::domain::SemVer;
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;
use tracing::debug;

/// Version and commit counter reached after replaying history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTally {
    pub version: SemVer,
    pub commits: u32,
}

/// Replays commit messages against the configured keywords
pub struct KeywordAnalyzer {
    matcher: KeywordMatcher,
    initial: SemVer,
}

impl KeywordAnalyzer {
    /// Create a new analyzer from the keyword and initial version settings
    pub fn new(config: &Config) -> Result<Self> {
        let initial = config.initial;
        Ok(KeywordAnalyzer {
            matcher: KeywordMatcher::new(&config.keywords)?,
            initial: SemVer::new(initial.major, initial.minor, initial.patch),
        })
    }

    /// Analyze commit messages in chronological order
    pub fn analyze_messages<S: AsRef<str>>(&self, messages: &[S]) -> KeywordTally {
        let mut tally = KeywordTally {
            version: self.initial.clone(),
            commits: 0,
        };

        for message in messages {
            match self.matcher.detect(message.as_ref()) {
                Some(bump) => {
                    tally.version = tally.version.bump(bump);
                    tally.commits = 0;
                }
                None => tally.commits = tally.commits.saturating_add(1),
            }
        }

        tally
    }

    /// Analyze every commit reachable from `head`
    pub fn analyze_repository<R: Repository + ?Sized>(
        &self,
        repo: &R,
        head: Oid,
    ) -> Result<KeywordTally> {
        let mut messages = repo
            .ancestry(head)?
            .map(|oid| repo.commit_message(oid?))
            .collect::<Result<Vec<String>>>()?;
        messages.reverse();

        let tally = self.analyze_messages(&messages);
        debug!(
            version = %tally.version,
            commits = tally.commits,
            scanned = messages.len(),
            "keyword analysis finished"
        );
        Ok(tally)
    }
}

/// Resolve the working state from commit keywords
pub fn resolve<R: Repository + ?Sized>(repo: &R, config: &Config) -> Result<ResolvedVersionState> {
    Ok(resolve_reported(repo, config)?.state)
}

/// Resolve the working state and collect non-fatal warnings
pub fn resolve_reported<R: Repository + ?Sized>(repo: &R, config: &Config) -> Result<Resolution> {
    let analyzer = KeywordAnalyzer::new(config)?;
    let head = repo.head_commit()?;
    let (refs, dirty, warnings) = reference_state(repo, head)?;
    let tally = analyzer.analyze_repository(repo, head)?;

    let state = ResolvedVersionState {
        tag: tally.version.to_string(),
        version: tally.version,
        refs,
        commits: tally.commits,
        dirty,
        release_branches: config.release_branches.clone(),
    };

    Ok(Resolution { state, warnings })
}
