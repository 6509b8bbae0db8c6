//! Version strategies
//!
//! A strategy turns repository state into a version string:
//!
//! - override: a configured version, used verbatim without touching history
//! - [tag]: nearest matching ancestor tag plus commits since it
//! - [keyword]: version bumped by keywords in commit messages

pub mod keyword;
pub mod tag;

use crate::boundary::BoundaryWarning;
use crate::cache::ResolutionCache;
use crate::config::{Config, StrategyKind};
use crate::domain::refs::RefData;
use crate::domain::state::ResolvedVersionState;
use crate::domain::tag::TagMatcher;
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;
use tracing::{info, warn};

/// Resolved state plus the non-fatal conditions met on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub state: ResolvedVersionState,
    pub warnings: Vec<BoundaryWarning>,
}

/// The strategy chosen for a repository and its resolved state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStrategy {
    Override(String),
    Tag(ResolvedVersionState),
    Keyword(ResolvedVersionState),
}

/// Strategy selection outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub strategy: VersionStrategy,
    pub warnings: Vec<BoundaryWarning>,
}

impl VersionStrategy {
    /// Pick and run the strategy for `config`
    ///
    /// A non-empty override short-circuits before HEAD is read, so it works
    /// even in a repository without commits.
    pub fn select<R: Repository + ?Sized>(
        repo: &R,
        config: &Config,
        cache: &ResolutionCache,
    ) -> Result<Selection> {
        if let Some(version) = config.override_version() {
            info!(version, "using version override");
            return Ok(Selection {
                strategy: VersionStrategy::Override(version.to_string()),
                warnings: Vec::new(),
            });
        }

        let (strategy, warnings) = match config.strategy {
            StrategyKind::Tag => {
                let matcher = TagMatcher::new(&config.tag_pattern)?;
                let index = cache.tag_index(repo, &matcher)?;
                let resolution = tag::resolve_with_index(repo, config, &index)?;
                (VersionStrategy::Tag(resolution.state), resolution.warnings)
            }
            StrategyKind::Keyword => {
                let resolution = keyword::resolve_reported(repo, config)?;
                (VersionStrategy::Keyword(resolution.state), resolution.warnings)
            }
        };

        info!(strategy = strategy.name(), "resolved version state");
        Ok(Selection { strategy, warnings })
    }

    pub fn name(&self) -> &'static str {
        match self {
            VersionStrategy::Override(_) => "override",
            VersionStrategy::Tag(_) => "tag",
            VersionStrategy::Keyword(_) => "keyword",
        }
    }

    /// Resolved state, absent for an override
    pub fn state(&self) -> Option<&ResolvedVersionState> {
        match self {
            VersionStrategy::Override(_) => None,
            VersionStrategy::Tag(state) | VersionStrategy::Keyword(state) => Some(state),
        }
    }

    /// Render `pattern` with this strategy's token set
    pub fn render(&self, pattern: &str) -> String {
        match self {
            VersionStrategy::Override(version) => version.clone(),
            VersionStrategy::Tag(state) => state.render_tag(pattern),
            VersionStrategy::Keyword(state) => state.render_keyword(pattern),
        }
    }

    /// Render with the pattern configured for this strategy
    pub fn version(&self, config: &Config) -> String {
        match self {
            VersionStrategy::Override(_) | VersionStrategy::Tag(_) => {
                self.render(&config.version_pattern)
            }
            VersionStrategy::Keyword(_) => self.render(&config.keyword_pattern),
        }
    }
}

/// Branch, hash and dirty flag for `head`
pub(crate) fn reference_state<R: Repository + ?Sized>(
    repo: &R,
    head: Oid,
) -> Result<(RefData, bool, Vec<BoundaryWarning>)> {
    let hash = head.to_string();
    let branch = repo.current_branch()?;
    let dirty = repo.is_dirty()?;

    let mut warnings = Vec::new();
    if branch == hash {
        let warning = BoundaryWarning::DetachedHead { hash: hash.clone() };
        warn!("{}", warning);
        warnings.push(warning);
    }

    Ok((RefData::new(branch, hash), dirty, warnings))
}
