//! Main workflow orchestration logic
//!
//! Each subcommand of the binary maps to one function here, so the
//! workflows can be driven programmatically (and tested) without clap.

use anyhow::{bail, Context, Result};
use git2::Oid;
use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::cache::ResolutionCache;
use crate::codec::properties::{prefixed, strip_prefix, CONFIG_PREFIX, STATE_PREFIX, VERSION_KEY};
use crate::codec::{FlatProperties, StructuredValue};
use crate::config::{Config, StrategyKind};
use crate::domain::commit::KeywordMatcher;
use crate::domain::state::ResolvedVersionState;
use crate::domain::VersionBump;
use crate::git::Repository;
use crate::strategy::VersionStrategy;

/// Arguments for the version workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionWorkflowArgs {
    /// Version to use instead of resolving one
    pub version_override: Option<String>,

    /// Pattern to render instead of the configured one
    pub pattern: Option<String>,
}

/// Result of a successful version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The rendered version string
    pub version: String,

    /// Name of the strategy that produced it
    pub strategy: String,

    /// Resolved state, absent for an override
    pub state: Option<ResolvedVersionState>,

    /// Non-fatal conditions met during resolution
    pub warnings: Vec<BoundaryWarning>,
}

/// Typed view of a persisted properties file
#[derive(Debug, Clone, PartialEq)]
pub struct StoredVersion {
    pub version: Option<String>,
    pub config: Config,
    pub state: Option<ResolvedVersionState>,
}

impl StoredVersion {
    /// Strategy the stored configuration selects
    pub fn strategy_name(&self) -> &'static str {
        if self.config.override_version().is_some() {
            return "override";
        }
        match self.config.strategy {
            StrategyKind::Tag => "tag",
            StrategyKind::Keyword => "keyword",
        }
    }
}

/// Merge CLI overrides into the loaded configuration
pub fn apply_overrides(mut config: Config, args: &VersionWorkflowArgs) -> Config {
    if let Some(version) = &args.version_override {
        config.version_override = Some(version.clone());
    }
    config
}

/// Resolve and render the version
///
/// 1. Apply CLI overrides to the configuration
/// 2. Select the strategy and resolve the repository state
/// 3. Render with the explicit pattern, or the strategy's configured one
pub fn run_version_workflow<R: Repository + ?Sized>(
    repo: &R,
    args: &VersionWorkflowArgs,
    config: &Config,
    cache: &ResolutionCache,
) -> Result<WorkflowResult> {
    let config = apply_overrides(config.clone(), args);
    let selection = VersionStrategy::select(repo, &config, cache)
        .context("Failed to resolve version")?;

    let version = match &args.pattern {
        Some(pattern) => selection.strategy.render(pattern),
        None => selection.strategy.version(&config),
    };
    info!(%version, strategy = selection.strategy.name(), "rendered version");

    Ok(WorkflowResult {
        version,
        strategy: selection.strategy.name().to_string(),
        state: selection.strategy.state().cloned(),
        warnings: selection.warnings,
    })
}

/// Flat properties for a workflow result
///
/// The resolved state goes under `versioner.state`, configuration fields
/// that differ from their defaults under `versioner.config`, and the
/// rendered version under `versioner.version`.
pub fn build_properties(
    result: &WorkflowResult,
    config: &Config,
    cache: &ResolutionCache,
) -> Result<FlatProperties> {
    let mut flat = FlatProperties::new();

    if let Some(state) = &result.state {
        let value = StructuredValue::from_serialize(state)?;
        flat.extend(value.flatten_under(STATE_PREFIX));
    }

    let changed = cache.changed_properties(config)?;
    flat.extend(prefixed(&changed, CONFIG_PREFIX));
    flat.insert(VERSION_KEY.to_string(), result.version.clone());

    Ok(flat)
}

/// Nested JSON form of flat properties
pub fn properties_json(flat: &FlatProperties) -> serde_json::Value {
    StructuredValue::rebuild(flat).to_json()
}

/// Read back what [`build_properties`] wrote
pub fn restore_properties(flat: &FlatProperties) -> Result<StoredVersion> {
    let config: Config = StructuredValue::rebuild_as(&strip_prefix(flat, CONFIG_PREFIX))
        .context("Invalid configuration properties")?;

    let state_entries = strip_prefix(flat, STATE_PREFIX);
    let state = if state_entries.is_empty() {
        None
    } else {
        let mut state: ResolvedVersionState = StructuredValue::rebuild_as(&state_entries)
            .context("Invalid state properties")?;
        state.release_branches = config.release_branches.clone();
        Some(state)
    };

    Ok(StoredVersion {
        version: flat.get(VERSION_KEY).cloned(),
        config,
        state,
    })
}

/// Create an empty commit whose message requests `bump`
pub fn run_commit_workflow<R: Repository + ?Sized>(
    repo: &mut R,
    config: &Config,
    bump: VersionBump,
    message: Option<&str>,
) -> Result<Oid> {
    if config.keywords.use_regex {
        bail!("Keywords are regular expressions; cannot write a keyword commit");
    }

    let keyword = KeywordMatcher::keyword_for(&config.keywords, bump);
    if keyword.is_empty() {
        bail!("No keyword configured for a {:?} bump", bump);
    }

    let text = match message {
        Some(message) => format!("{} {}", keyword, message),
        None => keyword.to_string(),
    };
    let oid = repo
        .commit_empty(&text)
        .context("Failed to create keyword commit")?;
    info!(commit = %oid, message = %text, "created keyword commit");
    Ok(oid)
}

/// Tag HEAD with `prefix` + `version`
///
/// # Returns
/// * `Ok(String)` - The created tag name
/// * `Err` - If the name is not a valid tag name or the tag exists
pub fn run_tag_workflow<R: Repository + ?Sized>(
    repo: &mut R,
    version: &str,
    prefix: Option<&str>,
    message: Option<&str>,
) -> Result<String> {
    let name = format!("{}{}", prefix.unwrap_or(""), version);
    if !git2::Reference::is_valid_name(&format!("refs/tags/{}", name)) {
        bail!("'{}' is not a valid tag name", name);
    }

    let head = repo.head_commit()?;
    repo.create_tag(&name, head, message)
        .with_context(|| format!("Failed to create tag '{}'", name))?;
    info!(tag = %name, commit = %head, "created tag");
    Ok(name)
}
