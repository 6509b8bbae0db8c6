// tests/cli_orchestration_test.rs
mod common;

use common::*;
use git_versioner::cache::ResolutionCache;
use git_versioner::cli::orchestration::{
    build_properties, properties_json, restore_properties, run_commit_workflow,
    run_tag_workflow, run_version_workflow, VersionWorkflowArgs, WorkflowResult,
};
use git_versioner::codec::properties::{read_properties_file, write_properties_file};
use git_versioner::config::{Config, StrategyKind};
use git_versioner::domain::VersionBump;
use git_versioner::git::Git2Repository;
use tempfile::TempDir;

#[test]
fn test_workflow_result_structure() {
    let result = WorkflowResult {
        version: "1.2.3".to_string(),
        strategy: "override".to_string(),
        state: None,
        warnings: Vec::new(),
    };

    assert_eq!(result.version, "1.2.3");
    assert_eq!(result.strategy, "override");
    assert!(result.state.is_none());
}

#[test]
fn test_version_workflow_args_default() {
    let args = VersionWorkflowArgs::default();
    assert_eq!(args.version_override, None);
    assert_eq!(args.pattern, None);
}

#[test]
fn test_properties_file_roundtrip() {
    let (dir, repo) = init_repo();
    let tagged = commit(&repo, "release");
    tag_lightweight(&repo, "v4.1.0", tagged);
    let head = commit(&repo, "after release");
    make_dirty(&repo);

    let versioner = Git2Repository::open(dir.path()).unwrap();
    let cache = ResolutionCache::new();
    let config = Config {
        release_branches: vec!["release".to_string()],
        ..Config::default()
    };
    let result =
        run_version_workflow(&versioner, &VersionWorkflowArgs::default(), &config, &cache)
            .unwrap();
    assert_eq!(
        result.version,
        format!("4.1.0-main-1-SNAPSHOT+{}.dirty", short(head))
    );

    let flat = build_properties(&result, &config, &cache).unwrap();
    assert_eq!(flat["versioner.state.dirty"], "true");
    assert_eq!(flat["versioner.state.refs.hash"], head.to_string());
    assert_eq!(flat["versioner.config.release_branches.1"], "release");

    let out = TempDir::new().unwrap();
    let path = out.path().join("version.properties");
    write_properties_file(&path, &flat).unwrap();
    let stored = restore_properties(&read_properties_file(&path).unwrap()).unwrap();

    assert_eq!(stored.config, config);
    assert_eq!(stored.state, result.state);
    assert_eq!(stored.version, Some(result.version));
}

#[test]
fn test_properties_json_nests_state() {
    let (dir, repo) = init_repo();
    commit(&repo, "a");

    let versioner = Git2Repository::open(dir.path()).unwrap();
    let cache = ResolutionCache::new();
    let config = Config::default();
    let result =
        run_version_workflow(&versioner, &VersionWorkflowArgs::default(), &config, &cache)
            .unwrap();
    let json = properties_json(&build_properties(&result, &config, &cache).unwrap());

    assert_eq!(json["versioner"]["state"]["tag"], "0.0.0");
    assert_eq!(json["versioner"]["state"]["commits"], "1");
    assert_eq!(json["versioner"]["state"]["refs"]["branch"], "main");
    assert!(json["versioner"].get("config").is_none());
}

#[test]
fn test_commit_then_resolve_keyword_version() {
    let (dir, repo) = init_repo();
    commit(&repo, "initial");

    let mut versioner = Git2Repository::open(dir.path()).unwrap();
    let config = Config {
        strategy: StrategyKind::Keyword,
        ..Config::default()
    };
    run_commit_workflow(&mut versioner, &config, VersionBump::Major, Some("new api")).unwrap();
    run_commit_workflow(&mut versioner, &config, VersionBump::Minor, None).unwrap();

    let result = run_version_workflow(
        &versioner,
        &VersionWorkflowArgs::default(),
        &config,
        &ResolutionCache::new(),
    )
    .unwrap();
    assert_eq!(result.version, "1.1.0");
    assert_eq!(result.strategy, "keyword");
}

#[test]
fn test_tag_then_resolve() {
    let (dir, repo) = init_repo();
    let head = commit(&repo, "initial");

    let mut versioner = Git2Repository::open(dir.path()).unwrap();
    let name = run_tag_workflow(&mut versioner, "1.0.0", Some("v"), Some("first release")).unwrap();
    assert_eq!(name, "v1.0.0");

    let args = VersionWorkflowArgs {
        pattern: Some("%t(-%c)".to_string()),
        ..VersionWorkflowArgs::default()
    };
    let result =
        run_version_workflow(&versioner, &args, &Config::default(), &ResolutionCache::new())
            .unwrap();
    assert_eq!(result.version, "1.0.0");
    assert_eq!(result.state.unwrap().refs.hash, head.to_string());
}

#[test]
fn test_override_argument_short_circuits() {
    let (dir, _repo) = init_repo();
    let versioner = Git2Repository::open(dir.path()).unwrap();
    let args = VersionWorkflowArgs {
        version_override: Some("0.9.0".to_string()),
        ..VersionWorkflowArgs::default()
    };

    let result =
        run_version_workflow(&versioner, &args, &Config::default(), &ResolutionCache::new())
            .unwrap();
    assert_eq!(result.version, "0.9.0");
    assert_eq!(result.strategy, "override");
}
