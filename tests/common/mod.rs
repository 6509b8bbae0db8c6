// Shared helpers for tests that build real repositories
#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use tempfile::TempDir;

/// Fresh repository on branch `main` with a committer identity configured
pub fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let mut options = RepositoryInitOptions::new();
    options.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &options).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo)
}

fn signature() -> Signature<'static> {
    Signature::now("Test User", "test@example.com").unwrap()
}

/// Commit the current index on HEAD
pub fn commit(repo: &Repository, message: &str) -> Oid {
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap().id()],
        Err(_) => Vec::new(),
    };
    commit_with_parents(repo, Some("HEAD"), message, &parents)
}

/// Commit the current index with explicit parents, optionally updating a ref
pub fn commit_with_parents(
    repo: &Repository,
    update_ref: Option<&str>,
    message: &str,
    parents: &[Oid],
) -> Oid {
    let sig = signature();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parents: Vec<git2::Commit> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

pub fn tag_lightweight(repo: &Repository, name: &str, target: Oid) {
    let object = repo.find_object(target, None).unwrap();
    repo.tag_lightweight(name, &object, false).unwrap();
}

pub fn tag_annotated(repo: &Repository, name: &str, target: Oid) -> Oid {
    let object = repo.find_object(target, None).unwrap();
    repo.tag(name, &object, &signature(), "release", false)
        .unwrap()
}

/// Leave an untracked file in the working tree
pub fn make_dirty(repo: &Repository) {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join("scratch.txt"), "pending").unwrap();
}

pub fn short(oid: Oid) -> String {
    oid.to_string()[..8].to_string()
}
