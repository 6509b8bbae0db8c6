use crate::error::{Result, VersionerError};
use crate::git::{Ancestry, RepoObject, TagRef};
use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo, Sort, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        debug!(path = %repo.path().display(), "opened repository");

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

impl super::Repository for Git2Repository {
    fn identity(&self) -> PathBuf {
        self.repo.path().to_path_buf()
    }

    fn head_commit(&self) -> Result<Oid> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if is_unborn(&e) => return Err(VersionerError::NoHead),
            Err(e) => return Err(e.into()),
        };

        Ok(head.peel_to_commit()?.id())
    }

    fn ancestry(&self, from: Oid) -> Result<Ancestry<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(from)?;

        Ok(Box::new(revwalk.map(|oid| oid.map_err(VersionerError::from))))
    }

    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let (Some(name), Some(target)) = (reference.name(), reference.target()) else {
                continue;
            };

            tags.push(TagRef {
                name: name.to_string(),
                target,
                peeled: reference.target_peel(),
            });
        }

        Ok(tags)
    }

    fn read_object(&self, oid: Oid) -> Result<RepoObject> {
        let object = self.repo.find_object(oid, None)?;

        let resolved = match object.kind() {
            Some(ObjectType::Commit) => RepoObject::Commit,
            Some(ObjectType::Tag) => match object.as_tag() {
                Some(tag) => RepoObject::Tag {
                    target: tag.target_id(),
                },
                None => RepoObject::Other("tag".to_string()),
            },
            Some(kind) => RepoObject::Other(kind.str().to_string()),
            None => RepoObject::Other("unknown".to_string()),
        };

        Ok(resolved)
    }

    fn commit_message(&self, oid: Oid) -> Result<String> {
        let commit = self.repo.find_commit(oid)?;

        Ok(commit.message().unwrap_or("").to_string())
    }

    fn current_branch(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if is_unborn(&e) => return Err(VersionerError::NoHead),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(name.to_string());
            }
        }

        let commit = head.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn create_tag(&mut self, name: &str, target: Oid, message: Option<&str>) -> Result<()> {
        let object = self.repo.find_object(target, None)?;

        match message {
            Some(message) => {
                let signature = self.repo.signature()?;
                self.repo.tag(name, &object, &signature, message, false)?;
            }
            None => {
                self.repo.tag_lightweight(name, &object, false)?;
            }
        }

        Ok(())
    }

    fn commit_empty(&mut self, message: &str) -> Result<Oid> {
        let head = super::Repository::head_commit(self)?;
        let parent = self.repo.find_commit(head)?;
        let tree = parent.tree()?;
        let signature = self.repo.signature()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(oid)
    }
}
