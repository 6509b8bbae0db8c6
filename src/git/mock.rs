use crate::error::{Result, VersionerError};
use crate::git::{Ancestry, RepoObject, Repository, TagRef};
use git2::Oid;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct MockCommit {
    parents: Vec<Oid>,
    message: String,
}

/// In-memory repository for testing without actual git operations
///
/// Commits must be added parents-first; the walk order is the reverse of
/// insertion order restricted to commits reachable from the start point.
pub struct MockRepository {
    identity: PathBuf,
    next_id: u32,
    commits: HashMap<Oid, MockCommit>,
    order: Vec<Oid>,
    objects: HashMap<Oid, RepoObject>,
    tags: Vec<TagRef>,
    head: Option<Oid>,
    branch: String,
    dirty: bool,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            identity: PathBuf::from("mock"),
            next_id: 0,
            commits: HashMap::new(),
            order: Vec::new(),
            objects: HashMap::new(),
            tags: Vec::new(),
            head: None,
            branch: "main".to_string(),
            dirty: false,
        }
    }

    /// Use a distinct cache identity
    pub fn with_identity(mut self, identity: impl Into<PathBuf>) -> Self {
        self.identity = identity.into();
        self
    }

    fn next_oid(&mut self) -> Oid {
        self.next_id += 1;
        let mut bytes = [0u8; 20];
        bytes[16..].copy_from_slice(&self.next_id.to_be_bytes());
        bytes[0] = 0xc0;
        Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero())
    }

    /// Add a commit with explicit parents without moving HEAD
    pub fn add_commit(&mut self, message: impl Into<String>, parents: &[Oid]) -> Oid {
        let oid = self.next_oid();
        self.commits.insert(
            oid,
            MockCommit {
                parents: parents.to_vec(),
                message: message.into(),
            },
        );
        self.order.push(oid);
        oid
    }

    /// Add a commit on top of HEAD and move HEAD to it
    pub fn commit(&mut self, message: impl Into<String>) -> Oid {
        let parents: Vec<Oid> = self.head.into_iter().collect();
        let oid = self.add_commit(message, &parents);
        self.head = Some(oid);
        oid
    }

    /// Add a merge of HEAD and `other` and move HEAD to it
    pub fn merge(&mut self, message: impl Into<String>, other: Oid) -> Oid {
        let mut parents: Vec<Oid> = self.head.into_iter().collect();
        parents.push(other);
        let oid = self.add_commit(message, &parents);
        self.head = Some(oid);
        oid
    }

    /// Add a non-commit object such as a tree or blob
    pub fn add_object(&mut self, kind: impl Into<String>) -> Oid {
        let oid = self.next_oid();
        self.objects.insert(oid, RepoObject::Other(kind.into()));
        oid
    }

    /// Add an annotated tag object pointing at `target` without a reference
    pub fn add_tag_object(&mut self, target: Oid) -> Oid {
        let oid = self.next_oid();
        self.objects.insert(oid, RepoObject::Tag { target });
        oid
    }

    /// Add a lightweight tag reference
    pub fn tag_lightweight(&mut self, name: &str, target: Oid) {
        self.tags.push(TagRef {
            name: format!("refs/tags/{}", name),
            target,
            peeled: None,
        });
    }

    /// Add an annotated tag object plus its reference, returning the tag object id
    pub fn tag_annotated(&mut self, name: &str, target: Oid) -> Oid {
        let tag_oid = self.add_tag_object(target);
        self.tags.push(TagRef {
            name: format!("refs/tags/{}", name),
            target: tag_oid,
            peeled: None,
        });
        tag_oid
    }

    /// Add a tag reference with a cached peeled id
    pub fn tag_peeled(&mut self, name: &str, target: Oid, peeled: Oid) {
        self.tags.push(TagRef {
            name: format!("refs/tags/{}", name),
            target,
            peeled: Some(peeled),
        });
    }

    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    fn missing(oid: Oid) -> VersionerError {
        VersionerError::ObjectRead(git2::Error::from_str(&format!(
            "object not found: {}",
            oid
        )))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn identity(&self) -> PathBuf {
        self.identity.clone()
    }

    fn head_commit(&self) -> Result<Oid> {
        self.head.ok_or(VersionerError::NoHead)
    }

    fn ancestry(&self, from: Oid) -> Result<Ancestry<'_>> {
        if !self.commits.contains_key(&from) {
            return Err(Self::missing(from));
        }

        let mut reachable = HashSet::new();
        let mut pending = vec![from];
        while let Some(oid) = pending.pop() {
            if !reachable.insert(oid) {
                continue;
            }
            let commit = self.commits.get(&oid).ok_or_else(|| Self::missing(oid))?;
            pending.extend(commit.parents.iter().copied());
        }

        let walk: Vec<Oid> = self
            .order
            .iter()
            .rev()
            .filter(|oid| reachable.contains(*oid))
            .copied()
            .collect();

        Ok(Box::new(walk.into_iter().map(Ok)))
    }

    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn read_object(&self, oid: Oid) -> Result<RepoObject> {
        if self.commits.contains_key(&oid) {
            return Ok(RepoObject::Commit);
        }
        self.objects
            .get(&oid)
            .cloned()
            .ok_or_else(|| Self::missing(oid))
    }

    fn commit_message(&self, oid: Oid) -> Result<String> {
        self.commits
            .get(&oid)
            .map(|c| c.message.clone())
            .ok_or_else(|| Self::missing(oid))
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn create_tag(&mut self, name: &str, target: Oid, message: Option<&str>) -> Result<()> {
        let full_name = format!("refs/tags/{}", name);
        if self.tags.iter().any(|t| t.name == full_name) {
            return Err(VersionerError::ObjectRead(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }

        match message {
            Some(_) => {
                self.tag_annotated(name, target);
            }
            None => self.tag_lightweight(name, target),
        }
        Ok(())
    }

    fn commit_empty(&mut self, message: &str) -> Result<Oid> {
        self.head_commit()?;
        Ok(self.commit(message))
    }
}
