//! Memoisation shared across resolutions
//!
//! Entries are inserted once and never invalidated. When two callers race to
//! fill the same key, the first insert wins and both get that value. Use a
//! fresh cache when the repository may have changed.

use crate::codec::{retain_changed, FlatProperties, StructuredValue};
use crate::domain::tag::TagMatcher;
use crate::error::Result;
use crate::git::Repository;
use crate::resolver::TagIndex;
use dashmap::DashMap;
use serde::Serialize;
use std::any::TypeId;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ResolutionCache {
    tag_indexes: DashMap<(PathBuf, String), Arc<TagIndex>>,
    defaults: DashMap<TypeId, Arc<FlatProperties>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag index for `repo` under `matcher`, built on first use
    pub fn tag_index<R: Repository + ?Sized>(
        &self,
        repo: &R,
        matcher: &TagMatcher,
    ) -> Result<Arc<TagIndex>> {
        let key = (repo.identity(), matcher.pattern().to_string());
        if let Some(index) = self.tag_indexes.get(&key) {
            debug!(repo = %key.0.display(), "tag index cache hit");
            return Ok(Arc::clone(index.value()));
        }

        let built = Arc::new(TagIndex::build(repo, matcher)?);
        let entry = self.tag_indexes.entry(key).or_insert(built);
        Ok(Arc::clone(entry.value()))
    }

    /// Flattened `T::default()`, computed once per type
    pub fn defaults<T: Default + Serialize + 'static>(&self) -> Result<Arc<FlatProperties>> {
        let key = TypeId::of::<T>();
        if let Some(flat) = self.defaults.get(&key) {
            return Ok(Arc::clone(flat.value()));
        }

        let computed = Arc::new(StructuredValue::from_serialize(&T::default())?.flatten());
        let entry = self.defaults.entry(key).or_insert(computed);
        Ok(Arc::clone(entry.value()))
    }

    /// Flattened entries of `value` that differ from `T::default()`
    pub fn changed_properties<T: Default + Serialize + 'static>(
        &self,
        value: &T,
    ) -> Result<FlatProperties> {
        let defaults = self.defaults::<T>()?;
        let flat = StructuredValue::from_serialize(value)?.flatten();
        Ok(retain_changed(flat, &defaults))
    }
}
