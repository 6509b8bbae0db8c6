//! Ref and tag resolution
//!
//! Dereferences tag references to the commits they target and indexes
//! version tags by commit for the history walk.

pub mod deref;
pub mod tag_index;

pub use deref::{dereference, peel_to_commit, DerefObject};
pub use tag_index::TagIndex;
