use serde::{Deserialize, Serialize};

/// Length of the abbreviated commit hash
pub const SHORT_HASH_LEN: usize = 8;

/// Branch name and commit hash captured for one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefData {
    pub branch: String,
    pub hash: String,
}

impl RefData {
    pub fn new(branch: impl Into<String>, hash: impl Into<String>) -> Self {
        RefData {
            branch: branch.into(),
            hash: hash.into(),
        }
    }

    /// First eight characters of the hash
    pub fn hash_short(&self) -> &str {
        match self.hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_short() {
        let refs = RefData::new("main", "c9f54782bf4a4d6e9d0e4ad6c8b4d1d0a3d9a1f2");
        assert_eq!(refs.hash_short(), "c9f54782");
    }

    #[test]
    fn test_hash_short_of_short_hash() {
        assert_eq!(RefData::new("main", "abc").hash_short(), "abc");
        assert_eq!(RefData::default().hash_short(), "");
    }
}
