/// Represents the checked-out branch together with its release status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context, marking it as release when it is one of `release_branches`
    pub fn new<S: AsRef<str>>(name: impl Into<String>, release_branches: &[S]) -> Self {
        let name = name.into();
        let is_release = release_branches.iter().any(|b| b.as_ref() == name);

        BranchContext { name, is_release }
    }

    /// Branch name for non-release branches, empty otherwise
    pub fn dev_branch(&self) -> &str {
        if self.is_release {
            ""
        } else {
            &self.name
        }
    }
}
