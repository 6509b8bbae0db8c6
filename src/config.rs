use crate::domain::tag::DEFAULT_TAG_PATTERN;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gitversioner.toml";

/// Default tag-strategy pattern
pub const DEFAULT_VERSION_PATTERN: &str = "%t(-%B)(-%c)(-%S)+%h(.%d)";

/// Default keyword-strategy pattern
pub const DEFAULT_KEYWORD_PATTERN: &str = "%M.%m.%p(-%c)";

/// Represents the complete configuration for git-versioner.
///
/// Holds the strategy choice, tag matching, release branches and the
/// patterns used to render a version string.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub strategy: StrategyKind,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_release_branches")]
    pub release_branches: Vec<String>,

    #[serde(default = "default_version_pattern")]
    pub version_pattern: String,

    #[serde(default = "default_keyword_pattern")]
    pub keyword_pattern: String,

    #[serde(default)]
    pub version_override: Option<String>,

    #[serde(default)]
    pub keywords: KeywordsConfig,

    #[serde(default)]
    pub initial: InitialVersion,
}

/// Which resolution strategy renders the version
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Nearest matching ancestor tag plus commit count
    #[default]
    Tag,
    /// Version computed from keywords in commit messages
    Keyword,
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

fn default_release_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_version_pattern() -> String {
    DEFAULT_VERSION_PATTERN.to_string()
}

fn default_keyword_pattern() -> String {
    DEFAULT_KEYWORD_PATTERN.to_string()
}

fn default_major_keyword() -> String {
    "[major]".to_string()
}

fn default_minor_keyword() -> String {
    "[minor]".to_string()
}

fn default_patch_keyword() -> String {
    "[patch]".to_string()
}

/// Keywords that bump the version in keyword mode.
///
/// With `use_regex` the keywords are regular expressions matched anywhere in
/// the commit message; otherwise they are plain substrings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct KeywordsConfig {
    #[serde(default = "default_major_keyword")]
    pub major: String,

    #[serde(default = "default_minor_keyword")]
    pub minor: String,

    #[serde(default = "default_patch_keyword")]
    pub patch: String,

    #[serde(default)]
    pub use_regex: bool,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        KeywordsConfig {
            major: default_major_keyword(),
            minor: default_minor_keyword(),
            patch: default_patch_keyword(),
            use_regex: false,
        }
    }
}

/// Starting version for keyword mode
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitialVersion {
    #[serde(default)]
    pub major: u64,
    #[serde(default)]
    pub minor: u64,
    #[serde(default)]
    pub patch: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strategy: StrategyKind::default(),
            tag_pattern: default_tag_pattern(),
            release_branches: default_release_branches(),
            version_pattern: default_version_pattern(),
            keyword_pattern: default_keyword_pattern(),
            version_override: None,
            keywords: KeywordsConfig::default(),
            initial: InitialVersion::default(),
        }
    }
}

impl Config {
    /// Non-empty override, if configured
    pub fn override_version(&self) -> Option<&str> {
        self.version_override
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Pattern for the configured strategy
    pub fn active_pattern(&self) -> &str {
        match self.strategy {
            StrategyKind::Tag => &self.version_pattern,
            StrategyKind::Keyword => &self.keyword_pattern,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitversioner.toml` in current directory
/// 3. `.gitversioner.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
