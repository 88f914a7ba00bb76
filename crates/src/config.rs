//! Engine configuration.
//!
//! Field names deserialize in camelCase so a config file reads like the
//! component props it replaces:
//!
//! ```json
//! { "trigger": ["@", "#"], "minChars": 1, "matchAny": true }
//! ```

use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_TOKEN_REGEX: &str = r"^[A-Za-z0-9\-_]+$";

/// One trigger tag or a set of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TriggerSet {
    One(String),
    Many(Vec<String>),
}

impl TriggerSet {
    pub fn tags(&self) -> Vec<String> {
        match self {
            TriggerSet::One(tag) => vec![tag.clone()],
            TriggerSet::Many(tags) => tags.clone(),
        }
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        TriggerSet::One("@".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    #[serde(alias = "trigger")]
    pub triggers: TriggerSet,
    pub min_chars: usize,
    #[serde(alias = "disableMinChars")]
    pub disable_min_chars_for: Vec<String>,
    pub match_any: bool,
    #[serde(alias = "regex")]
    pub token_regex: String,
    pub request_only_if_no_options: bool,
    #[serde(alias = "spacer")]
    pub separator: String,
    #[serde(alias = "spaceRemovers")]
    pub separator_removable_chars: Vec<String>,
    #[serde(alias = "disableSpacerOn")]
    pub disable_separator_for: Vec<String>,
    /// Separates keys of a nested option path, as in `@team.alice`.
    pub path_separator: String,
    /// Cap on rendered candidates; 0 shows all of them.
    pub max_options: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            triggers: TriggerSet::default(),
            min_chars: 0,
            disable_min_chars_for: Vec::new(),
            match_any: false,
            token_regex: DEFAULT_TOKEN_REGEX.to_string(),
            request_only_if_no_options: true,
            separator: " ".to_string(),
            separator_removable_chars: [",", ".", "!", "?"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            disable_separator_for: Vec::new(),
            path_separator: ".".to_string(),
            max_options: 0,
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_json_str(&s)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Compile the token regex so a bad pattern fails at load time instead of per keystroke.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compile_regex().map(|_| ())
    }

    pub(crate) fn compile_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.token_regex).map_err(|source| ConfigError::InvalidRegex {
            pattern: self.token_regex.clone(),
            source,
        })
    }

    pub(crate) fn separator_disabled_for(&self, trigger: &str) -> bool {
        self.disable_separator_for.iter().any(|t| t == trigger)
    }

    pub(crate) fn min_chars_disabled_for(&self, trigger: &str) -> bool {
        self.disable_min_chars_for.iter().any(|t| t == trigger)
    }

    pub(crate) fn is_removable(&self, c: char) -> bool {
        self.separator_removable_chars
            .iter()
            .any(|s| s.chars().count() == 1 && s.starts_with(c))
    }
}
