use crate::config::TriggerSet;
use regex::Regex;

/// A configured trigger tag prepared for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDescriptor {
    pub tag: String,
    /// Length of `tag` in chars.
    pub length: usize,
    /// Whether the tag itself is a well-formed token, e.g. a word trigger under the default regex.
    pub tag_matches_token_regex: bool,
}

impl TriggerDescriptor {
    pub fn new(tag: &str, token_re: &Regex) -> Self {
        TriggerDescriptor {
            tag: tag.to_string(),
            length: tag.chars().count(),
            tag_matches_token_regex: token_re.is_match(tag),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Build descriptors sorted by tag; later entries win ties in the scanner.
pub fn build(triggers: &TriggerSet, token_re: &Regex) -> Vec<TriggerDescriptor> {
    let mut tags = triggers.tags();
    tags.sort();
    tags.dedup();
    tags.iter()
        .map(|t| TriggerDescriptor::new(t, token_re))
        .collect()
}
