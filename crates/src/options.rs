//! Option sources and candidate resolution.
//!
//! A source is either one flat list shared by every trigger, or a map from
//! trigger tag to an option tree. Trees are addressed by the key path written
//! just before the token (`@team.al` walks `team` then completes `al`).

use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionNode {
    Flat(Vec<String>),
    Nested(IndexMap<String, OptionNode>),
    /// Terminal value inside a tree, e.g. the `1` in `{"alice": 1}`.
    Leaf(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionSource {
    FlatList(Vec<String>),
    ByTrigger(IndexMap<String, OptionNode>),
}

impl Default for OptionSource {
    fn default() -> Self {
        OptionSource::FlatList(Vec::new())
    }
}

/// Result of walking a key path through an option tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a OptionNode),
    NotFound,
}

/// The options a single trigger draws from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerOptions<'a> {
    List(&'a [String]),
    Node(&'a OptionNode),
}

impl TriggerOptions<'_> {
    pub fn is_nested(&self) -> bool {
        matches!(self, TriggerOptions::Node(OptionNode::Nested(_)))
    }
}

impl OptionNode {
    pub fn walk<S: AsRef<str>>(&self, path: &[S]) -> Lookup<'_> {
        let mut cur = self;
        for key in path {
            match cur {
                OptionNode::Nested(children) => match children.get(key.as_ref()) {
                    Some(child) => cur = child,
                    None => return Lookup::NotFound,
                },
                _ => return Lookup::NotFound,
            }
        }
        Lookup::Found(cur)
    }

    /// Candidate strings offered by this node: list entries, or the keys of a mapping.
    pub fn candidates(&self) -> Vec<String> {
        match self {
            OptionNode::Flat(list) => list.clone(),
            OptionNode::Nested(children) => children.keys().cloned().collect(),
            OptionNode::Leaf(_) => Vec::new(),
        }
    }
}

impl OptionSource {
    pub fn from_json_str(s: &str) -> Result<OptionSource, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<OptionSource, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let source = OptionSource::from_json_str(&s)?;
        tracing::debug!(path = %path.display(), "loaded option source");
        Ok(source)
    }

    /// Options for `tag`; `None` when a per-trigger source has no entry for it.
    pub fn for_trigger(&self, tag: &str) -> Option<TriggerOptions<'_>> {
        match self {
            OptionSource::FlatList(list) => Some(TriggerOptions::List(list)),
            OptionSource::ByTrigger(map) => map.get(tag).map(|node| match node {
                OptionNode::Flat(list) => TriggerOptions::List(list),
                other => TriggerOptions::Node(other),
            }),
        }
    }

    /// Number of flat candidates, or of trigger tags for a per-trigger source.
    pub fn len(&self) -> usize {
        match self {
            OptionSource::FlatList(list) => list.len(),
            OptionSource::ByTrigger(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key path written before `token_start`, from the last space up to the token.
pub fn key_path(text: &[char], token_start: usize, tag: &str, path_separator: &str) -> Vec<String> {
    let token_start = token_start.min(text.len());
    let from = text[..(token_start + 1).min(text.len())]
        .iter()
        .rposition(|&c| c == ' ')
        .unwrap_or(0)
        .min(token_start);
    let raw: String = text[from..token_start].iter().collect();

    let mut pieces = vec![raw];
    for delim in [tag, path_separator] {
        if delim.is_empty() {
            continue;
        }
        pieces = pieces
            .iter()
            .flat_map(|p| p.split(delim).map(str::to_string).collect::<Vec<_>>())
            .collect();
    }
    pieces
        .into_iter()
        .map(|p| p.trim().replace(['\'', '"'], ""))
        .filter(|p| !p.is_empty())
        .collect()
}

pub(crate) fn resolve_chars(
    tag: &str,
    text: &[char],
    token_start: usize,
    source: &OptionSource,
    path_separator: &str,
) -> Option<Vec<String>> {
    match source.for_trigger(tag)? {
        TriggerOptions::List(list) => Some(list.to_vec()),
        TriggerOptions::Node(node) => {
            let path = key_path(text, token_start, tag, path_separator);
            match node.walk(&path) {
                Lookup::Found(found) => Some(found.candidates()),
                Lookup::NotFound => {
                    tracing::trace!(?path, tag, "option path not found");
                    Some(Vec::new())
                }
            }
        }
    }
}

/// Raw, unfiltered candidates for `tag` at `token_start` (a char offset into `text`).
pub fn resolve(
    tag: &str,
    text: &str,
    token_start: usize,
    source: &OptionSource,
    path_separator: &str,
) -> Option<Vec<String>> {
    let chars: Vec<char> = text.chars().collect();
    resolve_chars(tag, &chars, token_start, source, path_separator)
}
