//! Backward scan from the caret to find the token being typed.
//!
//! For every trigger, in sorted order, the scanner walks left from the caret
//! until it finds the trigger tag (or, for the empty tag, the last space). The
//! token between the tag and the caret must satisfy the token regex at every
//! step. A nested option tree additionally lets the path separator split the
//! token into key segments; only the right-most segment is completed.

use crate::config::Config;
use crate::error::ConfigError;
use crate::options::{self, OptionSource};
use crate::trigger::{self, TriggerDescriptor};
use regex::Regex;
use std::ops::Range;

/// The token under the caret and its filtered candidates.
///
/// `match_start` and `match_length` are char offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDescriptor {
    pub trigger: String,
    /// Text right before `match_start`: the trigger tag, or the path separator inside a nested path.
    pub opener: String,
    pub match_start: usize,
    pub match_length: usize,
    pub candidates: Vec<String>,
}

impl MatchDescriptor {
    /// Gating: a list worth showing has several candidates, or one that still extends the typed text.
    pub fn has_completions(&self) -> bool {
        match self.candidates.as_slice() {
            [] => false,
            [only] => only.chars().count() != self.match_length,
            _ => true,
        }
    }
}

/// A config compiled for repeated scanning.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: Config,
    token_re: Regex,
    triggers: Vec<TriggerDescriptor>,
}

impl Scanner {
    pub fn new(config: &Config) -> Result<Scanner, ConfigError> {
        let token_re = config.compile_regex()?;
        let triggers = trigger::build(&config.triggers, &token_re);
        Ok(Scanner {
            config: config.clone(),
            token_re,
            triggers,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn triggers(&self) -> &[TriggerDescriptor] {
        &self.triggers
    }

    /// Scan `text` at `caret` (a char offset, clamped to the text length).
    pub fn scan(&self, text: &str, caret: usize, source: &OptionSource) -> Option<MatchDescriptor> {
        let chars: Vec<char> = text.chars().collect();
        self.scan_chars(&chars, caret, source)
    }

    pub(crate) fn scan_chars(
        &self,
        text: &[char],
        caret: usize,
        source: &OptionSource,
    ) -> Option<MatchDescriptor> {
        let caret = caret.min(text.len());
        if caret == 0 {
            return None;
        }

        let mut found = None;
        for desc in &self.triggers {
            let Some(opts) = source.for_trigger(&desc.tag) else {
                tracing::trace!(tag = %desc.tag, "no options for trigger");
                continue;
            };
            let boundary = if desc.is_empty() {
                self.word_boundary(text, caret)
            } else {
                self.tag_boundary(desc, text, caret, opts.is_nested())
            };
            let Some((token_start, opener)) = boundary else {
                continue;
            };
            let Some(raw) = options::resolve_chars(
                &desc.tag,
                text,
                token_start,
                source,
                &self.config.path_separator,
            ) else {
                continue;
            };

            let typed: String = text[token_start..caret].iter().collect();
            let candidates = filter_candidates(raw, &typed, self.config.match_any);
            tracing::trace!(
                tag = %desc.tag,
                token_start,
                typed = %typed,
                candidates = candidates.len(),
                "trigger matched"
            );
            // later triggers overwrite earlier ones
            found = Some(MatchDescriptor {
                trigger: desc.tag.clone(),
                opener,
                match_start: token_start,
                match_length: caret - token_start,
                candidates,
            });
        }
        found
    }

    // Empty trigger: the token starts after the last space at or before the caret.
    fn word_boundary(&self, text: &[char], caret: usize) -> Option<(usize, String)> {
        let upto = (caret + 1).min(text.len());
        let token_start = text[..upto]
            .iter()
            .rposition(|&c| c == ' ')
            .map_or(0, |idx| idx + 1);
        if token_start > caret || caret - token_start < self.config.min_chars {
            return None;
        }
        Some((token_start, String::new()))
    }

    fn tag_boundary(
        &self,
        desc: &TriggerDescriptor,
        text: &[char],
        caret: usize,
        nested: bool,
    ) -> Option<(usize, String)> {
        let sep: Vec<char> = self.config.path_separator.chars().collect();
        let tag: Vec<char> = desc.tag.chars().collect();
        // right end of the segment the regex is checked against
        let mut segment_end = caret;
        // token start after the right-most path separator, when inside a nested path
        let mut path_start: Option<usize> = None;

        let mut i = caret;
        while i > 0 {
            i -= 1;
            let tag_start = if desc.tag_matches_token_regex {
                i as isize
            } else {
                i as isize - desc.length as isize + 1
            };
            if tag_start < 0 {
                return None;
            }
            let tag_start = tag_start as usize;
            if occurs_at(text, tag_start, &tag) {
                return Some(match path_start {
                    Some(start) => (start, self.config.path_separator.clone()),
                    None => (tag_start + desc.length, desc.tag.clone()),
                });
            }

            if nested && !sep.is_empty() && i + 1 >= sep.len() {
                let sep_start = i + 1 - sep.len();
                if occurs_at(text, sep_start, &sep) {
                    if path_start.is_none() {
                        path_start = Some(i + 1);
                    }
                    segment_end = sep_start;
                    i = sep_start;
                    continue;
                }
            }

            let segment: String = text[i..segment_end].iter().collect();
            if !self.token_re.is_match(&segment) {
                return None;
            }
        }
        None
    }
}

fn occurs_at(text: &[char], start: usize, needle: &[char]) -> bool {
    text.get(start..start + needle.len()) == Some(needle)
}

/// Keep candidates containing `typed` (case-insensitive); prefix-only unless `match_any`.
pub fn filter_candidates(raw: Vec<String>, typed: &str, match_any: bool) -> Vec<String> {
    let needle = typed.to_lowercase();
    raw.into_iter()
        .filter(|c| match c.to_lowercase().find(&needle) {
            Some(idx) => match_any || idx == 0,
            None => false,
        })
        .collect()
}

/// Char range of the first case-insensitive occurrence of `typed` in `candidate`.
pub fn highlight_span(candidate: &str, typed: &str) -> Option<Range<usize>> {
    let cand: Vec<char> = candidate.chars().collect();
    let n = typed.chars().count();
    if n > cand.len() {
        return None;
    }
    let needle = typed.to_lowercase();
    (0..=cand.len() - n)
        .find(|&s| cand[s..s + n].iter().collect::<String>().to_lowercase() == needle)
        .map(|s| s..s + n)
}

/// One-shot scan that compiles `config` on every call.
pub fn scan(
    text: &str,
    caret: usize,
    source: &OptionSource,
    config: &Config,
) -> Result<Option<MatchDescriptor>, ConfigError> {
    Ok(Scanner::new(config)?.scan(text, caret, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerSet;

    fn list(items: &[&str]) -> OptionSource {
        OptionSource::FlatList(items.iter().map(|s| s.to_string()).collect())
    }

    fn with_triggers(tags: &[&str]) -> Config {
        Config {
            triggers: TriggerSet::Many(tags.iter().map(|s| s.to_string()).collect()),
            ..Config::default()
        }
    }

    #[test]
    fn scanner_keeps_a_sorted_trigger_table() {
        let scanner = Scanner::new(&with_triggers(&["@", "#", "@"])).unwrap();
        let tags: Vec<&str> = scanner.triggers().iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, ["#", "@"]);
    }

    #[test]
    fn prefix_match_after_trigger() {
        let m = scan("hello @wor", 10, &list(&["world", "work", "word-up", "sword"]), &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(m.trigger, "@");
        assert_eq!(m.opener, "@");
        assert_eq!(m.match_start, 7);
        assert_eq!(m.match_length, 3);
        assert_eq!(m.candidates, vec!["world", "work", "word-up"]);
    }

    #[test]
    fn match_any_keeps_substrings_in_source_order() {
        let config = Config {
            match_any: true,
            ..Config::default()
        };
        let m = scan("@or", 3, &list(&["network", "orbit", "pear", "sword"]), &config)
            .unwrap()
            .unwrap();
        assert_eq!(m.candidates, vec!["network", "orbit", "sword"]);
    }

    #[test]
    fn case_insensitive_filter() {
        let m = scan("@AL", 3, &list(&["alice", "Alfred", "bob"]), &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(m.candidates, vec!["alice", "Alfred"]);
    }

    #[test]
    fn no_trigger_no_match() {
        let src = list(&["world"]);
        for (text, caret) in [("hello world", 11), ("", 0), ("a", 1), ("no tags here", 5)] {
            assert_eq!(scan(text, caret, &src, &Config::default()).unwrap(), None, "{text}");
        }
    }

    #[test]
    fn caret_zero_never_matches() {
        assert_eq!(scan("@abc", 0, &list(&["abc"]), &Config::default()).unwrap(), None);
    }

    #[test]
    fn committed_token_followed_by_separator_does_not_rematch() {
        assert_eq!(
            scan("hello @world ", 13, &list(&["world"]), &Config::default()).unwrap(),
            None
        );
    }

    #[test]
    fn bare_trigger_offers_everything() {
        let m = scan("hi @", 4, &list(&["a", "b"]), &Config::default()).unwrap().unwrap();
        assert_eq!(m.match_start, 4);
        assert_eq!(m.match_length, 0);
        assert_eq!(m.candidates, vec!["a", "b"]);
    }

    #[test]
    fn caret_inside_text_scans_only_left_part() {
        let m = scan("@wor and more", 3, &list(&["world", "wombat"]), &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(m.match_length, 2);
        assert_eq!(m.candidates, vec!["world", "wombat"]);
    }

    #[test]
    fn multi_char_trigger() {
        let m = scan("see ::fo", 8, &list(&["foo", "bar"]), &with_triggers(&["::"]))
            .unwrap()
            .unwrap();
        assert_eq!(m.trigger, "::");
        assert_eq!(m.match_start, 6);
        assert_eq!(m.candidates, vec!["foo"]);
    }

    #[test]
    fn tag_longer_than_text() {
        assert_eq!(scan("x", 1, &list(&["x"]), &with_triggers(&["::"])).unwrap(), None);
    }

    #[test]
    fn last_sorted_trigger_wins() {
        // "" sorts before "@" and both see a token ending at the caret
        let src = OptionSource::from_json_str(r#"{"": ["@tagline"], "@": ["tagger"]}"#).unwrap();
        let alone = scan("hey @ta", 7, &src, &with_triggers(&[""])).unwrap().unwrap();
        assert_eq!(alone.match_start, 4);
        assert_eq!(alone.candidates, vec!["@tagline"]);

        let m = scan("hey @ta", 7, &src, &with_triggers(&["@", ""])).unwrap().unwrap();
        assert_eq!(m.trigger, "@");
        assert_eq!(m.match_start, 5);
        assert_eq!(m.candidates, vec!["tagger"]);
    }

    #[test]
    fn trigger_without_options_cannot_match() {
        let src = OptionSource::from_json_str(r##"{"#": ["rust"]}"##).unwrap();
        assert_eq!(scan("@ru", 3, &src, &with_triggers(&["@", "#"])).unwrap(), None);
    }

    #[test]
    fn empty_trigger_matches_current_word() {
        let config = with_triggers(&[""]);
        let m = scan("say hel", 7, &list(&["hello", "help", "yes"]), &config)
            .unwrap()
            .unwrap();
        assert_eq!(m.trigger, "");
        assert_eq!(m.opener, "");
        assert_eq!(m.match_start, 4);
        assert_eq!(m.candidates, vec!["hello", "help"]);
    }

    #[test]
    fn empty_trigger_respects_min_chars() {
        let config = Config {
            min_chars: 3,
            ..with_triggers(&[""])
        };
        assert_eq!(scan("say he", 6, &list(&["hello"]), &config).unwrap(), None);
        assert!(scan("say hel", 7, &list(&["hello"]), &config).unwrap().is_some());
    }

    #[test]
    fn word_trigger_that_matches_the_regex() {
        // tag start is the scan index itself when the tag is a valid token
        let m = scan("x to", 4, &list(&["o"]), &with_triggers(&["to"]));
        let m = m.unwrap().unwrap();
        assert_eq!(m.match_start, 4);
        assert_eq!(m.match_length, 0);
    }

    #[test]
    fn nested_path_completes_last_segment() {
        let src = OptionSource::from_json_str(r#"{"@": {"team": {"alice": 1, "bob": 1}}}"#).unwrap();
        let m = scan("@team.al", 8, &src, &Config::default()).unwrap().unwrap();
        assert_eq!(m.trigger, "@");
        assert_eq!(m.opener, ".");
        assert_eq!(m.match_start, 6);
        assert_eq!(m.match_length, 2);
        assert_eq!(m.candidates, vec!["alice"]);
    }

    #[test]
    fn nested_path_must_reach_the_trigger() {
        let src = OptionSource::from_json_str(r#"{"@": {"team": {"alice": 1}}}"#).unwrap();
        assert_eq!(scan("team.al", 7, &src, &Config::default()).unwrap(), None);
        assert_eq!(scan("@te am.al", 9, &src, &Config::default()).unwrap(), None);
    }

    #[test]
    fn separator_breaks_flat_tokens() {
        assert_eq!(
            scan("@team.al", 8, &list(&["alice"]), &Config::default()).unwrap(),
            None
        );
    }

    #[test]
    fn invalid_regex_is_a_config_error() {
        let config = Config {
            token_regex: "[".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            scan("@a", 2, &list(&["a"]), &config),
            Err(ConfigError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn non_ascii_offsets_are_chars() {
        let m = scan("héllo @zoë", 10, &list(&["zoë", "zora"]), &Config {
            token_regex: r"^\w+$".to_string(),
            ..Config::default()
        })
        .unwrap()
        .unwrap();
        assert_eq!(m.match_start, 7);
        assert_eq!(m.match_length, 3);
        assert_eq!(m.candidates, vec!["zoë"]);
    }

    #[test]
    fn highlight_is_case_insensitive_char_range() {
        assert_eq!(highlight_span("Network", "WOR"), Some(3..6));
        assert_eq!(highlight_span("zoë", "oë"), Some(1..3));
        assert_eq!(highlight_span("bob", ""), Some(0..0));
        assert_eq!(highlight_span("al", "alice"), None);
    }

    #[test]
    fn single_exact_candidate_has_nothing_to_complete() {
        let m = scan("@world", 6, &list(&["world"]), &Config::default()).unwrap().unwrap();
        assert!(!m.has_completions());
        let m = scan("@wor", 4, &list(&["world"]), &Config::default()).unwrap().unwrap();
        assert!(m.has_completions());
    }
}
