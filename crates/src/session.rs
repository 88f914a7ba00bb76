//! Suggestion session: the state machine driven by the host's editing events.
//!
//! The session owns a copy of the current buffer and caret and always re-derives
//! its match from them, so a late `OptionsUpdated` never applies to stale text.

use crate::config::Config;
use crate::error::ConfigError;
use crate::options::OptionSource;
use crate::rewrite;
use crate::scan::{MatchDescriptor, Scanner};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Where the host wants the popup anchored, in its own units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Anchor {
    pub top: i32,
    pub left: i32,
}

/// Whether the next text change may move punctuation in front of the separator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpaceRemoval {
    #[default]
    Disarmed,
    Armed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub visible: bool,
    pub matched: Option<MatchDescriptor>,
    pub selected: usize,
    pub anchor: Option<Anchor>,
    pub space_removal: SpaceRemoval,
}

impl SessionState {
    pub fn candidates(&self) -> &[String] {
        self.matched
            .as_ref()
            .map(|m| m.candidates.as_slice())
            .unwrap_or(&[])
    }

    /// Candidates a renderer should show; `max == 0` shows all.
    pub fn visible_candidates(&self, max: usize) -> &[String] {
        let all = self.candidates();
        if max == 0 {
            all
        } else {
            &all[..all.len().min(max)]
        }
    }

    pub fn selected_candidate(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.candidates().get(self.selected).map(String::as_str)
    }
}

/// Events the host feeds into the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    TextChanged { text: String, caret: usize },
    OptionsUpdated(OptionSource),
    Navigate(Direction),
    Commit(usize),
    CommitSelected,
    Cancel,
}

/// What an event did, so the host knows whether to redraw or rewrite its buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Suggesting,
    Idle,
    /// The space-removal pass fired; the host should adopt this buffer.
    Rewritten { text: String, caret: usize },
    /// A candidate was inserted; the host should adopt this buffer.
    Committed { text: String, caret: usize },
}

/// Callbacks from the session to its host.
pub trait Host {
    /// More candidates are wanted for `partial`; answer later with `OptionsUpdated`.
    fn request_more_options(&mut self, _partial: &str) {}

    fn committed(&mut self, _text: &str) {}

    /// Text inserted for a chosen candidate.
    fn render(&self, trigger: &str, candidate: &str) -> String {
        format!("{trigger}{candidate}")
    }

    fn caret_anchor(&self, _caret: usize) -> Option<Anchor> {
        None
    }
}

/// Host that ignores every callback.
pub struct NoHost;

impl Host for NoHost {}

#[derive(Debug, Clone)]
pub struct SuggestionSession {
    scanner: Scanner,
    source: OptionSource,
    text: String,
    caret: usize,
    state: SessionState,
}

impl SuggestionSession {
    pub fn new(config: &Config, source: OptionSource) -> Result<Self, ConfigError> {
        Ok(SuggestionSession {
            scanner: Scanner::new(config)?,
            source,
            text: String::new(),
            caret: 0,
            state: SessionState::default(),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        self.scanner.config()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn source(&self) -> &OptionSource {
        &self.source
    }

    /// Text typed so far for the current match.
    pub fn typed(&self) -> Option<String> {
        let m = self.state.matched.as_ref()?;
        Some(
            self.text
                .chars()
                .skip(m.match_start)
                .take(m.match_length)
                .collect(),
        )
    }

    /// Swap in a new configuration; on error the session keeps the old one.
    pub fn replace_config(&mut self, config: &Config) -> Result<(), ConfigError> {
        self.scanner = Scanner::new(config)?;
        self.hide();
        Ok(())
    }

    pub fn update<H: Host>(&mut self, msg: Msg, host: &mut H) -> Outcome {
        match msg {
            Msg::TextChanged { text, caret } => self.text_changed(&text, caret, host),
            Msg::OptionsUpdated(source) => self.options_updated(source, host),
            Msg::Navigate(direction) => self.navigate(direction),
            Msg::Commit(index) => self.commit(index, host),
            Msg::CommitSelected => self.commit_selected(host),
            Msg::Cancel => self.cancel(),
        }
    }

    pub fn text_changed<H: Host>(&mut self, text: &str, caret: usize, host: &mut H) -> Outcome {
        let old = std::mem::replace(&mut self.text, text.to_string());
        self.caret = caret.min(self.text.chars().count());

        if self.text.is_empty() {
            self.state.space_removal = SpaceRemoval::Disarmed;
            return self.hide();
        }

        if self.state.space_removal == SpaceRemoval::Armed && old != self.text {
            self.state.space_removal = SpaceRemoval::Disarmed;
            let scanner = &self.scanner;
            let source = &self.source;
            let rewritten = rewrite::remove_space(
                &old,
                &self.text,
                self.caret,
                scanner.config(),
                |prefix, caret| scanner.scan_chars(prefix, caret, source).is_some(),
            );
            if let Some(r) = rewritten {
                tracing::debug!(text = %r.text, caret = r.caret, "separator moved after punctuation");
                self.text = r.text.clone();
                self.caret = r.caret;
                // the old match points into the buffer before the swap
                self.refresh(host);
                return Outcome::Rewritten {
                    text: r.text,
                    caret: r.caret,
                };
            }
        }

        self.refresh(host)
    }

    pub fn options_updated<H: Host>(&mut self, source: OptionSource, host: &mut H) -> Outcome {
        self.source = source;
        if self.text.is_empty() {
            return self.hide();
        }
        self.refresh(host)
    }

    pub fn navigate(&mut self, direction: Direction) -> Outcome {
        let len = self.state.candidates().len();
        if !self.state.visible || len == 0 {
            return Outcome::Unchanged;
        }
        self.state.selected = match direction {
            Direction::Up => (self.state.selected + len - 1) % len,
            Direction::Down => (self.state.selected + 1) % len,
        };
        Outcome::Suggesting
    }

    pub fn commit_selected<H: Host>(&mut self, host: &mut H) -> Outcome {
        self.commit(self.state.selected, host)
    }

    pub fn commit<H: Host>(&mut self, index: usize, host: &mut H) -> Outcome {
        if !self.state.visible {
            return Outcome::Unchanged;
        }
        let Some(m) = self.state.matched.clone() else {
            return Outcome::Unchanged;
        };
        let Some(candidate) = m.candidates.get(index) else {
            return Outcome::Unchanged;
        };

        let chars: Vec<char> = self.text.chars().collect();
        let cut = m.match_start - m.opener.chars().count();
        let prefix: String = chars[..cut].iter().collect();
        let suffix: String = chars[(m.match_start + m.match_length).min(chars.len())..]
            .iter()
            .collect();
        let rendered = host.render(&m.opener, candidate);
        let sep = if self.config().separator_disabled_for(&m.trigger) {
            ""
        } else {
            self.config().separator.as_str()
        };

        let text = format!("{prefix}{rendered}{sep}{suffix}");
        let caret = (cut + rendered.chars().count() + 1).min(text.chars().count());
        tracing::debug!(trigger = %m.trigger, candidate = %candidate, caret, "committed");

        self.text = text.clone();
        self.caret = caret;
        self.hide();
        self.state.space_removal = SpaceRemoval::Armed;
        host.committed(&text);
        Outcome::Committed { text, caret }
    }

    pub fn cancel(&mut self) -> Outcome {
        self.hide()
    }

    fn refresh<H: Host>(&mut self, host: &mut H) -> Outcome {
        let Some(m) = self.scanner.scan(&self.text, self.caret, &self.source) else {
            return self.hide();
        };

        let config = self.scanner.config();
        let long_enough = m.match_length >= config.min_chars || config.min_chars_disabled_for(&m.trigger);
        if long_enough && m.has_completions() {
            if self.state.selected >= m.candidates.len() {
                self.state.selected = 0;
            }
            tracing::debug!(trigger = %m.trigger, candidates = m.candidates.len(), "suggesting");
            self.state.visible = true;
            self.state.anchor = host.caret_anchor(self.caret);
            self.state.matched = Some(m);
            return Outcome::Suggesting;
        }

        if !config.request_only_if_no_options || m.candidates.is_empty() {
            let partial: String = self
                .text
                .chars()
                .skip(m.match_start)
                .take(m.match_length)
                .collect();
            tracing::debug!(partial = %partial, "requesting more options");
            host.request_more_options(&partial);
        }
        self.hide()
    }

    fn hide(&mut self) -> Outcome {
        self.state.visible = false;
        self.state.matched = None;
        self.state.selected = 0;
        self.state.anchor = None;
        Outcome::Idle
    }
}
