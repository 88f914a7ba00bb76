use crate::config::{Config, TriggerSet};
use crate::error::ConfigError;
use crate::options::OptionSource;
use crate::session::{Anchor, Host, SuggestionSession};

// small constants reused by rendering code
pub const INPUT_BLOCK_LINES: usize = 3;
pub const MODELINE_LINES: usize = 1;
pub const RESERVED_LINES: usize = INPUT_BLOCK_LINES + MODELINE_LINES;
pub const DEFAULT_WIDTH: usize = 80;
// border + padding + "> " in front of the buffer
pub const INPUT_PREFIX_COLS: usize = 4;

const BUILTIN_OPTIONS: &str = r##"{
  "@": ["alice", "albert", "alfred", "bob", "bobby", "carol", "dave"],
  "#": {
    "team": {"infra": 1, "web": 1, "mobile": 1},
    "lang": ["rust", "ruby", "go", "gleam"]
  }
}"##;

/// Options used when no `--options` file is given.
pub fn builtin_options() -> Result<OptionSource, ConfigError> {
    OptionSource::from_json_str(BUILTIN_OPTIONS)
}

/// Config used when no `--config` file is given: `@` people and `#` tags.
pub fn builtin_config() -> Config {
    Config {
        triggers: TriggerSet::Many(vec!["@".to_string(), "#".to_string()]),
        ..Config::default()
    }
}

/// Host side of the session: remembers what the engine asked for.
#[derive(Clone, Debug, Default)]
pub struct DemoHost {
    pub last_request: Option<String>,
    pub commits: usize,
}

impl Host for DemoHost {
    fn request_more_options(&mut self, partial: &str) {
        tracing::info!(partial, "engine asked for more options");
        self.last_request = Some(partial.to_string());
    }

    fn committed(&mut self, _text: &str) {
        self.commits += 1;
    }

    // the popup opens under the input box, at the caret column
    fn caret_anchor(&self, caret: usize) -> Option<Anchor> {
        Some(Anchor {
            top: INPUT_BLOCK_LINES as i32,
            left: (INPUT_PREFIX_COLS + caret) as i32,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Model {
    pub session: SuggestionSession,
    pub host: DemoHost,
    // single-line buffer; caret is a char offset
    pub buffer: String,
    pub caret: usize,
    // buffer accepted with Enter while no popup was open
    pub exit_preview: String,
    pub screen_width: usize,
    pub screen_height: usize,
}

impl Model {
    pub fn new(config: &Config, source: OptionSource) -> Result<Model, ConfigError> {
        Ok(Model {
            session: SuggestionSession::new(config, source)?,
            host: DemoHost::default(),
            buffer: String::new(),
            caret: 0,
            exit_preview: String::new(),
            screen_width: 0,
            screen_height: 0,
        })
    }

    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) {
        crate::ui::update::handle_update(self, msg);
    }

    pub fn suggesting(&self) -> bool {
        self.session.state().visible
    }

    pub fn mode(&self) -> String {
        match &self.session.state().matched {
            Some(m) if self.suggesting() => {
                format!("{} {} of {}", m.trigger, self.session.state().selected + 1, m.candidates.len())
            }
            _ => "tagline".to_string(),
        }
    }

    pub fn width(&self) -> usize {
        if self.screen_width > 0 {
            self.screen_width
        } else {
            DEFAULT_WIDTH
        }
    }

    // lines left for the popup between the input block and the modeline
    pub fn popup_lines(&self) -> usize {
        self.screen_height.saturating_sub(RESERVED_LINES)
    }

    pub fn render_full(&self) -> String {
        crate::ui::render::render_full(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_load() {
        let src = builtin_options().unwrap();
        assert_eq!(src.len(), 2);
        builtin_config().validate().unwrap();
    }

    #[test]
    fn test_mode_and_new_model() {
        let mut m = Model::new(&builtin_config(), builtin_options().unwrap()).unwrap();
        assert_eq!(m.mode(), "tagline");
        for ch in "@al".chars() {
            m.update(crate::ui::Msg::Rune(ch));
        }
        assert_eq!(m.mode(), "@ 1 of 3");
    }

    #[test]
    fn anchor_follows_caret_column() {
        let host = DemoHost::default();
        assert_eq!(host.caret_anchor(3), Some(Anchor { top: 3, left: 7 }));
    }
}
