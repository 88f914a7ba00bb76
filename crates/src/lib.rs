//! tagline - trigger detection and suggestion filtering for text fields
//!
//! The engine scans a buffer backwards from the caret for a trigger tag such as
//! `@` or `#`, resolves candidate options for it, and keeps a small session
//! state machine that a host (the `ui` module, or any other front end) drives
//! with text and key events.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod config;
pub mod error;
pub mod options;
pub mod rewrite;
pub mod scan;
pub mod session;
pub mod trigger;

pub mod ui;

pub use config::{Config, TriggerSet, DEFAULT_TOKEN_REGEX};
pub use error::ConfigError;
pub use options::{Lookup, OptionNode, OptionSource, TriggerOptions, resolve};
pub use rewrite::{Rewrite, remove_space};
pub use scan::{MatchDescriptor, Scanner, filter_candidates, highlight_span, scan};
pub use session::{
    Anchor, Direction, Host, Msg, NoHost, Outcome, SessionState, SpaceRemoval, SuggestionSession,
};
pub use trigger::TriggerDescriptor;
