//! Error types for configuration and option loading.
//!
//! "No match" is never an error: scanning returns `None` for unmatched text and
//! missing option keys resolve to empty candidate lists.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The token regex did not compile.
    #[error("invalid token regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A config or options file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A config or options document is not valid JSON for its type.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
