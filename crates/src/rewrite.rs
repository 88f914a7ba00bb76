//! Moves punctuation typed right after an auto-inserted separator in front of it:
//! `"@bob ,"` becomes `"@bob, "`.

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// New caret, a char offset.
    pub caret: usize,
}

/// Check `new` against `old` once and swap the separator with a removable char.
///
/// `probe(prefix, caret)` re-scans the text left of the separator; the swap only
/// happens when it still sees a token there.
pub fn remove_space<F>(old: &str, new: &str, caret: usize, config: &Config, probe: F) -> Option<Rewrite>
where
    F: FnOnce(&[char], usize) -> bool,
{
    let mut sep = config.separator.chars();
    let (Some(sep), None) = (sep.next(), sep.next()) else {
        return None;
    };
    if config.separator_removable_chars.is_empty() {
        return None;
    }

    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    if new.len() <= 2 {
        return None;
    }

    let i = (0..old.len().max(new.len())).find(|&i| old.get(i) != new.get(i))?;
    if i < 2 || i >= new.len() {
        return None;
    }
    if new[i - 1] != sep || config.is_removable(new[i - 2]) || !config.is_removable(new[i]) {
        return None;
    }
    let prefix = &new[..i - 2];
    if !probe(prefix, caret.saturating_sub(3).min(prefix.len())) {
        return None;
    }

    let mut out = new;
    out.swap(i - 1, i);
    Some(Rewrite {
        text: out.into_iter().collect(),
        caret: i + 1,
    })
}
