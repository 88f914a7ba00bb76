use crate::scan::highlight_span;
use crate::ui::render::styles::{STYLE_CANDIDATE, STYLE_MATCH, STYLE_SELECTED};

// Style a candidate with the typed part highlighted. The candidate is cut to
// `max_chars` first so the plain width is known before styling.
pub fn decorate_candidate(candidate: &str, typed: &str, selected: bool, max_chars: usize) -> String {
    let chars: Vec<char> = candidate.chars().take(max_chars).collect();
    let base = if selected {
        &*STYLE_SELECTED
    } else {
        &*STYLE_CANDIDATE
    };

    let span = highlight_span(candidate, typed)
        .filter(|r| !r.is_empty())
        .map(|r| r.start.min(chars.len())..r.end.min(chars.len()));
    let Some(span) = span else {
        return base.render(&chars.iter().collect::<String>());
    };

    let before: String = chars[..span.start].iter().collect();
    let matched: String = chars[span.clone()].iter().collect();
    let after: String = chars[span.end..].iter().collect();
    let mut out = String::new();
    if !before.is_empty() {
        out.push_str(&base.render(&before));
    }
    if !matched.is_empty() {
        out.push_str(&STYLE_MATCH.render(&matched));
    }
    if !after.is_empty() {
        out.push_str(&base.render(&after));
    }
    out
}
