use crate::ui::model::Model;
use crate::ui::render::decorate::decorate_candidate;
use crate::ui::render::styles::STYLE_MARKER;
use crate::ui::render::util::normalize_and_pad;

const MARKER_COLS: usize = 2;

// First row to draw so the selected row stays inside `rows`.
pub fn scroll_offset(selected: usize, rows: usize) -> usize {
    if rows == 0 || selected < rows {
        0
    } else {
        selected + 1 - rows
    }
}

// Popup rows, without padding. Empty when the session is idle.
pub fn render_popup(m: &Model) -> Vec<String> {
    let state = m.session.state();
    if !state.visible {
        return Vec::new();
    }
    let candidates = state.visible_candidates(m.session.config().max_options);
    let rows = m.popup_lines();
    if candidates.is_empty() || rows == 0 {
        return Vec::new();
    }

    let width = m.width();
    let cand_max = width.saturating_sub(MARKER_COLS);
    let longest = candidates
        .iter()
        .map(|c| c.chars().count().min(cand_max))
        .max()
        .unwrap_or(0);
    let left = state.anchor.map_or(0, |a| a.left.max(0) as usize);
    let indent = " ".repeat(left.min(width.saturating_sub(MARKER_COLS + longest)));

    let typed = m.session.typed().unwrap_or_default();
    let first = scroll_offset(state.selected, rows);
    candidates
        .iter()
        .enumerate()
        .skip(first)
        .take(rows)
        .map(|(idx, cand)| {
            let selected = idx == state.selected;
            let marker = if selected {
                STYLE_MARKER.render("› ")
            } else {
                "  ".to_string()
            };
            format!("{indent}{marker}{}", decorate_candidate(cand, &typed, selected, cand_max))
        })
        .collect()
}

pub fn render_main_content(m: &Model) -> String {
    normalize_and_pad(render_popup(m), m.width(), m.popup_lines())
}
