use crate::session::{Direction, Outcome};
use crate::ui::model::Model;

pub fn handle_update(m: &mut Model, msg: crate::ui::Msg) {
    match msg {
        crate::ui::Msg::WindowSize { width, height } => handle_window_size(m, width, height),
        crate::ui::Msg::KeyBackspace => handle_key_backspace(m),
        crate::ui::Msg::KeyEnter => handle_key_enter(m),
        crate::ui::Msg::KeyTab => handle_key_tab(m),
        crate::ui::Msg::KeyEsc => handle_key_esc(m),
        crate::ui::Msg::KeyDown => handle_navigate(m, Direction::Down),
        crate::ui::Msg::KeyUp => handle_navigate(m, Direction::Up),
        crate::ui::Msg::KeyLeft => handle_move_caret(m, -1),
        crate::ui::Msg::KeyRight => handle_move_caret(m, 1),
        crate::ui::Msg::Rune(r) => handle_rune(m, r),
    }
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) {
    m.screen_width = width;
    m.screen_height = height;
    // the anchor no longer matches the layout
    m.session.cancel();
}

fn handle_key_backspace(m: &mut Model) {
    if m.caret == 0 {
        return;
    }
    let mut chars: Vec<char> = m.buffer.chars().collect();
    chars.remove(m.caret - 1);
    m.buffer = chars.into_iter().collect();
    m.caret -= 1;
    text_changed(m);
}

fn handle_key_enter(m: &mut Model) {
    if m.suggesting() {
        commit_selected(m);
        return;
    }
    if m.buffer.is_empty() {
        return;
    }
    m.exit_preview = m.buffer.clone();
}

fn handle_key_tab(m: &mut Model) {
    if m.suggesting() {
        commit_selected(m);
    }
}

fn handle_key_esc(m: &mut Model) {
    m.session.cancel();
}

fn handle_navigate(m: &mut Model, direction: Direction) {
    m.session.navigate(direction);
}

fn handle_move_caret(m: &mut Model, delta: isize) {
    let len = m.buffer.chars().count();
    let next = m.caret as isize + delta;
    if next < 0 || next as usize > len {
        return;
    }
    m.caret = next as usize;
    text_changed(m);
}

fn handle_rune(m: &mut Model, r: char) {
    let mut chars: Vec<char> = m.buffer.chars().collect();
    let at = m.caret.min(chars.len());
    chars.insert(at, r);
    m.buffer = chars.into_iter().collect();
    m.caret = at + 1;
    text_changed(m);
}

fn commit_selected(m: &mut Model) {
    let outcome = m.session.commit_selected(&mut m.host);
    apply_outcome(m, outcome);
}

fn text_changed(m: &mut Model) {
    let outcome = m.session.text_changed(&m.buffer, m.caret, &mut m.host);
    apply_outcome(m, outcome);
}

// adopt buffers produced by the engine
fn apply_outcome(m: &mut Model, outcome: Outcome) {
    match outcome {
        Outcome::Rewritten { text, caret } | Outcome::Committed { text, caret } => {
            m.buffer = text;
            m.caret = caret;
        }
        Outcome::Unchanged | Outcome::Suggesting | Outcome::Idle => {}
    }
}
