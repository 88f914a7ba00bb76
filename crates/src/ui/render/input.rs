use crate::ui::model::{INPUT_BLOCK_LINES, Model};
use crate::ui::render::styles::{STYLE_CARET, STYLE_INPUT, STYLE_INPUT_BOX};

// First visible char so that `caret` stays on screen in `cols` columns.
pub fn visible_window(caret: usize, cols: usize) -> usize {
    if cols == 0 {
        return caret;
    }
    // the caret cell itself needs a column too
    (caret + 1).saturating_sub(cols)
}

pub fn render_input_line(m: &Model, cols: usize) -> String {
    let chars: Vec<char> = m.buffer.chars().collect();
    let caret = m.caret.min(chars.len());
    let start = visible_window(caret, cols);
    let end = usize::min(chars.len(), start + cols);

    let before: String = chars[start..caret].iter().collect();
    let (cell, after) = if caret < end {
        let cell = chars[caret].to_string();
        let after: String = chars[caret + 1..end.max(caret + 1)].iter().collect();
        (cell, after)
    } else {
        (" ".to_string(), String::new())
    };
    let after: String = after.chars().take(cols.saturating_sub(before.chars().count() + 1)).collect();
    format!(
        "{}{}{}",
        STYLE_INPUT.render(&before),
        STYLE_CARET.render(&cell),
        STYLE_INPUT.render(&after)
    )
}

pub fn render_input_block(m: &Model) -> Vec<String> {
    let box_width = if m.width() >= 2 { m.width() - 2 } else { m.width() };
    // border and padding take four columns, "> " two more
    let cols = m.width().saturating_sub(6);
    let line = format!("> {}", render_input_line(m, cols));
    let w_i32: i32 = box_width.try_into().unwrap_or(i32::MAX);
    let block = STYLE_INPUT_BOX.clone().width(w_i32).render(&line);
    let mut out: Vec<String> = block.lines().map(|s| s.to_string()).collect();
    // Ensure the input block occupies exactly INPUT_BLOCK_LINES lines by truncating or padding with empty lines.
    out.truncate(INPUT_BLOCK_LINES);
    while out.len() < INPUT_BLOCK_LINES {
        out.push(String::new());
    }
    out
}
