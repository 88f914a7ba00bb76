use crate::ui::model::Model;
use crate::ui::render::input::render_input_block;
use crate::ui::render::list::render_main_content;
use crate::ui::render::modeline::render_modeline_padded;

pub fn render_full(m: &Model) -> String {
    let mut lines = render_input_block(m);
    if m.popup_lines() > 0 {
        lines.extend(render_main_content(m).lines().map(str::to_string));
    }
    let first_line = render_modeline_padded(m)
        .lines()
        .next()
        .unwrap_or("")
        .to_string();
    lines.push(first_line);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::ui::Msg;
    use crate::ui::model::{Model, builtin_config, builtin_options};
    use crate::ui::render::input::render_input_block;
    use crate::ui::render::list::render_main_content;
    use regex::Regex;

    // helper to strip ANSI CSI sequences from rendered output for assertions
    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn sized_model(w: usize, h: usize, typed: &str) -> Model {
        let mut m = Model::new(&builtin_config(), builtin_options().unwrap()).unwrap();
        m.update(Msg::WindowSize {
            width: w,
            height: h,
        });
        for ch in typed.chars() {
            m.update(Msg::Rune(ch));
        }
        m
    }

    #[test]
    fn render_full_matches_dimensions() {
        let sizes = [(80usize, 24usize), (100usize, 10usize), (40usize, 20usize)];
        for typed in ["", "hello", "hi @", "hi @al", "#team."] {
            for (w, h) in sizes.iter().cloned() {
                let m = sized_model(w, h, typed);
                let stripped = strip_ansi(&m.render_full());
                let lines: Vec<&str> = stripped.lines().collect();
                assert_eq!(
                    lines.len(),
                    h,
                    "height mismatch for {w}x{h} typing `{typed}`\n<<output>>\n{stripped}"
                );
                for (idx, line) in lines.iter().enumerate() {
                    let lw = line.chars().count();
                    assert_eq!(
                        lw, w,
                        "width mismatch at line {idx} for {w}x{h}: got {lw} chars\nline: `{line}`\n<<output>>\n{stripped}"
                    );
                }
            }
        }
    }

    #[test]
    fn modeline_is_last_line_and_exact_width() {
        let (w, h) = (80usize, 24usize);
        let m = sized_model(w, h, "@bo");
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();
        let last = *lines.last().unwrap();
        assert_eq!(last.chars().count(), w);
        let modeline = strip_ansi(&crate::ui::render_modeline_padded(&m));
        assert_eq!(last, modeline.lines().next().unwrap_or(""));
    }

    #[test]
    fn input_box_is_first_three_lines() {
        let m = sized_model(80, 24, "hi @al");
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();
        let block = strip_ansi(&render_input_block(&m).join("\n"));
        let block_lines: Vec<&str> = block.lines().collect();
        for i in 0..3 {
            assert_eq!(lines[i], block_lines[i], "input line {i} mismatch");
        }
        assert!(lines[1].contains("> hi @al"));
    }

    #[test]
    fn popup_sits_between_input_and_modeline() {
        let m = sized_model(80, 24, "hi @al");
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();
        let main = strip_ansi(&render_main_content(&m));
        let main_lines: Vec<&str> = main.lines().collect();
        assert_eq!(&lines[3..lines.len() - 1], main_lines.as_slice());
        assert!(lines[3].contains("alice"));
        assert!(lines[4].contains("albert"));
        assert!(lines[6].trim().is_empty());
    }
}
