use crate::ui::model::Model;
use crate::ui::render::styles::STYLE_MODELINE;
use crate::ui::render::util::truncate_chars;
use lipgloss::Color;

fn key_pairs(suggesting: bool) -> &'static [(&'static str, &'static str)] {
    if suggesting {
        &[("⏎", "pick"), ("⇥", "pick"), ("↑/↓", "move"), ("⎋", "close")]
    } else {
        &[("⏎", "submit"), ("←/→", "caret"), ("⎋", "quit")]
    }
}

pub fn render_modeline(m: &Model, inner_max: usize, mode: &str) -> String {
    // prepare inner styles without padding so spacing is under our control
    let inner_style = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let key_style = STYLE_MODELINE
        .clone()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
        .padding(0, 0, 0, 0);
    let info_style = STYLE_MODELINE.clone().faint(true).padding(0, 0, 0, 0);

    let pairs: Vec<(String, usize)> = key_pairs(m.suggesting())
        .iter()
        .map(|(k, d)| {
            let plain_len = d.chars().count() + 1 + k.chars().count();
            let rendered = format!(
                "{}{}{}",
                inner_style.render(d),
                inner_style.render(":"),
                key_style.render(k)
            );
            (rendered, plain_len)
        })
        .collect();
    let pair_sep_width = 2usize;

    // the last partial the engine could not serve
    let mut info_plain = m
        .host
        .last_request
        .as_deref()
        .map(|p| format!("asked: {p}"))
        .unwrap_or_default();

    // mode block carries one column of padding on each side
    let mode_w = mode.chars().count() + 2;
    let sep_w = " | ".chars().count();
    let avail = inner_max.saturating_sub(mode_w + sep_w);

    if info_plain.chars().count() > avail {
        info_plain = truncate_chars(&info_plain, avail);
    }
    let info_width = info_plain.chars().count();

    // drop rightmost pairs until they fit next to the info text
    let mut pairs_count = pairs.len();
    let width_of = |n: usize| -> usize {
        if n == 0 {
            0
        } else {
            pairs.iter().take(n).map(|(_, w)| *w).sum::<usize>() + pair_sep_width * (n - 1)
        }
    };
    while pairs_count > 0 && width_of(pairs_count) + info_width + 1 > avail {
        pairs_count -= 1;
    }
    let left_width = width_of(pairs_count);
    let left = pairs
        .iter()
        .take(pairs_count)
        .map(|(r, _)| r.clone())
        .collect::<Vec<_>>()
        .join(&inner_style.render("  "));

    let pad = avail.saturating_sub(left_width + info_width);
    let filler = if pad > 0 {
        STYLE_MODELINE.clone().width(pad as i32).render("")
    } else {
        String::new()
    };

    let mode_style = STYLE_MODELINE
        .clone()
        .background(Color::from_rgb(101, 101, 101))
        .padding(0, 1, 0, 1)
        .bold(true);
    format!(
        "{}{}{left}{filler}{}",
        mode_style.render(mode),
        inner_style.render(" | "),
        info_style.render(&info_plain)
    )
}

pub fn render_modeline_padded(m: &Model) -> String {
    let total_width = m.width();
    // outer padding takes one column on each side
    let inner_max = total_width.saturating_sub(2);
    let modeline = render_modeline(m, inner_max, &m.mode());
    let modeline_single = modeline.replace('\n', " ");
    STYLE_MODELINE
        .clone()
        .width(total_width as i32)
        .render(&modeline_single)
}

#[cfg(test)]
mod tests {
    use crate::ui::model::{Model, builtin_config, builtin_options};
    use crate::ui::{Msg, render_modeline_padded};
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn model(w: usize, h: usize) -> Model {
        let mut m = Model::new(&builtin_config(), builtin_options().unwrap()).unwrap();
        m.update(Msg::WindowSize { width: w, height: h });
        m
    }

    fn first_line(m: &Model) -> String {
        strip_ansi(&render_modeline_padded(m))
            .lines()
            .next()
            .unwrap_or("")
            .to_string()
    }

    #[test]
    fn idle_modeline_names_the_demo() {
        let m = model(80, 24);
        let line = first_line(&m);
        assert!(line.chars().count() <= 80);
        assert!(line.contains("tagline"));
        assert!(line.contains("submit"));
    }

    #[test]
    fn suggesting_modeline_shows_position() {
        let mut m = model(80, 24);
        for ch in "@al".chars() {
            m.update(Msg::Rune(ch));
        }
        m.update(Msg::KeyDown);
        let line = first_line(&m);
        assert!(line.contains("@ 2 of 3"), "got `{line}`");
        assert!(line.contains("pick"));
    }

    #[test]
    fn unserved_partial_is_shown() {
        let mut m = model(80, 24);
        for ch in "@zed".chars() {
            m.update(Msg::Rune(ch));
        }
        assert!(first_line(&m).contains("asked: zed"));
    }

    #[test]
    fn narrow_modeline_drops_hints() {
        let m = model(20, 24);
        let line = first_line(&m);
        assert!(line.chars().count() <= 20, "got `{line}`");
        assert!(!line.contains("quit"));
    }
}
