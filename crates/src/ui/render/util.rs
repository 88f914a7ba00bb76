use lipgloss::Style;

// Pad every line to `total_width` and force exactly `per` lines.
pub fn normalize_and_pad(lines: Vec<String>, total_width: usize, per: usize) -> String {
    let line_style = Style::new().width(total_width as i32);
    let mut normalized: Vec<String> = lines.into_iter().map(|l| line_style.render(&l)).collect();
    normalized.resize(per, line_style.render(""));
    normalized.join("\n")
}

// Cut plain text to at most `max` chars.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_chars() {
        assert_eq!(truncate_chars("zoë and more", 3), "zoë");
        assert_eq!(truncate_chars("ab", 5), "ab");
    }
}
