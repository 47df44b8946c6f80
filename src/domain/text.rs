use unicode_width::UnicodeWidthStr;

/// Hard-wrap `s` so that no line is wider than `width` terminal cells.
pub fn wrap_text(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    s.lines()
        .map(|line| {
            let mut wrapped = String::new();
            let mut current_width = 0;
            for c in line.chars() {
                let char_width = c.to_string().width();
                if current_width + char_width > width && current_width > 0 {
                    wrapped.push('\n');
                    current_width = 0;
                }
                wrapped.push(c);
                current_width += char_width;
            }
            wrapped
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep at most `max_height` lines, replacing the overflow with `...`.
pub fn truncate_text(s: &str, max_height: usize) -> String {
    if max_height == 0 {
        return String::new();
    }

    let lines: Vec<&str> = s.lines().collect();
    if lines.len() <= max_height {
        return s.to_string();
    }
    if max_height == 1 {
        return String::from("...");
    }
    format!("{}\n...", lines[..max_height - 1].join("\n"))
}

/// Banner text for hoaxes known to exist above the top of the feed
pub fn new_hoax_banner(count: u64) -> String {
    if count == 1 {
        String::from("There is 1 new hoax")
    } else {
        format!("There are {count} new hoaxes")
    }
}
