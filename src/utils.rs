use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cuts `s` to at most `max_width` display columns, ending in `...` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Fraction of the view reached, counting the current card as seen.
pub fn progress_ratio(position: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((position + 1) as f64 / total as f64).min(1.0)
}
