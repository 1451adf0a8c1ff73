use unicode_width::UnicodeWidthStr;

/// Format a duration in seconds as "M:SS".
pub fn format_duration_secs(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a duration in seconds as "Xh Ym" or "Ym" for longer spans.
pub fn format_duration_long(secs: i64) -> String {
    if secs <= 0 {
        return "0m".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format minutes as a decimal string, trimming trailing zeros.
pub fn format_minutes(minutes: f64) -> String {
    if minutes == minutes.floor() {
        format!("{}", minutes as i64)
    } else {
        format!("{:.1}", minutes)
    }
}

/// Round a percentage for display.
pub fn format_percent(rate: f64) -> String {
    format!("{}%", rate.round() as i64)
}

/// Create a simple ASCII progress bar.
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad or truncate a string to an exact display width (wide glyphs count
/// double, so byte-based padding misaligns table columns).
pub fn pad_cell(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current >= width {
        let mut out = String::new();
        let mut used = 0;
        for c in s.chars() {
            let w = UnicodeWidthStr::width(c.to_string().as_str());
            if used + w > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push_str(&" ".repeat(width.saturating_sub(used)));
        out
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}
