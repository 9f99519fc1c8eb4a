//! Colored message prefixes shared by the binary and printers.

use owo_colors::OwoColorize;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if colors_enabled() {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s: &str| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s: &str| s.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s: &str| s.blue().bold().to_string())
}

/// Pad `s` to `width` display characters.
pub fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
