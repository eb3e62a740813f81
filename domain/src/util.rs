//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for one-line display.
///
/// Newlines are folded into spaces. When text is cut, the last kept
/// character is replaced with `…` so the result never exceeds `max_chars`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();

    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut out: String = flat.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
