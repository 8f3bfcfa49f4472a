//! Turning untrusted chat text into safe HTML fragments.
//!
//! Both user input and backend replies pass through [`render_content`]
//! before they reach `innerHTML`. Escaping happens first; the only markup
//! ever introduced is the `<br>` that replaces a newline.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

/// Avatar text used when the page has no `.avatar-circle`.
pub const DEFAULT_INITIALS: &str = "U";

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escaped message body with newlines rendered as line breaks.
pub fn render_content(text: &str) -> String {
    escape_html(text).replace("\r\n", "\n").replace('\n', "<br>")
}

/// Initials shown in the user's chat avatar, taken from the navbar avatar
/// text when present.
pub fn user_initials(avatar_text: Option<&str>) -> String {
    match avatar_text.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_INITIALS.to_string(),
    }
}
