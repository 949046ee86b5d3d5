//! Input utilities for the line-oriented chat loop.

/// Flatten one line of user input before it reaches the send path.
///
/// Pasted text can carry tabs, stray carriage returns, and other control
/// characters that corrupt a line-oriented transcript. Tabs become spaces,
/// line breaks collapse to a single space, and remaining control characters
/// are dropped.
pub fn sanitize_line(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' | '\n' => sanitized.push(' '),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize_line("hello world"), "hello world");
    }

    #[test]
    fn tabs_become_spaces() {
        assert_eq!(sanitize_line("hello\tworld"), "hello    world");
    }

    #[test]
    fn line_breaks_collapse_to_spaces() {
        assert_eq!(sanitize_line("hello\r\nworld"), "hello  world");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(sanitize_line("hel\x07lo"), "hello");
    }
}
