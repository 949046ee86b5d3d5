use unicode_segmentation::UnicodeSegmentation;

/// Clip `text` to at most `max_graphemes` grapheme clusters, appending an
/// ellipsis marker when anything was cut off.
///
/// Counting grapheme clusters instead of bytes keeps the clip point from
/// landing inside a multi-byte character or combining sequence.
pub fn clip_with_ellipsis(text: &str, max_graphemes: usize) -> String {
    match text.grapheme_indices(true).nth(max_graphemes) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(clip_with_ellipsis("Hello", 20), "Hello");
    }

    #[test]
    fn exact_length_text_gets_no_marker() {
        let text = "a".repeat(20);
        assert_eq!(clip_with_ellipsis(&text, 20), text);
    }

    #[test]
    fn long_text_is_clipped_with_marker() {
        let clipped = clip_with_ellipsis("The quick brown fox jumps over", 20);
        assert_eq!(clipped, "The quick brown fox ...");
    }

    #[test]
    fn clip_respects_grapheme_boundaries() {
        // é as e + combining acute must survive as one unit
        let text = "e\u{301}".repeat(3);
        assert_eq!(clip_with_ellipsis(&text, 2), format!("{}...", "e\u{301}".repeat(2)));
    }
}
