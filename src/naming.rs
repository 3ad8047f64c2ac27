//! Turning place names into directory names.
//!
//! Geocoder output is human-readable ("San Francisco County"). Each level of
//! the destination tree uses the same text with ASCII spaces replaced by
//! underscores (`San_Francisco_County`). Nothing else is touched: accents,
//! punctuation, slashes and control characters pass through as-is, so a
//! name containing a path separator will produce a deeper tree or fail at
//! rename time. That is accepted behaviour for this tool.

/// Map a display name to a path segment.
///
/// Total and idempotent: the result never contains `' '`, and
/// `sanitize_segment(&sanitize_segment(s)) == sanitize_segment(s)`.
pub fn sanitize_segment(name: &str) -> String {
    name.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(sanitize_segment("United States"), "United_States");
        assert_eq!(
            sanitize_segment("San Francisco County"),
            "San_Francisco_County"
        );
    }

    #[test]
    fn single_word_passthrough() {
        assert_eq!(sanitize_segment("California"), "California");
        assert_eq!(sanitize_segment("Unknown"), "Unknown");
    }

    #[test]
    fn consecutive_and_edge_spaces_are_each_replaced() {
        assert_eq!(sanitize_segment("  a  b "), "__a__b_");
    }

    #[test]
    fn other_characters_untouched() {
        assert_eq!(sanitize_segment("Île-de-France"), "Île-de-France");
        assert_eq!(sanitize_segment("a/b"), "a/b");
        assert_eq!(sanitize_segment("tab\there"), "tab\there");
        assert_eq!(sanitize_segment("München, Stadt"), "München,_Stadt");
    }

    #[test]
    fn non_ascii_whitespace_is_not_replaced() {
        // U+00A0 no-break space is not an ASCII space
        assert_eq!(sanitize_segment("a\u{a0}b"), "a\u{a0}b");
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize_segment(""), "");
    }

    #[test]
    fn never_contains_space_and_is_idempotent() {
        let samples = [
            "",
            " ",
            "Provence-Alpes-Côte d'Azur",
            "Comunidad de Madrid",
            "  leading",
            "trailing  ",
            "日本 東京",
            "already_clean",
        ];
        for s in samples {
            let once = sanitize_segment(s);
            assert!(!once.contains(' '), "space left in {once:?}");
            assert_eq!(sanitize_segment(&once), once);
        }
    }
}
