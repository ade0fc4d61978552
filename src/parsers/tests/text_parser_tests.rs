use crate::parsers::text;

#[cfg(test)]
mod basic_tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(text::clean_text(""), "");
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(text::clean_text("   \n   \t   \r\n   "), "");
    }

    #[test]
    fn test_mixed_whitespace() {
        let input = "  Line 1  \n\n  Line 2  \t\r\n  Line 3  ";
        assert_eq!(text::clean_text(input), "Line 1 Line 2 Line 3");
    }

    #[test]
    fn test_preserve_punctuation_and_unicode() {
        let input = "Hello,   world! Tere tulemast – Ülemiste.";
        assert_eq!(
            text::clean_text(input),
            "Hello, world! Tere tulemast – Ülemiste."
        );
    }

    #[test]
    fn test_join_fragments() {
        let fragments = ["Digital", "\n  transformation ", "", "partner"];
        assert_eq!(
            text::join_fragments(fragments),
            "Digital transformation partner"
        );
    }

    #[test]
    fn test_join_fragments_keeps_word_boundaries() {
        // Adjacent inline elements must not glue words together
        assert_eq!(text::join_fragments(["Nortal", "Group"]), "Nortal Group");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(text::char_len("äöü"), 3);
        assert_eq!(text::char_len(""), 0);
    }
}
