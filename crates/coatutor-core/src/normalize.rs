//! Free-text normalization shared by every evaluator.

/// Typographic apostrophes that keyboards and phones substitute for `'`.
const CURLY_APOSTROPHES: [char; 3] = ['\u{2018}', '\u{2019}', '\u{02BC}'];

/// Lowercase, trim and collapse runs of whitespace to a single space.
/// Curly apostrophes become `'`.
///
/// Never fails: an empty (or all-whitespace) string yields an empty string.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase().replace(CURLY_APOSTROPHES, "'"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split normalized text into bare words, dropping surrounding punctuation.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Whether `phrase` occurs in `text` as a run of whole words.
///
/// Both sides are compared word by word after punctuation is stripped, so
/// `"alu"` matches `"the alu, then"` but not `"value"`.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let needle: Vec<String> = words(phrase).map(str::to_lowercase).collect();
    if needle.is_empty() {
        return false;
    }
    let hay: Vec<String> = words(text).map(str::to_lowercase).collect();
    hay.windows(needle.len()).any(|w| w == needle.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_matches_whole_words_only() {
        assert!(contains_phrase("the alu, then memory", "ALU"));
        assert!(contains_phrase("uses the program counter.", "program counter"));
        assert!(!contains_phrase("a value", "alu"));
        assert!(!contains_phrase("anything", ""));
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Fetch THEN Decode  "), "fetch then decode");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(normalize("program\t\tcounter\n\nand  IR"), "program counter and ir");
    }

    #[test]
    fn folds_curly_apostrophes() {
        assert_eq!(normalize("I Don\u{2019}t KNOW"), "i don't know");
        assert_eq!(normalize("it\u{2018}s"), "it's");
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn words_strip_punctuation() {
        let w: Vec<&str> = words("fetch, decode; (ir) execute!").collect();
        assert_eq!(w, vec!["fetch", "decode", "ir", "execute"]);
    }
}
