//! Word-list case deduplication.
//!
//! A word is a case duplicate when it is not already lowercase and its
//! lowercase form also occurs in the list. Case duplicates are dropped; the
//! lowercase form survives. Repeats of an all-lowercase word are left alone.

use std::collections::HashSet;

/// Splits a word list on whitespace, keeping file order.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Result of deduplicating a word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dedup<'a> {
    /// Surviving words, in input order.
    pub kept: Vec<&'a str>,
    /// Every flagged occurrence, in input order.
    pub duplicates: Vec<&'a str>,
}

/// Membership index over a word list.
struct WordIndex<'a> {
    words: HashSet<&'a str>,
}

impl<'a> WordIndex<'a> {
    fn new(words: &[&'a str]) -> Self {
        Self {
            words: words.iter().copied().collect(),
        }
    }

    fn is_case_duplicate(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        lower != word && self.words.contains(lower.as_str())
    }
}

/// Splits `words` into survivors and case duplicates.
pub fn dedupe<'a>(words: &[&'a str]) -> Dedup<'a> {
    let index = WordIndex::new(words);
    let (duplicates, kept): (Vec<&'a str>, Vec<&'a str>) = words
        .iter()
        .copied()
        .partition(|w| index.is_case_duplicate(w));
    Dedup { kept, duplicates }
}

/// Renders words as double-quoted literals joined by `,\n`.
///
/// The result is an array body without brackets; the consumer wraps it.
pub fn render_words_js(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| quote(w))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Double-quotes a string with JSON escaping, which is also a valid JS literal.
pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Full-list scan form of the duplicate predicate.
    fn is_case_duplicate(word: &str, words: &[&str]) -> bool {
        let lower = word.to_lowercase();
        lower != word && words.contains(&lower.as_str())
    }

    #[test]
    fn test_tokenize_mixed_whitespace() {
        assert_eq!(
            tokenize("Haus\thaus\n\n  Baum \r\nbaum"),
            vec!["Haus", "haus", "Baum", "baum"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t").is_empty());
    }

    #[test]
    fn test_cat_cat_dog() {
        let words = ["Cat", "cat", "Dog"];
        let result = dedupe(&words);
        assert_eq!(result.kept, vec!["cat", "Dog"]);
        assert_eq!(result.duplicates, vec!["Cat"]);
    }

    #[test]
    fn test_lowercase_repeats_are_kept() {
        let words = ["cat", "cat", "Cat", "cat"];
        let result = dedupe(&words);
        assert_eq!(result.kept, vec!["cat", "cat", "cat"]);
        assert_eq!(result.duplicates, vec!["Cat"]);
    }

    #[test]
    fn test_every_occurrence_of_a_duplicate_is_flagged() {
        let words = ["Cat", "cat", "Cat", "CAT"];
        let result = dedupe(&words);
        assert_eq!(result.kept, vec!["cat"]);
        assert_eq!(result.duplicates, vec!["Cat", "Cat", "CAT"]);
    }

    #[test]
    fn test_mixed_case_without_lowercase_twin_is_kept() {
        // "Dog" and "DOG" collide with each other but not with "dog".
        let words = ["Dog", "DOG"];
        let result = dedupe(&words);
        assert_eq!(result.kept, vec!["Dog", "DOG"]);
        assert!(result.duplicates.is_empty());
    }

    #[test]
    fn test_unicode_lowercase() {
        let words = ["Äpfel", "äpfel", "Übel"];
        let result = dedupe(&words);
        assert_eq!(result.kept, vec!["äpfel", "Übel"]);
        assert_eq!(result.duplicates, vec!["Äpfel"]);
    }

    #[test]
    fn test_scan_predicate_matches_index() {
        let words = ["Cat", "cat", "Dog", "DOG", "dog", "Emu"];
        let result = dedupe(&words);
        for w in words {
            assert_eq!(
                is_case_duplicate(w, &words),
                result.duplicates.contains(&w),
                "mismatch for {}",
                w
            );
        }
    }

    #[test]
    fn test_render_words_js() {
        assert_eq!(render_words_js(&["cat", "Dog"]), "\"cat\",\n\"Dog\"");
        assert_eq!(render_words_js(&["Straße"]), "\"Straße\"");
        assert_eq!(render_words_js(&[]), "");
    }

    #[test]
    fn test_render_escapes_quotes() {
        assert_eq!(render_words_js(&[r#"a"b"#]), r#""a\"b""#);
    }
}
