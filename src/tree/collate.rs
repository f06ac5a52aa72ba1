//! Locale-aware name ordering for tree listings.
//!
//! Mirrors the root-locale collation used by browsers when listing names:
//! comparison is case- and accent-insensitive at first, then accents break
//! ties, then case (lowercase first), and finally raw code points so the
//! ordering is total.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Character classes in collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_ascii_punctuation() {
        CharClass::Punctuation
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Symbol
    }
}

/// Three-level sort key for a single name.
#[derive(Debug, PartialEq, Eq)]
struct CollationKey {
    primary: Vec<(CharClass, char)>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
}

impl CollationKey {
    fn new(name: &str) -> Self {
        let mut primary = Vec::with_capacity(name.len());
        let mut secondary: Vec<u32> = Vec::with_capacity(name.len());
        let mut tertiary = Vec::with_capacity(name.len());

        for c in name.nfd() {
            if is_combining_mark(c) {
                if let Some(last) = secondary.last_mut() {
                    *last = (*last).max(c as u32);
                }
                continue;
            }
            let class = classify(c);
            for lower in c.to_lowercase() {
                primary.push((class, lower));
                secondary.push(0);
                tertiary.push(u8::from(c.is_uppercase()));
            }
        }

        Self {
            primary,
            secondary,
            tertiary,
        }
    }
}

/// Compare two names the way a localized file listing orders them.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let ka = CollationKey::new(a);
    let kb = CollationKey::new(b);
    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.secondary.cmp(&kb.secondary))
        .then_with(|| ka.tertiary.cmp(&kb.tertiary))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare_names(a, b));
        v
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(sorted(&["beta", "Alpha", "gamma"]), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(sorted(&["B", "a", "b"]), vec!["a", "b", "B"]);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(sorted(&["f", "\u{e9}", "e"]), vec!["e", "\u{e9}", "f"]);
    }

    #[test]
    fn test_digits_before_letters_and_not_numeric() {
        assert_eq!(sorted(&["b", "file2", "file10", "1"]), vec!["1", "b", "file10", "file2"]);
    }

    #[test]
    fn test_punctuation_before_alphanumerics() {
        assert_eq!(sorted(&["a", "_hidden", "0"]), vec!["_hidden", "0", "a"]);
    }

    #[test]
    fn test_total_order_on_canonically_equal_names() {
        let composed = "\u{e9}";
        let decomposed = "e\u{301}";
        assert_ne!(compare_names(composed, decomposed), Ordering::Equal);
        assert_eq!(
            compare_names(composed, decomposed),
            compare_names(decomposed, composed).reverse()
        );
    }
}
