//! Character-level measurements over raw input.

use std::collections::{BTreeMap, HashSet};

/// Separators recognised by [`count_words`].
const WORD_SEPARATORS: [char; 4] = [' ', '\t', '\n', '\r'];

/// Returns `true` when `input` reads the same forwards and backwards.
///
/// Only ASCII letters and digits take part in the comparison, which is
/// case-insensitive. Empty and whitespace-only input is never a palindrome.
///
/// ```rust
/// use analysis::is_palindrome;
///
/// assert!(is_palindrome("A man, a plan, a canal: Panama"));
/// assert!(!is_palindrome("hello"));
/// assert!(!is_palindrome("   "));
/// ```
pub fn is_palindrome(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }

    let cleaned: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|b| b.to_ascii_lowercase())
        .collect();

    cleaned.iter().eq(cleaned.iter().rev())
}

/// Counts whitespace-separated words, ignoring empty runs.
pub fn count_words(input: &str) -> usize {
    input
        .split(WORD_SEPARATORS)
        .filter(|word| !word.is_empty())
        .count()
}

/// Number of distinct characters in `input`.
pub fn unique_characters(input: &str) -> usize {
    input.chars().collect::<HashSet<_>>().len()
}

/// Occurrence count per character, keyed by the character as a string.
pub fn character_frequency(input: &str) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for ch in input.chars() {
        *frequency.entry(ch.to_string()).or_insert(0) += 1;
    }
    frequency
}
