//! String analysis layer.
//!
//! Derives the property bundle that the store keeps next to every value and
//! the query engine filters on.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same input, same
//! [`StringProperties`], on any machine.
//!
//! ## Lengths
//!
//! `length` and `unique_characters` count Unicode scalar values, not bytes.

mod hash;
mod text;

pub use crate::hash::sha256_hex;
pub use crate::text::{character_frequency, count_words, is_palindrome, unique_characters};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Properties derived from a raw string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StringProperties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: BTreeMap<String, usize>,
}

/// Compute every property of `input` in one call.
///
/// ```rust
/// let props = analysis::analyze("level up");
/// assert_eq!(props.length, 8);
/// assert_eq!(props.word_count, 2);
/// assert!(!props.is_palindrome);
/// ```
pub fn analyze(input: &str) -> StringProperties {
    StringProperties {
        length: input.chars().count(),
        is_palindrome: is_palindrome(input),
        unique_characters: unique_characters(input),
        word_count: count_words(input),
        sha256_hash: sha256_hex(input),
        character_frequency_map: character_frequency(input),
    }
}
