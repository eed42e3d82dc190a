//! Filter engine: applies a [`PredicateSet`] to a snapshot of records.
//!
//! Predicates combine with logical AND. Output keeps the input order and the
//! input slice is never modified, so applying the same set twice yields the
//! same result.

use crate::predicate::{Predicate, PredicateSet};
use serde::Serialize;
use store::StringRecord;

/// How `contains_character` compares characters.
///
/// Explicit query parameters match case-sensitively; natural-language queries
/// match case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharMatch {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

/// Records that satisfied every predicate, plus what was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredResult {
    pub matched: Vec<StringRecord>,
    pub count: usize,
    pub applied: PredicateSet,
}

impl Predicate {
    /// Whether `record` satisfies this predicate.
    pub fn matches(&self, record: &StringRecord, mode: CharMatch) -> bool {
        let props = &record.properties;
        match *self {
            Predicate::IsPalindrome(flag) => props.is_palindrome == flag,
            Predicate::MinLength(min) => props.length >= min,
            Predicate::MaxLength(max) => props.length <= max,
            Predicate::WordCount(count) => props.word_count == count,
            Predicate::ContainsCharacter(needle) => match mode {
                CharMatch::CaseSensitive => record.value.contains(needle),
                CharMatch::CaseInsensitive => record
                    .value
                    .chars()
                    .any(|c| c == needle || c.to_lowercase().eq(needle.to_lowercase())),
            },
        }
    }
}

/// Keep the records that satisfy every predicate in `predicates`.
///
/// An empty set matches everything.
pub fn apply(predicates: &PredicateSet, records: &[StringRecord], mode: CharMatch) -> FilteredResult {
    let matched: Vec<StringRecord> = records
        .iter()
        .filter(|record| predicates.iter().all(|p| p.matches(record, mode)))
        .cloned()
        .collect();

    tracing::debug!(
        predicates = predicates.len(),
        scanned = records.len(),
        matched = matched.len(),
        ?mode,
        "applied filters"
    );

    FilteredResult {
        count: matched.len(),
        matched,
        applied: predicates.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(value: &str) -> StringRecord {
        StringRecord::with_timestamp(value, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    fn records(values: &[&str]) -> Vec<StringRecord> {
        values.iter().map(|v| record(v)).collect()
    }

    fn values(result: &FilteredResult) -> Vec<&str> {
        result.matched.iter().map(|r| r.value.as_str()).collect()
    }

    fn set(predicates: &[Predicate]) -> PredicateSet {
        predicates.iter().copied().collect()
    }

    #[test]
    fn palindromes_in_input_order() {
        let input = records(&["racecar", "hello", "level"]);
        let result = apply(
            &set(&[Predicate::IsPalindrome(true)]),
            &input,
            CharMatch::default(),
        );

        assert_eq!(values(&result), vec!["racecar", "level"]);
        assert_eq!(result.count, 2);
        assert_eq!(result.applied, set(&[Predicate::IsPalindrome(true)]));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let input = records(&["abc", "abcd", "abcde", "abcdef"]);
        let result = apply(
            &set(&[Predicate::MinLength(4), Predicate::MaxLength(5)]),
            &input,
            CharMatch::default(),
        );
        assert_eq!(values(&result), vec!["abcd", "abcde"]);
    }

    #[test]
    fn word_count_is_exact() {
        let input = records(&["one", "one two", "one two three"]);
        let result = apply(&set(&[Predicate::WordCount(2)]), &input, CharMatch::default());
        assert_eq!(values(&result), vec!["one two"]);
    }

    #[test]
    fn contains_character_respects_mode() {
        let input = records(&["Apple", "banana", "cherry"]);
        let predicates = set(&[Predicate::ContainsCharacter('a')]);

        let sensitive = apply(&predicates, &input, CharMatch::CaseSensitive);
        assert_eq!(values(&sensitive), vec!["banana"]);

        let insensitive = apply(&predicates, &input, CharMatch::CaseInsensitive);
        assert_eq!(values(&insensitive), vec!["Apple", "banana"]);
    }

    #[test]
    fn uppercase_needle_matches_lowercase_text_when_insensitive() {
        let input = records(&["quiet", "loud"]);
        let result = apply(
            &set(&[Predicate::ContainsCharacter('Q')]),
            &input,
            CharMatch::CaseInsensitive,
        );
        assert_eq!(values(&result), vec!["quiet"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let input = records(&["racecar", "level", "a man a plan", "noon"]);
        let result = apply(
            &set(&[Predicate::IsPalindrome(true), Predicate::MinLength(5)]),
            &input,
            CharMatch::default(),
        );
        assert_eq!(values(&result), vec!["racecar", "level"]);
    }

    #[test]
    fn empty_set_matches_everything() {
        let input = records(&["x", "y"]);
        let result = apply(&PredicateSet::new(), &input, CharMatch::default());
        assert_eq!(result.count, 2);
    }

    #[test]
    fn apply_is_idempotent() {
        let input = records(&["racecar", "hello", "level"]);
        let snapshot = input.clone();
        let predicates = set(&[Predicate::IsPalindrome(true), Predicate::MaxLength(6)]);

        let first = apply(&predicates, &input, CharMatch::CaseInsensitive);
        let second = apply(&predicates, &input, CharMatch::CaseInsensitive);
        assert_eq!(first, second);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn overwritten_field_filters_with_latest_value() {
        let mut predicates = PredicateSet::new();
        predicates.insert(Predicate::MinLength(5));
        predicates.insert(Predicate::MinLength(10));

        let input = records(&["short", "considerably longer"]);
        let result = apply(&predicates, &input, CharMatch::default());
        assert_eq!(values(&result), vec!["considerably longer"]);
    }
}
