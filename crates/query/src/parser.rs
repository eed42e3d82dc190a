//! Natural Language Query Parser
//!
//! Turns free text such as "palindromic strings with minimum length 5" into a
//! [`PredicateSet`] by running an ordered list of pattern rules over a
//! lower-cased copy of the query. Every rule is evaluated; a rule that matches
//! inserts (or overwrites) the predicate for its field.
//!
//! ## Default rules, in evaluation order
//!
//! | # | Match                                   | Predicate                   |
//! |---|-----------------------------------------|-----------------------------|
//! | 1 | "palindrome" or "palindromic"           | `is_palindrome = true`      |
//! | 2 | "not palindrome"                        | `is_palindrome = false`     |
//! | 3 | `min(imum)? length N`                   | `min_length = N`            |
//! | 4 | `max(imum)? length N`                   | `max_length = N`            |
//! | 5 | `N word(s)`                             | `word_count = N`            |
//! | 6 | `containing 'x'` (quotes optional)      | `contains_character = x`    |
//!
//! Rule 2 only wins because it runs after rule 1: any text containing
//! "not palindrome" also contains "palindrome".

use crate::predicate::{make_predicate, Field, PredicateSet};
use crate::{Predicate, QueryError};
use regex::Regex;
use serde::Serialize;

/// Outcome of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Query text exactly as received.
    pub original: String,
    pub parsed_filters: PredicateSet,
}

#[derive(Debug)]
enum Matcher {
    /// Any phrase occurs as a substring.
    Phrases {
        phrases: &'static [&'static str],
        predicate: Predicate,
    },
    /// First capture group feeds [`make_predicate`].
    Capture(Regex),
}

/// A single pattern rule targeting one field.
#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    field: Field,
    matcher: Matcher,
}

impl Rule {
    /// Rule that yields a fixed predicate when any phrase is present.
    pub fn phrases(
        name: &'static str,
        phrases: &'static [&'static str],
        predicate: Predicate,
    ) -> Self {
        Self {
            name,
            field: predicate.field(),
            matcher: Matcher::Phrases { phrases, predicate },
        }
    }

    /// Rule that converts the first capture group of `pattern` into a value.
    pub fn capture(name: &'static str, field: Field, pattern: &str) -> Result<Self, QueryError> {
        Ok(Self {
            name,
            field,
            matcher: Matcher::Capture(Regex::new(pattern)?),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Evaluate against already lower-cased text. `None` means no match.
    pub fn evaluate(&self, lower: &str) -> Option<Result<Predicate, QueryError>> {
        match &self.matcher {
            Matcher::Phrases { phrases, predicate } => phrases
                .iter()
                .any(|phrase| lower.contains(phrase))
                .then(|| Ok(*predicate)),
            Matcher::Capture(regex) => regex
                .captures(lower)
                .and_then(|caps| caps.get(1))
                .map(|m| make_predicate(self.field, m.as_str())),
        }
    }
}

fn default_rules() -> Result<Vec<Rule>, QueryError> {
    Ok(vec![
        Rule::phrases(
            "palindrome",
            &["palindrome", "palindromic"],
            Predicate::IsPalindrome(true),
        ),
        Rule::phrases(
            "not_palindrome",
            &["not palindrome"],
            Predicate::IsPalindrome(false),
        ),
        Rule::capture("min_length", Field::MinLength, r"min(?:imum)? length ([0-9]+)")?,
        Rule::capture("max_length", Field::MaxLength, r"max(?:imum)? length ([0-9]+)")?,
        Rule::capture("word_count", Field::WordCount, r"([0-9]+) words?")?,
        Rule::capture(
            "contains_character",
            Field::ContainsCharacter,
            r"containing '?([a-z])'?",
        )?,
    ])
}

/// Rule-based natural-language parser.
///
/// ```
/// use query::{NaturalLanguageParser, Predicate, Field};
///
/// let parser = NaturalLanguageParser::new().unwrap();
/// let parsed = parser.parse("strings with minimum length 5").unwrap();
/// assert_eq!(parsed.parsed_filters.get(Field::MinLength), Some(&Predicate::MinLength(5)));
/// ```
#[derive(Debug)]
pub struct NaturalLanguageParser {
    rules: Vec<Rule>,
}

impl NaturalLanguageParser {
    /// Create a parser with the default rule list.
    pub fn new() -> Result<Self, QueryError> {
        Ok(Self::with_rules(default_rules()?))
    }

    /// Create a parser that evaluates `rules` in the given order.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Parse a natural language query.
    ///
    /// Fails with [`QueryError::NoFiltersRecognized`] when no rule matches and
    /// with [`QueryError::InvalidValue`] when a captured number does not fit.
    pub fn parse(&self, query: &str) -> Result<ParsedQuery, QueryError> {
        let lower = query.to_lowercase();
        let mut filters = PredicateSet::new();

        for rule in &self.rules {
            if let Some(predicate) = rule.evaluate(&lower) {
                let predicate = predicate?;
                tracing::debug!(rule = rule.name(), value = ?predicate.value(), "rule matched");
                filters.insert(predicate);
            }
        }

        if filters.is_empty() {
            tracing::debug!(query = %query, "no rule matched");
            return Err(QueryError::NoFiltersRecognized);
        }

        Ok(ParsedQuery {
            original: query.to_string(),
            parsed_filters: filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> NaturalLanguageParser {
        NaturalLanguageParser::new().unwrap()
    }

    fn filters(query: &str) -> Vec<Predicate> {
        parser()
            .parse(query)
            .unwrap()
            .parsed_filters
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn palindromic_strings() {
        assert_eq!(filters("palindromic strings"), vec![Predicate::IsPalindrome(true)]);
    }

    #[test]
    fn minimum_length() {
        assert_eq!(
            filters("strings with minimum length 5"),
            vec![Predicate::MinLength(5)]
        );
        assert_eq!(filters("min length 2"), vec![Predicate::MinLength(2)]);
    }

    #[test]
    fn maximum_length() {
        assert_eq!(filters("max length 12"), vec![Predicate::MaxLength(12)]);
        assert_eq!(
            filters("strings of maximum length 3"),
            vec![Predicate::MaxLength(3)]
        );
    }

    #[test]
    fn word_count_and_character() {
        assert_eq!(
            filters("3 words containing 'a'"),
            vec![Predicate::WordCount(3), Predicate::ContainsCharacter('a')]
        );
        assert_eq!(filters("1 word"), vec![Predicate::WordCount(1)]);
        assert_eq!(
            filters("strings containing z"),
            vec![Predicate::ContainsCharacter('z')]
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            filters("PALINDROMIC strings CONTAINING 'Q'"),
            vec![Predicate::IsPalindrome(true), Predicate::ContainsCharacter('q')]
        );
    }

    #[test]
    fn not_palindrome_overrides_by_rule_order() {
        // Rule 1 matches first ("palindrome" is a substring), rule 2 then
        // overwrites the same field. Reordering the rules would flip this.
        assert_eq!(
            filters("strings that are not palindrome"),
            vec![Predicate::IsPalindrome(false)]
        );
    }

    #[test]
    fn not_palindromic_is_still_true() {
        // Only the exact phrase "not palindrome" negates.
        assert_eq!(
            filters("not palindromic"),
            vec![Predicate::IsPalindrome(true)]
        );
    }

    #[test]
    fn rule_order_decides_the_overwrite() {
        let rules = default_rules().unwrap().into_iter().rev().collect();
        let reversed = NaturalLanguageParser::with_rules(rules);
        let parsed = reversed.parse("not palindrome").unwrap();
        assert_eq!(
            parsed.parsed_filters.get(Field::IsPalindrome),
            Some(&Predicate::IsPalindrome(true))
        );
    }

    #[test]
    fn combined_query_keeps_rule_order() {
        assert_eq!(
            filters("palindromic strings containing 'x' with max length 9 and minimum length 3"),
            vec![
                Predicate::IsPalindrome(true),
                Predicate::MinLength(3),
                Predicate::MaxLength(9),
                Predicate::ContainsCharacter('x'),
            ]
        );
    }

    #[test]
    fn length_number_also_reads_as_word_count() {
        assert_eq!(
            filters("minimum length 4 words"),
            vec![Predicate::MinLength(4), Predicate::WordCount(4)]
        );
    }

    #[test]
    fn unrecognized_query_fails() {
        assert_eq!(
            parser().parse("banana split"),
            Err(QueryError::NoFiltersRecognized)
        );
        assert_eq!(parser().parse(""), Err(QueryError::NoFiltersRecognized));
    }

    #[test]
    fn oversized_number_is_invalid() {
        let err = parser()
            .parse("min length 99999999999999999999999999")
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidValue {
                field: Field::MinLength,
                ..
            }
        ));
    }

    #[test]
    fn original_text_is_preserved() {
        let parsed = parser().parse("  Palindromic Strings ").unwrap();
        assert_eq!(parsed.original, "  Palindromic Strings ");
    }

    #[test]
    fn single_rule_evaluation() {
        let rule = Rule::capture("word_count", Field::WordCount, r"([0-9]+) words?").unwrap();
        assert_eq!(rule.field(), Field::WordCount);
        assert_eq!(rule.evaluate("two words"), None);
        assert_eq!(rule.evaluate("7 words"), Some(Ok(Predicate::WordCount(7))));
    }

    #[test]
    fn phrase_rule_yields_its_predicate() {
        let rule = Rule::phrases("negated", &["not palindrome"], Predicate::IsPalindrome(false));
        assert_eq!(rule.field(), Field::IsPalindrome);
        assert_eq!(rule.evaluate("a palindrome"), None);
        assert_eq!(
            rule.evaluate("strings that are not palindrome"),
            Some(Ok(Predicate::IsPalindrome(false)))
        );
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = Rule::capture("broken", Field::WordCount, r"([0-9]+").unwrap_err();
        assert!(matches!(err, QueryError::Pattern(_)));
    }
}
