//! Typed filter conditions and their last-write-wins composition.
//!
//! A [`Predicate`] pairs one [`Field`] with a value of the type that field
//! requires, so a predicate that exists is always well-formed. Raw text from
//! query parameters or parser captures goes through [`make_predicate`], the
//! only place values are converted.

use crate::QueryError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Filterable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IsPalindrome,
    MinLength,
    MaxLength,
    WordCount,
    ContainsCharacter,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::IsPalindrome,
        Field::MinLength,
        Field::MaxLength,
        Field::WordCount,
        Field::ContainsCharacter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::IsPalindrome => "is_palindrome",
            Field::MinLength => "min_length",
            Field::MaxLength => "max_length",
            Field::WordCount => "word_count",
            Field::ContainsCharacter => "contains_character",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| QueryError::UnknownField(s.to_string()))
    }
}

/// Value carried by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredicateValue {
    Boolean(bool),
    Integer(usize),
    Character(char),
}

/// One field-scoped filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Palindrome flag equals the value.
    IsPalindrome(bool),
    /// Length is at least the value.
    MinLength(usize),
    /// Length is at most the value.
    MaxLength(usize),
    /// Word count equals the value.
    WordCount(usize),
    /// Raw value contains the character.
    ContainsCharacter(char),
}

impl Predicate {
    pub fn field(&self) -> Field {
        match self {
            Predicate::IsPalindrome(_) => Field::IsPalindrome,
            Predicate::MinLength(_) => Field::MinLength,
            Predicate::MaxLength(_) => Field::MaxLength,
            Predicate::WordCount(_) => Field::WordCount,
            Predicate::ContainsCharacter(_) => Field::ContainsCharacter,
        }
    }

    pub fn value(&self) -> PredicateValue {
        match *self {
            Predicate::IsPalindrome(flag) => PredicateValue::Boolean(flag),
            Predicate::MinLength(n) | Predicate::MaxLength(n) | Predicate::WordCount(n) => {
                PredicateValue::Integer(n)
            }
            Predicate::ContainsCharacter(ch) => PredicateValue::Character(ch),
        }
    }
}

/// Build a predicate for `field` from raw text.
///
/// - `is_palindrome`: `true` or `false`, any case.
/// - `min_length`, `max_length`, `word_count`: a non-negative integer.
/// - `contains_character`: exactly one non-control character.
///
/// Surrounding whitespace is ignored except for `contains_character`, where
/// the raw text must be the character itself.
///
/// ```
/// use query::{make_predicate, Field, Predicate};
///
/// assert_eq!(make_predicate(Field::MinLength, "5").unwrap(), Predicate::MinLength(5));
/// assert!(make_predicate(Field::MinLength, "-1").is_err());
/// ```
pub fn make_predicate(field: Field, raw: &str) -> Result<Predicate, QueryError> {
    let invalid = || QueryError::InvalidValue {
        field,
        value: raw.to_string(),
    };

    match field {
        Field::IsPalindrome => {
            let flag = match raw.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => return Err(invalid()),
            };
            Ok(Predicate::IsPalindrome(flag))
        }
        Field::MinLength | Field::MaxLength | Field::WordCount => {
            let n: usize = raw.trim().parse().map_err(|_| invalid())?;
            Ok(match field {
                Field::MinLength => Predicate::MinLength(n),
                Field::MaxLength => Predicate::MaxLength(n),
                _ => Predicate::WordCount(n),
            })
        }
        Field::ContainsCharacter => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if !ch.is_control() => Ok(Predicate::ContainsCharacter(ch)),
                _ => Err(invalid()),
            }
        }
    }
}

/// Ordered collection of at most one predicate per field.
///
/// Inserting a predicate for a field already present replaces it in place,
/// so the set keeps first-insertion order while the latest value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `predicate`, overwriting any predicate on the same field.
    pub fn insert(&mut self, predicate: Predicate) {
        let field = predicate.field();
        match self.predicates.iter_mut().find(|p| p.field() == field) {
            Some(slot) => *slot = predicate,
            None => self.predicates.push(predicate),
        }
    }

    /// Fold `other` into this set; `other` wins on shared fields.
    pub fn merge(&mut self, other: PredicateSet) {
        for predicate in other.predicates {
            self.insert(predicate);
        }
    }

    pub fn get(&self, field: Field) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.field() == field)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        let mut set = PredicateSet::new();
        for predicate in iter {
            set.insert(predicate);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for PredicateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.predicates.len()))?;
        for predicate in &self.predicates {
            map.serialize_entry(predicate.field().as_str(), &predicate.value())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert_eq!(
            "length".parse::<Field>(),
            Err(QueryError::UnknownField("length".to_string()))
        );
    }

    #[test]
    fn booleans_parse_case_insensitively() {
        assert_eq!(
            make_predicate(Field::IsPalindrome, "True").unwrap(),
            Predicate::IsPalindrome(true)
        );
        assert_eq!(
            make_predicate(Field::IsPalindrome, " false ").unwrap(),
            Predicate::IsPalindrome(false)
        );
        assert!(make_predicate(Field::IsPalindrome, "yes").is_err());
    }

    #[test]
    fn integers_must_be_non_negative() {
        assert_eq!(
            make_predicate(Field::WordCount, "3").unwrap(),
            Predicate::WordCount(3)
        );
        assert_eq!(
            make_predicate(Field::MaxLength, "0").unwrap(),
            Predicate::MaxLength(0)
        );
        for bad in ["-2", "abc", "", "1.5"] {
            assert_eq!(
                make_predicate(Field::MinLength, bad),
                Err(QueryError::InvalidValue {
                    field: Field::MinLength,
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn character_must_be_single_printable() {
        assert_eq!(
            make_predicate(Field::ContainsCharacter, "a").unwrap(),
            Predicate::ContainsCharacter('a')
        );
        assert_eq!(
            make_predicate(Field::ContainsCharacter, "é").unwrap(),
            Predicate::ContainsCharacter('é')
        );
        assert!(make_predicate(Field::ContainsCharacter, "ab").is_err());
        assert!(make_predicate(Field::ContainsCharacter, "").is_err());
        assert!(make_predicate(Field::ContainsCharacter, "\n").is_err());
    }

    #[test]
    fn last_write_wins_per_field() {
        let mut set = PredicateSet::new();
        set.insert(Predicate::MinLength(5));
        set.insert(Predicate::IsPalindrome(true));
        set.insert(Predicate::MinLength(10));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(Field::MinLength), Some(&Predicate::MinLength(10)));
        // Overwrite keeps the original slot.
        assert_eq!(set.iter().next(), Some(&Predicate::MinLength(10)));
    }

    #[test]
    fn merge_prefers_incoming() {
        let mut base: PredicateSet = [Predicate::WordCount(1), Predicate::MaxLength(9)]
            .into_iter()
            .collect();
        base.merge([Predicate::WordCount(2)].into_iter().collect());

        assert_eq!(base.get(Field::WordCount), Some(&Predicate::WordCount(2)));
        assert_eq!(base.get(Field::MaxLength), Some(&Predicate::MaxLength(9)));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let set: PredicateSet = [
            Predicate::WordCount(3),
            Predicate::ContainsCharacter('a'),
            Predicate::IsPalindrome(false),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"word_count":3,"contains_character":"a","is_palindrome":false}"#
        );
    }
}
