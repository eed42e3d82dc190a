//! Umbrella crate for the string analyzer service.
//!
//! This crate stitches together analysis, storage and querying so callers
//! (the HTTP server, tests, embedders) work against one [`StringAnalyzer`]
//! instead of wiring the layers by hand.

pub use analysis::{analyze, is_palindrome, sha256_hex, StringProperties};
pub use query::{
    apply, make_predicate, CharMatch, Field, FilteredResult, NaturalLanguageParser, ParsedQuery,
    Predicate, PredicateSet, PredicateValue, QueryError,
};
pub use store::{BackendConfig, RecordStore, StoreBackend, StoreError, StringRecord};

use serde::Serialize;
use std::error::Error;
use std::fmt;

/// Errors surfaced by [`StringAnalyzer`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    Query(QueryError),
    Store(StoreError),
    NotFound(String),
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::Query(err) => write!(f, "query failure: {err}"),
            AnalyzerError::Store(err) => write!(f, "store failure: {err}"),
            AnalyzerError::NotFound(id) => write!(f, "string {id} does not exist"),
        }
    }
}

impl Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AnalyzerError::Query(err) => Some(err),
            AnalyzerError::Store(err) => Some(err),
            AnalyzerError::NotFound(_) => None,
        }
    }
}

impl From<QueryError> for AnalyzerError {
    fn from(value: QueryError) -> Self {
        AnalyzerError::Query(value)
    }
}

impl From<StoreError> for AnalyzerError {
    fn from(value: StoreError) -> Self {
        AnalyzerError::Store(value)
    }
}

/// Result of a natural-language filter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NaturalLanguageResult {
    pub interpreted_query: ParsedQuery,
    pub result: FilteredResult,
}

/// Build a predicate set from raw `(field, value)` pairs such as query
/// parameters.
///
/// Pairs are applied in order with last-write-wins. A blank
/// `contains_character` value is skipped rather than rejected.
pub fn explicit_filters<'a, I>(params: I) -> Result<PredicateSet, QueryError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut filters = PredicateSet::new();
    for (name, raw) in params {
        let field: Field = name.parse()?;
        if field == Field::ContainsCharacter && raw.trim().is_empty() {
            continue;
        }
        filters.insert(make_predicate(field, raw)?);
    }
    Ok(filters)
}

/// Store-backed service exposing the create / get / list / filter / delete
/// operations.
pub struct StringAnalyzer {
    store: RecordStore,
    parser: NaturalLanguageParser,
}

impl StringAnalyzer {
    /// Open the configured backend and build the default parser.
    pub fn new(backend: &BackendConfig) -> Result<Self, AnalyzerError> {
        Self::with_store(RecordStore::open(backend)?)
    }

    pub fn with_store(store: RecordStore) -> Result<Self, AnalyzerError> {
        Ok(Self {
            store,
            parser: NaturalLanguageParser::new()?,
        })
    }

    /// Analyze and store `value` after trimming surrounding whitespace.
    pub fn create(&self, value: &str) -> Result<StringRecord, AnalyzerError> {
        let record = StringRecord::new(value.trim());
        self.store.create(&record)?;
        Ok(record)
    }

    pub fn get(&self, id: &str) -> Result<StringRecord, AnalyzerError> {
        self.store
            .find(id)?
            .ok_or_else(|| AnalyzerError::NotFound(id.to_string()))
    }

    /// Filter every stored record with explicit predicates.
    ///
    /// `contains_character` matches case-sensitively here.
    pub fn list(&self, filters: &PredicateSet) -> Result<FilteredResult, AnalyzerError> {
        let records = self.store.list()?;
        Ok(apply(filters, &records, CharMatch::CaseSensitive))
    }

    /// Parse `query` and filter every stored record with the result.
    ///
    /// `contains_character` matches case-insensitively here.
    pub fn filter_natural_language(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageResult, AnalyzerError> {
        let interpreted_query = self.parser.parse(query)?;
        let records = self.store.list()?;
        let result = apply(
            &interpreted_query.parsed_filters,
            &records,
            CharMatch::CaseInsensitive,
        );
        Ok(NaturalLanguageResult {
            interpreted_query,
            result,
        })
    }

    /// Number of stored strings.
    pub fn count(&self) -> Result<usize, AnalyzerError> {
        Ok(self.store.count()?)
    }

    pub fn delete(&self, id: &str) -> Result<(), AnalyzerError> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(AnalyzerError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer_with(values: &[&str]) -> StringAnalyzer {
        let analyzer = StringAnalyzer::new(&BackendConfig::in_memory()).unwrap();
        for value in values {
            analyzer.create(value).unwrap();
        }
        analyzer
    }

    fn matched_values(result: &FilteredResult) -> Vec<String> {
        let mut values: Vec<String> = result.matched.iter().map(|r| r.value.clone()).collect();
        values.sort();
        values
    }

    #[test]
    fn create_trims_and_hashes() {
        let analyzer = analyzer_with(&[]);
        let record = analyzer.create("  racecar \n").unwrap();
        assert_eq!(record.value, "racecar");
        assert_eq!(record.id, sha256_hex("racecar"));
        assert_eq!(analyzer.get(&record.id).unwrap(), record);
    }

    #[test]
    fn count_reflects_stored_strings() {
        let analyzer = analyzer_with(&["one", "two words"]);
        assert_eq!(analyzer.count().unwrap(), 2);

        analyzer.delete(&sha256_hex("one")).unwrap();
        assert_eq!(analyzer.count().unwrap(), 1);
    }

    #[test]
    fn duplicate_create_fails() {
        let analyzer = analyzer_with(&["hello"]);
        let err = analyzer.create("hello ").unwrap_err();
        assert!(matches!(err, AnalyzerError::Store(StoreError::AlreadyExists(_))));
    }

    #[test]
    fn missing_records_are_not_found() {
        let analyzer = analyzer_with(&[]);
        assert_eq!(
            analyzer.get("nope"),
            Err(AnalyzerError::NotFound("nope".to_string()))
        );
        assert_eq!(
            analyzer.delete("nope"),
            Err(AnalyzerError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn delete_removes_record() {
        let analyzer = analyzer_with(&["gone"]);
        let id = sha256_hex("gone");
        analyzer.delete(&id).unwrap();
        assert!(analyzer.get(&id).is_err());
    }

    #[test]
    fn explicit_list_is_case_sensitive() {
        let analyzer = analyzer_with(&["Apple", "banana", "cherry"]);
        let filters = explicit_filters([("contains_character", "a")]).unwrap();
        let result = analyzer.list(&filters).unwrap();
        assert_eq!(matched_values(&result), vec!["banana"]);
    }

    #[test]
    fn natural_language_is_case_insensitive() {
        let analyzer = analyzer_with(&["Apple", "banana", "cherry"]);
        let out = analyzer
            .filter_natural_language("strings containing 'a'")
            .unwrap();
        assert_eq!(matched_values(&out.result), vec!["Apple", "banana"]);
        assert_eq!(out.interpreted_query.original, "strings containing 'a'");
    }

    #[test]
    fn natural_language_without_filters_fails() {
        let analyzer = analyzer_with(&["x"]);
        assert_eq!(
            analyzer.filter_natural_language("banana split"),
            Err(AnalyzerError::Query(QueryError::NoFiltersRecognized))
        );
    }

    #[test]
    fn explicit_filters_validate_and_skip_blank_character() {
        let filters = explicit_filters([
            ("is_palindrome", "true"),
            ("min_length", "2"),
            ("contains_character", "  "),
        ])
        .unwrap();
        assert_eq!(filters.len(), 2);

        assert!(matches!(
            explicit_filters([("word_count", "many")]),
            Err(QueryError::InvalidValue { .. })
        ));
        assert!(matches!(
            explicit_filters([("colour", "red")]),
            Err(QueryError::UnknownField(_))
        ));
    }

    #[test]
    fn list_with_no_filters_returns_all() {
        let analyzer = analyzer_with(&["a", "b", "c"]);
        let result = analyzer.list(&PredicateSet::new()).unwrap();
        assert_eq!(result.count, 3);
        assert!(result.applied.is_empty());
    }
}
