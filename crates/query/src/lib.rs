//! Query layer for stored strings.
//!
//! Three pieces, leaves first:
//!
//! - [`predicate`]: typed [`Predicate`]s and the last-write-wins [`PredicateSet`].
//! - [`parser`]: the rule-based [`NaturalLanguageParser`] that turns free text
//!   into a predicate set.
//! - [`filter`]: [`apply`], which keeps the records matching every predicate.
//!
//! Everything here is pure and synchronous; callers hand in a snapshot of
//! records and get a fresh result back.
//!
//! ```
//! use chrono::Utc;
//! use query::{apply, CharMatch, NaturalLanguageParser};
//! use store::StringRecord;
//!
//! let records: Vec<StringRecord> = ["racecar", "hello", "level"]
//!     .into_iter()
//!     .map(|v| StringRecord::with_timestamp(v, Utc::now()))
//!     .collect();
//!
//! let parsed = NaturalLanguageParser::new()?.parse("palindromic strings")?;
//! let result = apply(&parsed.parsed_filters, &records, CharMatch::CaseInsensitive);
//! assert_eq!(result.count, 2);
//! # Ok::<(), query::QueryError>(())
//! ```

mod error;
pub mod filter;
pub mod parser;
pub mod predicate;

pub use crate::error::QueryError;
pub use crate::filter::{apply, CharMatch, FilteredResult};
pub use crate::parser::{NaturalLanguageParser, ParsedQuery, Rule};
pub use crate::predicate::{make_predicate, Field, Predicate, PredicateSet, PredicateValue};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use store::StringRecord;

    #[test]
    fn parsed_filters_drive_the_engine() {
        let records: Vec<StringRecord> = ["Banana bread", "apple pie", "kiwi", "racecar"]
            .into_iter()
            .map(|v| StringRecord::with_timestamp(v, Utc::now()))
            .collect();

        let parsed = NaturalLanguageParser::new()
            .unwrap()
            .parse("2 words containing 'b'")
            .unwrap();
        let result = apply(&parsed.parsed_filters, &records, CharMatch::CaseInsensitive);

        let values: Vec<_> = result.matched.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["Banana bread"]);
        assert_eq!(result.applied, parsed.parsed_filters);
    }
}
