use super::with_analyzer;
use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use string_analyzer::{explicit_filters, Field, ParsedQuery, PredicateSet, QueryError, StringRecord};

/// Query parameters accepted by `GET /strings`
///
/// Values stay raw here and are validated when turned into predicates.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub is_palindrome: Option<String>,
    #[serde(default)]
    pub min_length: Option<String>,
    #[serde(default)]
    pub max_length: Option<String>,
    #[serde(default)]
    pub word_count: Option<String>,
    #[serde(default)]
    pub contains_character: Option<String>,
}

impl ListQuery {
    /// Present parameters as `(field, raw value)` pairs in field order
    fn pairs(&self) -> Vec<(&str, &str)> {
        let params = [
            (Field::IsPalindrome, &self.is_palindrome),
            (Field::MinLength, &self.min_length),
            (Field::MaxLength, &self.max_length),
            (Field::WordCount, &self.word_count),
            (Field::ContainsCharacter, &self.contains_character),
        ];

        let mut pairs: Vec<(&str, &str)> = Vec::new();
        for (field, raw) in params {
            if let Some(raw) = raw.as_deref() {
                pairs.push((field.as_str(), raw));
            }
        }
        pairs
    }
}

/// Response for `GET /strings`
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: PredicateSet,
}

/// Query parameters accepted by `GET /strings/filter-by-natural-language`
#[derive(Debug, Default, Deserialize)]
pub struct NaturalLanguageQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// Response for `GET /strings/filter-by-natural-language`
#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: ParsedQuery,
}

/// Analyze and store a string.
///
/// Body: `{"value": "<string>"}`. The value is trimmed before analysis; its
/// SHA-256 becomes the identifier.
///
/// - 201 with the stored record and a `Location` header
/// - 400 when the body is not JSON or has no `value`
/// - 422 when `value` is not a string
/// - 409 when the string is already stored
pub async fn create_string(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let missing = || ServerError::BadRequest("Invalid request body or missing \"value\" field".into());

    let Json(body) = body.map_err(|_| missing())?;
    let value = match body.get("value") {
        None => return Err(missing()),
        Some(serde_json::Value::String(value)) => value.clone(),
        Some(_) => {
            return Err(ServerError::Unprocessable(
                "Invalid data type for \"value\" (must be string)".into(),
            ))
        }
    };

    let record = with_analyzer(&state, move |analyzer| analyzer.create(&value)).await?;
    metrics::counter!("strings_created_total").increment(1);

    let location = format!("/strings/{}", record.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(record)))
}

/// Fetch one stored string by identifier.
pub async fn get_string(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let record = with_analyzer(&state, move |analyzer| analyzer.get(&id)).await?;
    Ok(Json(record))
}

/// List stored strings, filtered by explicit query parameters.
///
/// `contains_character` matches case-sensitively; a blank value is ignored.
pub async fn list_strings(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListQuery>,
) -> ServerResult<impl IntoResponse> {
    let filters = explicit_filters(params.pairs())?;
    metrics::counter!("string_filter_requests_total", "path" => "explicit").increment(1);

    let result = with_analyzer(&state, move |analyzer| analyzer.list(&filters)).await?;

    Ok(Json(ListResponse {
        count: result.count,
        data: result.matched,
        filters_applied: result.applied,
    }))
}

/// Filter stored strings with a free-text query.
///
/// `contains_character` matches case-insensitively on this path.
///
/// # Example
/// ```json
/// // GET /strings/filter-by-natural-language?query=palindromic%20strings
/// {
///   "data": [ ... ],
///   "count": 2,
///   "interpreted_query": {
///     "original": "palindromic strings",
///     "parsed_filters": { "is_palindrome": true }
///   }
/// }
/// ```
pub async fn filter_by_natural_language(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<NaturalLanguageQuery>,
) -> ServerResult<impl IntoResponse> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Query is required".into()))?;
    metrics::counter!("string_filter_requests_total", "path" => "natural_language").increment(1);

    let outcome = with_analyzer(&state, move |analyzer| {
        analyzer.filter_natural_language(&query)
    })
    .await;

    let outcome = match outcome {
        Err(ServerError::Query(QueryError::NoFiltersRecognized)) => {
            metrics::counter!("natural_language_parse_failures_total").increment(1);
            return Err(ServerError::Query(QueryError::NoFiltersRecognized));
        }
        other => other?,
    };

    Ok(Json(NaturalLanguageResponse {
        count: outcome.result.count,
        data: outcome.result.matched,
        interpreted_query: outcome.interpreted_query,
    }))
}

/// Delete a stored string. 204 on success, 404 when absent.
pub async fn delete_string(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    with_analyzer(&state, move |analyzer| analyzer.delete(&id)).await?;
    metrics::counter!("strings_deleted_total").increment(1);
    Ok(StatusCode::NO_CONTENT)
}
