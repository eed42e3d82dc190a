use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use string_analyzer::{AnalyzerError, QueryError, StoreError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),

    #[error("String does not exist in the system")]
    StringNotFound(String),

    #[error("String already exists in the system")]
    Conflict(String),

    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::StringNotFound(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Query(QueryError::NoFiltersRecognized) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServerError::Query(QueryError::Pattern(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Query(_) => StatusCode::BAD_REQUEST,
            ServerError::Store(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Unprocessable(_) => "UNPROCESSABLE_ENTITY",
            ServerError::StringNotFound(_) => "STRING_NOT_FOUND",
            ServerError::Conflict(_) => "STRING_EXISTS",
            ServerError::Query(QueryError::InvalidValue { .. }) => "INVALID_VALUE",
            ServerError::Query(QueryError::UnknownField(_)) => "UNKNOWN_FIELD",
            ServerError::Query(QueryError::NoFiltersRecognized) => "NO_FILTERS_RECOGNIZED",
            ServerError::Query(QueryError::Pattern(_)) => "QUERY_PATTERN_ERROR",
            ServerError::Store(_) => "STORE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = %error_code, %message, "request failed");
        } else {
            tracing::warn!(code = %error_code, %message, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: error_code,
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnalyzerError> for ServerError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::Query(err) => ServerError::Query(err),
            AnalyzerError::Store(StoreError::AlreadyExists(id)) => ServerError::Conflict(id),
            AnalyzerError::Store(err) => ServerError::Store(err),
            AnalyzerError::NotFound(id) => ServerError::StringNotFound(id),
        }
    }
}
