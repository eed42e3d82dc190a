//! String Analyzer Server - HTTP REST API for string analysis
//!
//! This crate exposes the [`string_analyzer::StringAnalyzer`] service over
//! HTTP:
//!
//! - **Strings**: create, fetch, list with explicit filters, delete
//! - **Natural-language filtering**: free-text queries parsed into filters
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `GET /metadata` - Server metadata
//! - `POST /strings` - Analyze and store a string
//! - `GET /strings` - List strings with `is_palindrome`, `min_length`,
//!   `max_length`, `word_count`, `contains_character` filters
//! - `GET /strings/filter-by-natural-language?query=...` - Free-text filtering
//! - `GET /strings/{id}` - Fetch a string by SHA-256 identifier
//! - `DELETE /strings/{id}` - Delete a string

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
