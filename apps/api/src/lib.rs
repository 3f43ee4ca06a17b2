//! # QuoteDesk API
//!
//! HTTP service exposing quote creation, line editing, retrieval, listing,
//! and deletion over JSON.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          QuoteDesk API                                  │
//! │                                                                         │
//! │  Client ──► axum Router ──► routes::{quotes, items, health}            │
//! │                                   │                                     │
//! │                                   │ dto  ──►  quotedesk-core commands   │
//! │                                   ▼                                     │
//! │                              quotedesk-db ──► SQLite                    │
//! │                                                                         │
//! │  Failures on any layer ──► ApiError ──► {"error", "message"} + status   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`build_app`] is shared by the binary and the black-box tests, so the
//! tests exercise exactly the production router.

use axum::{routing::get, Router};
use tracing_subscriber::EnvFilter;

use quotedesk_db::Database;

pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;

/// Filter used when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,quotedesk=debug,sqlx=warn";

/// Builds the full HTTP router around a connected database.
pub fn build_app(db: Database) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api/quotes", routes::quotes::router())
        .nest("/api/items", routes::items::router())
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(db)
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over `configured`, which wins over
/// [`DEFAULT_LOG_FILTER`].
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
