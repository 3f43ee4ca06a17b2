//! # quotedesk-db: Database Layer for QuoteDesk
//!
//! Persistent storage for quotes, quote lines, and the item catalog, backed
//! by SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuoteDesk Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/quotes)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   quotedesk-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ QuoteRepo     │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ ItemRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite database file (quotes, quote_lines, items)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Quote and item repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quotedesk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("quotedesk.db")).await?;
//!
//! let id = db.quotes().create(&new_quote).await?;
//! let quote = db.quotes().get_by_id(id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::item::ItemRepository;
pub use repository::quote::QuoteRepository;
