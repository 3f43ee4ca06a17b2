//! # Repository Module
//!
//! Database repository implementations for QuoteDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Units of Work                       │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.quotes().create(&new_quote)                                │
//! │       ▼                                                                 │
//! │  QuoteRepository                                                       │
//! │  ├── create / add_line / delete  → one transaction each                │
//! │  └── get_by_id                   → one pooled connection               │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold a clone of the pool and acquire a connection per call;
//! nothing outlives the call that opened it. A transaction dropped without
//! `commit()` rolls back, so an early `?` return never leaves partial rows.
//!
//! ## Available Repositories
//!
//! - [`QuoteRepository`](quote::QuoteRepository) - Quote aggregate persistence
//! - [`ItemRepository`](item::ItemRepository) - Read access to the catalog

pub mod item;
pub mod quote;
